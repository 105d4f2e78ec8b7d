// This file is part of the terraform-provider-azurerm project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;

use tf_provider::value::{Value, ValueString};
use tf_provider::{AttributePath, Diagnostics};

use crate::helpers::{case_equivalent, locations_equivalent};
use crate::utils::{known_str, WithNormalize};

use super::state::DataLakeStoreState;
use super::{
    DEFAULT_ENCRYPTION_STATE, DEFAULT_FIREWALL_ALLOW_AZURE_IPS, DEFAULT_FIREWALL_STATE,
    DEFAULT_TIER,
};

impl<'a> WithNormalize for DataLakeStoreState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.id.is_null() {
            self.id = Value::Unknown;
        }
        if self.endpoint.is_null() {
            self.endpoint = Value::Unknown;
        }
        if self.encryption_type.is_null() {
            self.encryption_type = Value::Unknown;
        }
        if self.timeouts.is_null() {
            self.timeouts = Value::Value(Default::default());
        }
    }
}

fn default_unless_configured<'a>(
    planned: &mut ValueString<'a>,
    config: &ValueString<'a>,
    default: &'static str,
) {
    if config.is_null() {
        *planned = Value::Value(Cow::Borrowed(default));
    }
}

impl<'a> DataLakeStoreState<'a> {
    /// Fill attributes left out of the configuration with their default value
    pub(super) fn apply_defaults(&mut self, config: &DataLakeStoreState<'a>) {
        default_unless_configured(&mut self.tier, &config.tier, DEFAULT_TIER);
        default_unless_configured(
            &mut self.encryption_state,
            &config.encryption_state,
            DEFAULT_ENCRYPTION_STATE,
        );
        default_unless_configured(
            &mut self.firewall_state,
            &config.firewall_state,
            DEFAULT_FIREWALL_STATE,
        );
        default_unless_configured(
            &mut self.firewall_allow_azure_ips,
            &config.firewall_allow_azure_ips,
            DEFAULT_FIREWALL_ALLOW_AZURE_IPS,
        );
    }

    /// Attributes whose change cannot be applied in place
    pub(super) fn requires_replace(&self, prior: &DataLakeStoreState<'a>) -> Vec<AttributePath> {
        let checks: [(&str, &ValueString<'a>, &ValueString<'a>, fn(&str, &str) -> bool); 5] = [
            ("name", &prior.name, &self.name, |a, b| a == b),
            (
                "resource_group_name",
                &prior.resource_group_name,
                &self.resource_group_name,
                case_equivalent,
            ),
            ("location", &prior.location, &self.location, locations_equivalent),
            (
                "encryption_state",
                &prior.encryption_state,
                &self.encryption_state,
                case_equivalent,
            ),
            (
                "encryption_type",
                &prior.encryption_type,
                &self.encryption_type,
                case_equivalent,
            ),
        ];

        checks
            .into_iter()
            .filter(|(_, prior, planned, equivalent)| {
                // unknown values are decided at apply time
                match (known_str(prior), known_str(planned)) {
                    (Some(prior), Some(planned)) => !equivalent(prior, planned),
                    (Some(_), None) => planned.is_null(),
                    (None, _) => false,
                }
            })
            .map(|(name, ..)| AttributePath::new(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &'static str) -> ValueString<'static> {
        Value::Value(Cow::Borrowed(s))
    }

    fn prior() -> DataLakeStoreState<'static> {
        DataLakeStoreState {
            id: string("/subscriptions/sub/resourceGroups/rg1/providers/Microsoft.DataLakeStore/accounts/teststore01"),
            name: string("teststore01"),
            location: string("westeurope"),
            resource_group_name: string("rg1"),
            tier: string("Consumption"),
            encryption_state: string("Enabled"),
            encryption_type: string("ServiceManaged"),
            firewall_state: string("Enabled"),
            firewall_allow_azure_ips: string("Enabled"),
            endpoint: string("teststore01.azuredatalakestore.net"),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_fill_unconfigured_attributes() {
        let config = DataLakeStoreState {
            firewall_state: string("Disabled"),
            ..Default::default()
        };
        let mut planned = config.clone();
        planned.apply_defaults(&config);

        assert_eq!(planned.tier, string("Consumption"));
        assert_eq!(planned.encryption_state, string("Enabled"));
        assert_eq!(planned.firewall_state, string("Disabled"));
        assert_eq!(planned.firewall_allow_azure_ips, string("Enabled"));
    }

    #[test]
    fn normalize_marks_computed_attributes_unknown() {
        let mut state = DataLakeStoreState::default();
        state.normalize(&mut Diagnostics::default());
        assert!(state.id.is_unknown());
        assert!(state.endpoint.is_unknown());
        assert!(state.encryption_type.is_unknown());
    }

    #[test]
    fn mutable_changes_do_not_replace() {
        let mut planned = prior();
        planned.tier = string("Commitment_1TB");
        planned.firewall_state = string("Disabled");
        planned.location = string("West Europe");
        planned.encryption_state = string("enabled");

        assert!(planned.requires_replace(&prior()).is_empty());
    }

    #[test]
    fn force_new_changes_replace() {
        let mut planned = prior();
        planned.name = string("teststore02");
        planned.encryption_state = string("Disabled");
        planned.encryption_type = ValueString::Unknown;

        let replace = planned.requires_replace(&prior());
        assert_eq!(replace.len(), 2);
        assert_eq!(
            format!("{:?}", replace[0]),
            format!("{:?}", AttributePath::new("name"))
        );
        assert_eq!(
            format!("{:?}", replace[1]),
            format!("{:?}", AttributePath::new("encryption_state"))
        );
    }
}
