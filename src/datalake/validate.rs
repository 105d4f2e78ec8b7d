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

use tf_provider::{AttributePath, Diagnostics};

use crate::utils::WithValidate;
use crate::{timeouts, validation};

use super::models::{
    ENCRYPTION_STATES, ENCRYPTION_TYPES, FIREWALL_ALLOW_AZURE_IPS_STATES, FIREWALL_STATES, TIERS,
};
use super::state::DataLakeStoreState;

impl<'a> WithValidate for DataLakeStoreState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        let path = |name: &str| attr_path.clone().attribute(name.to_string());

        validation::data_lake_account_name(diags, &self.name, path("name"));
        validation::resource_group_name(
            diags,
            &self.resource_group_name,
            path("resource_group_name"),
        );
        validation::not_empty(diags, &self.location, path("location"));
        validation::string_in_slice(diags, &self.tier, &TIERS, path("tier"));
        validation::string_in_slice(
            diags,
            &self.encryption_state,
            &ENCRYPTION_STATES,
            path("encryption_state"),
        );
        validation::string_in_slice(
            diags,
            &self.encryption_type,
            &ENCRYPTION_TYPES,
            path("encryption_type"),
        );
        validation::string_in_slice(
            diags,
            &self.firewall_state,
            &FIREWALL_STATES,
            path("firewall_state"),
        );
        validation::string_in_slice(
            diags,
            &self.firewall_allow_azure_ips,
            &FIREWALL_ALLOW_AZURE_IPS_STATES,
            path("firewall_allow_azure_ips"),
        );
        validation::tags(diags, &self.tags, path("tags"));
        timeouts::validate(diags, &self.timeouts, path("timeouts"));
    }
}
