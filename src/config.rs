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

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::ValueString;
use tf_provider::{map, AttributePath, Diagnostics};

use crate::client::arm::ClientSecretCredential;
use crate::client::CloudEnvironment;
use crate::utils::{known_str, DisplayJoinable, WithSchema, WithValidate};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// `provider "azurerm"` block
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    pub subscription_id: ValueString<'a>,
    pub tenant_id: ValueString<'a>,
    pub client_id: ValueString<'a>,
    pub client_secret: ValueString<'a>,
    pub environment: ValueString<'a>,
    pub poll_interval: ValueString<'a>,
}

/// Fully resolved provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub subscription_id: String,
    pub credential: ClientSecretCredential,
    pub environment: CloudEnvironment,
    pub poll_interval: Duration,
}

impl<'a> WithSchema for ProviderConfig<'a> {
    fn schema() -> Schema {
        let optional = |description: &str| Attribute {
            attr_type: AttributeType::String,
            description: Description::plain(description),
            constraint: AttributeConstraint::Optional,
            ..Default::default()
        };
        Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "subscription_id" => optional("Subscription to manage resources in, defaults to `ARM_SUBSCRIPTION_ID`"),
                    "tenant_id" => optional("Tenant of the service principal, defaults to `ARM_TENANT_ID`"),
                    "client_id" => optional("Client ID of the service principal, defaults to `ARM_CLIENT_ID`"),
                    "client_secret" => Attribute {
                        sensitive: true,
                        ..optional("Client secret of the service principal, defaults to `ARM_CLIENT_SECRET`")
                    },
                    "environment" => optional(&format!(
                        "Azure cloud, one of: {} (default: `public`), defaults to `ARM_ENVIRONMENT`",
                        CloudEnvironment::NAMES.iter().join_with(", ")
                    )),
                    "poll_interval" => optional("Delay between two polls of a long-running operation (default: `10s`)"),
                },
                description: Description::plain("Azure Resource Manager"),
                ..Default::default()
            },
        }
    }
}

impl<'a> WithValidate for ProviderConfig<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Some(environment) = known_str(&self.environment) {
            if CloudEnvironment::from_name(environment).is_none() {
                diags.error(
                    "Unknown Azure environment",
                    format!(
                        "{environment:?} is not one of: {}",
                        CloudEnvironment::NAMES.iter().join_with(", ")
                    ),
                    attr_path.clone().attribute("environment"),
                );
            }
        }
        if let Some(interval) = known_str(&self.poll_interval) {
            match humantime::parse_duration(interval) {
                Ok(interval) if !interval.is_zero() => (),
                Ok(_) => diags.error_short(
                    "`poll_interval` must be positive",
                    attr_path.attribute("poll_interval"),
                ),
                Err(err) => diags.error(
                    "Invalid `poll_interval`",
                    format!("{interval:?} is not a duration: {err}"),
                    attr_path.attribute("poll_interval"),
                ),
            }
        }
    }
}

impl<'a> ProviderConfig<'a> {
    /// Merge the configuration with the `ARM_*` variables looked up by `env`
    pub fn resolve<E>(&self, diags: &mut Diagnostics, env: E) -> Option<Settings>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut setting = |value: &ValueString, name: &'static str, variable: &str| {
            let resolved = known_str(value)
                .map(str::to_string)
                .or_else(|| env(variable))
                .filter(|value| !value.is_empty());
            if resolved.is_none() {
                diags.error(
                    format!("Missing `{name}`"),
                    format!("`{name}` must be set in the provider block or through `{variable}`"),
                    AttributePath::new(name),
                );
            }
            resolved
        };

        let subscription_id = setting(&self.subscription_id, "subscription_id", "ARM_SUBSCRIPTION_ID");
        let tenant_id = setting(&self.tenant_id, "tenant_id", "ARM_TENANT_ID");
        let client_id = setting(&self.client_id, "client_id", "ARM_CLIENT_ID");
        let client_secret = setting(&self.client_secret, "client_secret", "ARM_CLIENT_SECRET");

        let environment_name = known_str(&self.environment)
            .map(str::to_string)
            .or_else(|| env("ARM_ENVIRONMENT"))
            .unwrap_or_default();
        let environment = CloudEnvironment::from_name(&environment_name);
        if environment.is_none() {
            diags.error(
                "Unknown Azure environment",
                format!(
                    "{environment_name:?} is not one of: {}",
                    CloudEnvironment::NAMES.iter().join_with(", ")
                ),
                AttributePath::new("environment"),
            );
        }

        let poll_interval = match known_str(&self.poll_interval) {
            Some(interval) => match humantime::parse_duration(interval) {
                Ok(interval) => interval,
                Err(err) => {
                    diags.error(
                        "Invalid `poll_interval`",
                        format!("{interval:?} is not a duration: {err}"),
                        AttributePath::new("poll_interval"),
                    );
                    return None;
                }
            },
            None => DEFAULT_POLL_INTERVAL,
        };

        Some(Settings {
            subscription_id: subscription_id?,
            credential: ClientSecretCredential {
                tenant_id: tenant_id?,
                client_id: client_id?,
                client_secret: client_secret?,
            },
            environment: environment?,
            poll_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::collections::HashMap;

    use tf_provider::value::Value;

    use super::*;

    fn string(s: &'static str) -> ValueString<'static> {
        Value::Value(Cow::Borrowed(s))
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn configuration_overrides_environment() {
        let config = ProviderConfig {
            subscription_id: string("sub-config"),
            environment: string("china"),
            poll_interval: string("30s"),
            ..Default::default()
        };
        let mut diags = Diagnostics::default();
        let settings = config
            .resolve(
                &mut diags,
                env(&[
                    ("ARM_SUBSCRIPTION_ID", "sub-env"),
                    ("ARM_TENANT_ID", "tenant"),
                    ("ARM_CLIENT_ID", "client"),
                    ("ARM_CLIENT_SECRET", "secret"),
                    ("ARM_ENVIRONMENT", "usgovernment"),
                ]),
            )
            .unwrap();

        assert!(diags.errors.is_empty());
        assert_eq!(settings.subscription_id, "sub-config");
        assert_eq!(settings.credential.tenant_id, "tenant");
        assert_eq!(settings.credential.client_secret, "secret");
        assert_eq!(
            settings.environment.resource_manager,
            "https://management.chinacloudapi.cn"
        );
        assert_eq!(settings.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn missing_credentials_are_reported() {
        let mut diags = Diagnostics::default();
        let settings = ProviderConfig::default().resolve(
            &mut diags,
            env(&[("ARM_SUBSCRIPTION_ID", "sub"), ("ARM_CLIENT_SECRET", "")]),
        );

        assert!(settings.is_none());
        // tenant_id, client_id and the empty client_secret
        assert_eq!(diags.errors.len(), 3);
    }

    #[test]
    fn defaults_to_public_cloud() {
        let mut diags = Diagnostics::default();
        let settings = ProviderConfig::default()
            .resolve(
                &mut diags,
                env(&[
                    ("ARM_SUBSCRIPTION_ID", "sub"),
                    ("ARM_TENANT_ID", "tenant"),
                    ("ARM_CLIENT_ID", "client"),
                    ("ARM_CLIENT_SECRET", "secret"),
                ]),
            )
            .unwrap();

        assert_eq!(settings.environment, CloudEnvironment::default());
        assert_eq!(settings.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn validates_environment_and_interval() {
        let config = ProviderConfig {
            environment: string("mars"),
            poll_interval: string("0s"),
            ..Default::default()
        };
        let mut diags = Diagnostics::default();
        config.validate(&mut diags, AttributePath::default());
        assert_eq!(diags.errors.len(), 2);
    }
}
