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

use std::fmt::Display;

use crate::client::ApiError;
use crate::utils::DisplayJoinable;

pub const DATA_LAKE_STORE_PROVIDER: &str = "Microsoft.DataLakeStore";
pub const WEB_PROVIDER: &str = "Microsoft.Web";

/// Identity of an Azure Resource Manager object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription_id: String,
    pub resource_group: String,
    pub provider: String,
    /// `(type, name)` pairs below the provider namespace
    pub path: Vec<(String, String)>,
}

impl ResourceId {
    pub fn new(
        subscription_id: &str,
        resource_group: &str,
        provider: &str,
        kind: &str,
        name: &str,
    ) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            resource_group: resource_group.to_string(),
            provider: provider.to_string(),
            path: vec![(kind.to_string(), name.to_string())],
        }
    }

    pub fn data_lake_store(subscription_id: &str, resource_group: &str, name: &str) -> Self {
        Self::new(
            subscription_id,
            resource_group,
            DATA_LAKE_STORE_PROVIDER,
            "accounts",
            name,
        )
    }

    pub fn web_app(subscription_id: &str, resource_group: &str, name: &str) -> Self {
        Self::new(subscription_id, resource_group, WEB_PROVIDER, "sites", name)
    }

    /// Name of the innermost object
    pub fn name(&self) -> &str {
        self.path.last().map_or("", |(_, name)| name.as_str())
    }

    pub fn parse(id: &str) -> Result<Self, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidId {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = id.trim_matches('/').split('/').collect();
        if segments.len() % 2 != 0 {
            return Err(invalid("the number of segments is not even"));
        }

        let mut subscription_id = None;
        let mut resource_group = None;
        let mut provider = None;
        let mut path = Vec::new();
        for pair in segments.chunks(2) {
            let (key, value) = (pair[0], pair[1]);
            if key.is_empty() || value.is_empty() {
                return Err(invalid("empty segment"));
            }
            if provider.is_some() {
                path.push((key.to_string(), value.to_string()));
            } else if key.eq_ignore_ascii_case("subscriptions") {
                subscription_id = Some(value);
            } else if key.eq_ignore_ascii_case("resourceGroups") {
                resource_group = Some(value);
            } else if key.eq_ignore_ascii_case("providers") {
                provider = Some(value);
            } else {
                return Err(invalid(&format!("unexpected segment {key:?}")));
            }
        }

        Ok(Self {
            subscription_id: subscription_id
                .ok_or_else(|| invalid("no subscription ID found"))?
                .to_string(),
            resource_group: resource_group
                .ok_or_else(|| invalid("no resource group name found"))?
                .to_string(),
            provider: provider.unwrap_or_default().to_string(),
            path,
        })
    }

    /// Parse `id` and check it addresses a single `provider/kind` object
    pub fn parse_as(id: &str, provider: &str, kind: &str) -> Result<Self, ApiError> {
        let parsed = Self::parse(id)?;
        let matches = parsed.provider.eq_ignore_ascii_case(provider)
            && parsed.path.len() == 1
            && parsed.path[0].0.eq_ignore_ascii_case(kind);
        if matches {
            Ok(parsed)
        } else {
            Err(ApiError::InvalidId {
                id: id.to_string(),
                reason: format!("expected a {provider}/{kind} ID"),
            })
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, self.resource_group
        )?;
        if !self.provider.is_empty() {
            write!(
                f,
                "/providers/{}/{}",
                self.provider,
                self.path
                    .iter()
                    .map(|(kind, name)| format!("{kind}/{name}"))
                    .join_with("/")
            )?;
        }
        Ok(())
    }
}
