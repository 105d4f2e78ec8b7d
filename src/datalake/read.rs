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

use anyhow::Context;
use tf_provider::value::Value;

use crate::client::{ApiError, DataLakeStoreApi, Deadline};
use crate::helpers::{
    case_equivalent, flatten_tags, keep_equivalent, locations_equivalent, normalize_location,
};
use crate::id::{ResourceId, DATA_LAKE_STORE_PROVIDER};
use crate::utils::string_or_empty;

use super::models::DataLakeStoreAccount;
use super::state::DataLakeStoreState;

/// Human readable identity used in error messages
pub(super) fn describe(id: &ResourceId) -> String {
    format!(
        "Data Lake Store {:?} (Resource Group {:?})",
        id.name(),
        id.resource_group
    )
}

/// Fetch the account behind `id`, `None` if it does not exist
pub(super) async fn fetch<A>(
    api: &A,
    id: &ResourceId,
    deadline: &Deadline,
) -> anyhow::Result<Option<DataLakeStoreAccount>>
where
    A: DataLakeStoreApi + ?Sized,
{
    match deadline
        .run(api.get_account(&id.resource_group, id.name()))
        .await
    {
        Ok(account) => Ok(Some(account)),
        Err(ApiError::NotFound) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("retrieving {}", describe(id))),
    }
}

impl<'a> DataLakeStoreState<'a> {
    /// Identity persisted in `id`
    pub(super) fn resource_id(&self) -> Result<ResourceId, ApiError> {
        ResourceId::parse_as(self.id.as_str(), DATA_LAKE_STORE_PROVIDER, "accounts")
    }

    /// Overwrite observed attributes with the remote account
    pub(super) fn flatten(&mut self, id: &ResourceId, account: DataLakeStoreAccount) {
        self.id = Value::Value(Cow::Owned(id.to_string()));
        self.name = Value::Value(Cow::Owned(id.name().to_string()));
        self.resource_group_name = keep_equivalent(
            &self.resource_group_name,
            Some(id.resource_group.clone()),
            case_equivalent,
        );
        self.location = keep_equivalent(
            &self.location,
            account.location.as_deref().map(normalize_location),
            locations_equivalent,
        );

        let properties = account.properties.unwrap_or_default();
        self.tier = keep_equivalent(&self.tier, properties.current_tier, case_equivalent);
        self.encryption_state = keep_equivalent(
            &self.encryption_state,
            properties.encryption_state,
            case_equivalent,
        );
        self.encryption_type = keep_equivalent(
            &self.encryption_type,
            properties.encryption_config.and_then(|config| config.kind),
            case_equivalent,
        );
        self.firewall_state = keep_equivalent(
            &self.firewall_state,
            properties.firewall_state,
            case_equivalent,
        );
        self.firewall_allow_azure_ips = keep_equivalent(
            &self.firewall_allow_azure_ips,
            properties.firewall_allow_azure_ips,
            case_equivalent,
        );
        self.endpoint = string_or_empty(properties.endpoint);
        self.tags = flatten_tags(&self.tags, account.tags);
    }
}
