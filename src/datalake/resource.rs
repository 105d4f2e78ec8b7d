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

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use tracing::{info, warn};

use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{schema::Schema, AttributePath, Diagnostics, Resource};

use crate::client::{wait_for_completion, ApiError, ClientHandle, DataLakeStoreApi, Deadline};
use crate::id::{ResourceId, DATA_LAKE_STORE_PROVIDER};
use crate::timeouts::{self, TimeoutKind};
use crate::utils::{known_str, report, WithNormalize, WithSchema, WithValidate};
use crate::helpers::{expand_tags, normalize_location};

use super::models::{
    CreateDataLakeStoreAccountParameters, CreateDataLakeStoreAccountProperties, EncryptionConfig,
    UpdateDataLakeStoreAccountParameters, UpdateDataLakeStoreAccountProperties,
};
use super::read::{describe, fetch};
use super::state::DataLakeStoreState;
use super::DEFAULT_TIMEOUTS;

#[derive(Debug)]
pub struct DataLakeStoreResource<A> {
    client: ClientHandle<A>,
}

impl<A: DataLakeStoreApi> DataLakeStoreResource<A> {
    pub fn new(client: ClientHandle<A>) -> Self {
        Self { client }
    }

    /// Refresh `state` from the remote account, `false` if it no longer exists
    async fn refresh(
        &self,
        state: &mut DataLakeStoreState<'_>,
        deadline: &Deadline,
    ) -> anyhow::Result<bool> {
        let api = self.client.get().await?;
        let id = state.resource_id()?;

        match fetch(&*api, &id, deadline).await? {
            Some(account) => {
                state.flatten(&id, account);
                Ok(true)
            }
            None => {
                warn!(id = %id, "Data Lake Store was not found, removing it from state");
                Ok(false)
            }
        }
    }

    async fn create_account(&self, state: &mut DataLakeStoreState<'_>) -> anyhow::Result<()> {
        let api = self.client.get().await?;
        let id = ResourceId::data_lake_store(
            api.subscription_id(),
            state.resource_group_name.as_str(),
            state.name.as_str(),
        );
        let deadline = Deadline::after(timeouts::resolve(
            &state.timeouts,
            TimeoutKind::Create,
            &DEFAULT_TIMEOUTS,
        ));

        if let Some(existing) = fetch(&*api, &id, &deadline).await? {
            return Err(ApiError::AlreadyExists {
                id: existing.id.unwrap_or_else(|| id.to_string()),
            }
            .into());
        }

        info!(id = %id, "creating Data Lake Store");
        let parameters = create_parameters(state);
        let operation = deadline
            .run(api.create_account(&id.resource_group, id.name(), &parameters))
            .await
            .with_context(|| format!("issuing create request for {}", describe(&id)))?;
        wait_for_completion(&*api, operation, &deadline)
            .await
            .with_context(|| format!("waiting for creation of {}", describe(&id)))?;

        let account = fetch(&*api, &id, &deadline)
            .await?
            .ok_or_else(|| anyhow!("{} disappeared right after its creation", describe(&id)))?;
        if account.id.is_none() {
            return Err(anyhow!("cannot read {} ID", describe(&id)));
        }
        state.flatten(&id, account);
        Ok(())
    }

    /// Apply the mutable attributes, `false` if the account is gone once updated
    async fn update_account(&self, state: &mut DataLakeStoreState<'_>) -> anyhow::Result<bool> {
        let api = self.client.get().await?;
        let id = state.resource_id()?;
        let deadline = Deadline::after(timeouts::resolve(
            &state.timeouts,
            TimeoutKind::Update,
            &DEFAULT_TIMEOUTS,
        ));

        info!(id = %id, "updating Data Lake Store");
        let parameters = update_parameters(state);
        let operation = deadline
            .run(api.update_account(&id.resource_group, id.name(), &parameters))
            .await
            .with_context(|| format!("issuing update request for {}", describe(&id)))?;
        wait_for_completion(&*api, operation, &deadline)
            .await
            .with_context(|| format!("waiting for update of {}", describe(&id)))?;

        self.refresh(state, &deadline).await
    }

    async fn delete_account(&self, state: &DataLakeStoreState<'_>) -> anyhow::Result<()> {
        let api = self.client.get().await?;
        let id = state.resource_id()?;
        let deadline = Deadline::after(timeouts::resolve(
            &state.timeouts,
            TimeoutKind::Delete,
            &DEFAULT_TIMEOUTS,
        ));

        info!(id = %id, "deleting Data Lake Store");
        let deleted = match deadline
            .run(api.delete_account(&id.resource_group, id.name()))
            .await
        {
            Ok(operation) => wait_for_completion(&*api, operation, &deadline)
                .await
                .map(|_| ())
                .with_context(|| format!("waiting for deletion of {}", describe(&id))),
            Err(err) => {
                Err(err).with_context(|| format!("issuing delete request for {}", describe(&id)))
            }
        };

        match deleted {
            Err(err) if crate::client::was_not_found(&err) => {
                warn!(id = %id, "Data Lake Store was already deleted");
                Ok(())
            }
            result => result,
        }
    }
}

fn owned(value: &tf_provider::value::ValueString<'_>) -> Option<String> {
    known_str(value).map(str::to_string)
}

fn create_parameters(state: &DataLakeStoreState<'_>) -> CreateDataLakeStoreAccountParameters {
    CreateDataLakeStoreAccountParameters {
        location: normalize_location(state.location.as_str()),
        tags: expand_tags(&state.tags),
        properties: CreateDataLakeStoreAccountProperties {
            new_tier: owned(&state.tier),
            firewall_state: owned(&state.firewall_state),
            firewall_allow_azure_ips: owned(&state.firewall_allow_azure_ips),
            encryption_state: owned(&state.encryption_state),
            encryption_config: owned(&state.encryption_type)
                .map(|kind| EncryptionConfig { kind: Some(kind) }),
        },
    }
}

fn update_parameters(state: &DataLakeStoreState<'_>) -> UpdateDataLakeStoreAccountParameters {
    UpdateDataLakeStoreAccountParameters {
        // An empty map clears the tags removed from the configuration
        tags: Some(expand_tags(&state.tags).unwrap_or_default()),
        properties: UpdateDataLakeStoreAccountProperties {
            new_tier: owned(&state.tier),
            firewall_state: owned(&state.firewall_state),
            firewall_allow_azure_ips: owned(&state.firewall_allow_azure_ips),
        },
    }
}

#[async_trait]
impl<A> Resource for DataLakeStoreResource<A>
where
    A: DataLakeStoreApi,
{
    type State<'a> = Value<DataLakeStoreState<'a>>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(DataLakeStoreState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Value::Value(config) = &config {
            config.validate(diags, AttributePath::default());
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = match state {
            Value::Value(state) => state,
            state => return Some((state, private_state)),
        };
        let deadline = Deadline::after(timeouts::resolve(
            &state.timeouts,
            TimeoutKind::Read,
            &DEFAULT_TIMEOUTS,
        ));

        let found = report(
            diags,
            "Failed to read Data Lake Store",
            self.refresh(&mut state, &deadline).await,
        )?;
        if found {
            Some((Value::Value(state), private_state))
        } else {
            Some((Value::Null, private_state))
        }
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = match proposed_state {
            Value::Value(state) => state,
            state => return Some((state, Default::default())),
        };
        state.apply_defaults(&config_state.unwrap_or_default());
        state.normalize(diags);

        Some((Value::Value(state), Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<tf_provider::AttributePath>,
    )> {
        let mut state = match proposed_state {
            Value::Value(state) => state,
            state => return Some((state, prior_private_state, Vec::new())),
        };
        state.apply_defaults(&config_state.unwrap_or_default());
        state.normalize(diags);

        let trigger_replace = match &prior_state {
            Value::Value(prior) => state.requires_replace(prior),
            _ => Vec::new(),
        };

        Some((Value::Value(state), prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = planned_state.unwrap_or_default();
        report(
            diags,
            "Failed to create Data Lake Store",
            self.create_account(&mut state).await,
        )?;

        Some((Value::Value(state), private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = planned_state.unwrap_or_default();
        let found = report(
            diags,
            "Failed to update Data Lake Store",
            self.update_account(&mut state).await,
        )?;

        if found {
            Some((Value::Value(state), private_state))
        } else {
            Some((Value::Null, private_state))
        }
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let Value::Value(state) = state else {
            return Some(());
        };
        report(
            diags,
            "Failed to delete Data Lake Store",
            self.delete_account(&state).await,
        )
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let id = match ResourceId::parse_as(&id, DATA_LAKE_STORE_PROVIDER, "accounts") {
            Ok(id) => id,
            Err(err) => {
                diags.root_error("Invalid Data Lake Store ID", err.to_string());
                return None;
            }
        };

        let state = DataLakeStoreState {
            id: Value::Value(Cow::Owned(id.to_string())),
            name: Value::Value(Cow::Owned(id.name().to_string())),
            resource_group_name: Value::Value(Cow::Owned(id.resource_group.clone())),
            timeouts: Value::Value(Default::default()),
            ..Default::default()
        };
        Some((Value::Value(state), Default::default()))
    }
}
