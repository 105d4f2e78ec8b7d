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

use async_trait::async_trait;
use tracing::info;

use tf_provider::schema::Schema;
use tf_provider::value::Value;
use tf_provider::{map, AttributePath, Provider};

use crate::appservice::LinuxWebAppDataSource;
use crate::client::{ArmClient, ClientHandle};
use crate::config::ProviderConfig;
use crate::datalake::DataLakeStoreResource;
use crate::utils::{WithSchema, WithValidate};

#[derive(Debug, Default, Clone)]
pub struct AzureProvider {
    client: ClientHandle<ArmClient>,
}

#[async_trait]
impl Provider for AzureProvider {
    type Config<'a> = Value<ProviderConfig<'a>>;
    type MetaState<'a> = tf_provider::value::ValueEmpty;

    fn schema(&self, _diags: &mut tf_provider::Diagnostics) -> Option<Schema> {
        Some(ProviderConfig::schema())
    }

    async fn validate<'a>(
        &self,
        diags: &mut tf_provider::Diagnostics,
        config: Self::Config<'a>,
    ) -> Option<()> {
        if let Value::Value(config) = &config {
            config.validate(diags, AttributePath::default());
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut tf_provider::Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let settings = config
            .unwrap_or_default()
            .resolve(diags, |name| std::env::var(name).ok())?;

        let subscription_id = settings.subscription_id.clone();
        match ArmClient::new(
            settings.environment,
            settings.subscription_id,
            settings.credential,
            settings.poll_interval,
        ) {
            Ok(client) => {
                self.client.set(client).await;
                info!(%subscription_id, %terraform_version, "azurerm provider configured");
                Some(())
            }
            Err(err) => {
                diags.root_error("Failed to build the Azure client", err.to_string());
                None
            }
        }
    }

    fn get_resources(
        &self,
        _diags: &mut tf_provider::Diagnostics,
    ) -> Option<std::collections::HashMap<String, Box<dyn tf_provider::DynamicResource>>>
    {
        Some(map! {
            "data_lake_store" => DataLakeStoreResource::new(self.client.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut tf_provider::Diagnostics,
    ) -> Option<
        std::collections::HashMap<String, Box<dyn tf_provider::DynamicDataSource>>,
    > {
        Some(map! {
            "linux_web_app" => LinuxWebAppDataSource::new(self.client.clone()),
        })
    }
}
