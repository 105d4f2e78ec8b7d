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
use tf_provider::value::Value;
use tracing::debug;

use crate::client::{wait_for_completion, ApiError, Deadline, WebAppsApi};
use crate::id::ResourceId;
use crate::utils::{bool_or_false, string_or_empty};

use super::flatten::{
    flatten_addresses, flatten_app_settings, flatten_auth_settings, flatten_backup,
    flatten_connection_strings, flatten_identity, flatten_logs, flatten_site_config,
    flatten_site_credentials, flatten_storage_accounts, flatten_tags,
};
use super::models::User;
use super::state::LinuxWebAppDataSourceState;

impl<'a> LinuxWebAppDataSourceState<'a> {
    /// Fetch the web app designated by `name` and `resource_group_name` with all its sub-resources
    pub(super) async fn read<A>(&mut self, api: &A, deadline: &Deadline) -> anyhow::Result<()>
    where
        A: WebAppsApi + ?Sized,
    {
        let id = ResourceId::web_app(
            api.subscription_id(),
            self.resource_group_name.as_str(),
            self.name.as_str(),
        );
        let (resource_group, name) = (id.resource_group.as_str(), id.name());

        let site = match deadline.run(api.get_site(resource_group, name)).await {
            Ok(site) => site,
            Err(ApiError::NotFound) => return Err(anyhow!("Linux Web App with {id} not found")),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("checking for presence of existing Linux Web App with {id}")
                })
            }
        };

        let site_config = deadline
            .run(api.get_configuration(resource_group, name))
            .await
            .with_context(|| format!("reading Site Config for Linux Web App {id}"))?;
        let auth_settings = deadline
            .run(api.get_auth_settings(resource_group, name))
            .await
            .with_context(|| format!("reading Auth Settings for Linux Web App {id}"))?;
        let backup = match deadline
            .run(api.get_backup_configuration(resource_group, name))
            .await
        {
            Ok(backup) => Some(backup),
            Err(ApiError::NotFound) => {
                debug!(id = %id, "no backup configured");
                None
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading Backup Settings for Linux Web App {id}"))
            }
        };
        let logs = deadline
            .run(api.get_diagnostic_logs_configuration(resource_group, name))
            .await
            .with_context(|| {
                format!("reading Diagnostic Logs information for Linux Web App {id}")
            })?;
        let app_settings = deadline
            .run(api.list_application_settings(resource_group, name))
            .await
            .with_context(|| format!("reading App Settings for Linux Web App {id}"))?;
        let storage_accounts = deadline
            .run(api.list_azure_storage_accounts(resource_group, name))
            .await
            .with_context(|| {
                format!("reading Storage Account information for Linux Web App {id}")
            })?;
        let connection_strings = deadline
            .run(api.list_connection_strings(resource_group, name))
            .await
            .with_context(|| {
                format!("reading Connection String information for Linux Web App {id}")
            })?;

        let operation = deadline
            .run(api.list_publishing_credentials(resource_group, name))
            .await
            .with_context(|| {
                format!("listing Site Publishing Credential information for Linux Web App {id}")
            })?;
        let body = wait_for_completion(api, operation, deadline)
            .await
            .with_context(|| {
                format!(
                    "waiting for Site Publishing Credential information for Linux Web App {id}"
                )
            })?
            .ok_or_else(|| {
                anyhow!("no Site Publishing Credential information returned for Linux Web App {id}")
            })?;
        let credentials: User = serde_json::from_value(body)
            .map_err(ApiError::from)
            .with_context(|| {
                format!("reading Site Publishing Credential information for Linux Web App {id}")
            })?;

        self.id = Value::Value(Cow::Owned(id.to_string()));
        self.kind = string_or_empty(site.kind);
        self.location = string_or_empty(
            site.location
                .as_deref()
                .map(crate::helpers::normalize_location),
        );
        self.tags = flatten_tags(site.tags);

        let properties = site.properties.unwrap_or_default();
        self.client_affinity_enabled = bool_or_false(properties.client_affinity_enabled);
        self.client_cert_enabled = bool_or_false(properties.client_cert_enabled);
        self.client_cert_mode = string_or_empty(properties.client_cert_mode);
        self.custom_domain_verification_id =
            string_or_empty(properties.custom_domain_verification_id);
        self.default_hostname = string_or_empty(properties.default_host_name);
        self.enabled = bool_or_false(properties.enabled);
        self.https_only = bool_or_false(properties.https_only);
        self.service_plan_id = string_or_empty(properties.server_farm_id);
        (self.outbound_ip_addresses, self.outbound_ip_address_list) =
            flatten_addresses(properties.outbound_ip_addresses);
        (
            self.possible_outbound_ip_addresses,
            self.possible_outbound_ip_address_list,
        ) = flatten_addresses(properties.possible_outbound_ip_addresses);

        self.app_settings = flatten_app_settings(app_settings);
        self.auth_settings = flatten_auth_settings(auth_settings);
        self.backup = flatten_backup(backup);
        self.identity = flatten_identity(site.identity);
        self.logs = flatten_logs(logs);
        self.site_config = flatten_site_config(site_config);
        self.storage_account = flatten_storage_accounts(storage_accounts);
        self.connection_string = flatten_connection_strings(connection_strings);
        self.site_credential = flatten_site_credentials(credentials);

        Ok(())
    }
}
