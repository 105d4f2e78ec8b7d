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

//! In-memory stand-in for the management API

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::appservice::models::{
    AuthSettingsResource, AzureStoragePropertyDictionaryResource, BackupRequestResource,
    ConnectionStringDictionary, Site, SiteConfigResource, SiteLogsConfigResource,
    StringDictionary, User,
};
use crate::datalake::models::{
    CreateDataLakeStoreAccountParameters, DataLakeStoreAccount, DataLakeStoreAccountProperties,
    EncryptionConfig, UpdateDataLakeStoreAccountParameters,
};
use crate::id::ResourceId;

use super::{
    ApiError, ArmApi, DataLakeStoreApi, Operation, OperationStatus, WebAppsApi,
};

pub(crate) const SUBSCRIPTION_ID: &str = "00000000-0000-0000-0000-000000000000";

const MUTATING_CALLS: [&str; 3] = ["create_account", "update_account", "delete_account"];

/// Sub-resources of a web app, as served by the fake
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeSite {
    pub site: Site,
    pub configuration: SiteConfigResource,
    pub auth_settings: AuthSettingsResource,
    /// `None` answers NotFound, as for an app that never configured backups
    pub backup: Option<BackupRequestResource>,
    pub logs: SiteLogsConfigResource,
    pub app_settings: StringDictionary,
    pub storage_accounts: AzureStoragePropertyDictionaryResource,
    pub connection_strings: ConnectionStringDictionary,
    pub credentials: User,
}

fn from_json<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

impl FakeSite {
    /// A Node.js app behind a single user-assigned identity
    pub fn sample(resource_group: &str, name: &str) -> Self {
        let id = ResourceId::web_app(SUBSCRIPTION_ID, resource_group, name).to_string();
        Self {
            site: from_json(json!({
                "id": id,
                "name": name,
                "kind": "app,linux",
                "location": "West Europe",
                "tags": {"env": "test"},
                "identity": {
                    "type": "UserAssigned",
                    "userAssignedIdentities": {
                        "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg1/providers/Microsoft.ManagedIdentity/userAssignedIdentities/id1": {
                            "principalId": "p1",
                            "clientId": "c1"
                        }
                    }
                },
                "properties": {
                    "state": "Running",
                    "enabled": true,
                    "defaultHostName": format!("{name}.azurewebsites.net"),
                    "serverFarmId": "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg1/providers/Microsoft.Web/serverfarms/plan1",
                    "clientAffinityEnabled": false,
                    "clientCertEnabled": true,
                    "clientCertMode": "Optional",
                    "httpsOnly": true,
                    "customDomainVerificationId": "ABCDEF",
                    "outboundIpAddresses": "52.1.1.1,52.1.1.2",
                    "possibleOutboundIpAddresses": "52.1.1.1,52.1.1.2,52.1.1.3"
                }
            })),
            configuration: from_json(json!({
                "properties": {
                    "alwaysOn": true,
                    "appCommandLine": "npm start",
                    "linuxFxVersion": "NODE|14-lts",
                    "ftpsState": "Disabled",
                    "http20Enabled": true,
                    "minTlsVersion": "1.2",
                    "scmMinTlsVersion": "1.2",
                    "numberOfWorkers": 1,
                    "defaultDocuments": ["index.html"],
                    "cors": {"allowedOrigins": ["https://example.com"], "supportCredentials": false},
                    "ipSecurityRestrictions": [
                        {"ipAddress": "10.0.0.0/24", "action": "Allow", "priority": 100, "name": "office", "tag": "Default"},
                        {"ipAddress": "AzureFrontDoor.Backend", "action": "Allow", "priority": 200, "name": "frontdoor", "tag": "ServiceTag"}
                    ]
                }
            })),
            auth_settings: from_json(json!({
                "properties": {
                    "enabled": true,
                    "defaultProvider": "AzureActiveDirectory",
                    "clientId": "aad-client",
                    "clientSecret": "aad-secret",
                    "allowedAudiences": ["api://app1"],
                    "additionalLoginParams": ["response_type=code id_token", "resource=api://app1"],
                    "tokenStoreEnabled": true,
                    "tokenRefreshExtensionHours": 72.0
                }
            })),
            backup: Some(from_json(json!({
                "properties": {
                    "backupName": "nightly",
                    "enabled": true,
                    "storageAccountUrl": "https://backups.blob.core.windows.net/app1?sv=sas",
                    "backupSchedule": {
                        "frequencyInterval": 1,
                        "frequencyUnit": "Day",
                        "keepAtLeastOneBackup": true,
                        "retentionPeriodInDays": 30,
                        "startTime": "2021-06-01T00:00:00Z"
                    }
                }
            }))),
            logs: from_json(json!({
                "properties": {
                    "applicationLogs": {"fileSystem": {"level": "Warning"}},
                    "httpLogs": {"fileSystem": {"retentionInMb": 35, "retentionInDays": 7, "enabled": true}},
                    "failedRequestsTracing": {"enabled": false},
                    "detailedErrorMessages": {"enabled": true}
                }
            })),
            app_settings: from_json(json!({
                "properties": {
                    "WEBSITE_NODE_DEFAULT_VERSION": "14",
                    "DIAGNOSTICS_AZUREBLOBCONTAINERSASURL": "https://logs.blob.core.windows.net/?sv=sas",
                    "WEBSITE_HTTPLOGGING_RETENTION_DAYS": "7"
                }
            })),
            storage_accounts: from_json(json!({
                "properties": {
                    "assets": {
                        "type": "AzureFiles",
                        "accountName": "assetsaccount",
                        "shareName": "assets",
                        "accessKey": "key==",
                        "mountPath": "/mnt/assets"
                    }
                }
            })),
            connection_strings: from_json(json!({
                "properties": {
                    "db": {"value": "Server=db;Database=app", "type": "SQLAzure"}
                }
            })),
            credentials: from_json(json!({
                "properties": {"publishingUserName": format!("${name}"), "publishingPassword": "pw"}
            })),
        }
    }
}

#[derive(Debug, Default)]
struct PendingOperation {
    remaining_polls: usize,
    body: Option<serde_json::Value>,
}

#[derive(Debug, Default)]
struct FakeState {
    accounts: BTreeMap<(String, String), DataLakeStoreAccount>,
    sites: BTreeMap<(String, String), FakeSite>,
    operations: BTreeMap<String, PendingOperation>,
    calls: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeArm {
    state: Mutex<FakeState>,
    /// Number of `InProgress` answers before an operation succeeds
    polls: usize,
    failing: BTreeSet<String>,
}

fn key(resource_group: &str, name: &str) -> (String, String) {
    (resource_group.to_lowercase(), name.to_lowercase())
}

impl FakeArm {
    pub fn with_polls(mut self, polls: usize) -> Self {
        self.polls = polls;
        self
    }

    /// Make every call named `call` fail with a remote error
    pub fn failing(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    pub fn with_site(self, resource_group: &str, name: &str, site: FakeSite) -> Self {
        self.lock().sites.insert(key(resource_group, name), site);
        self
    }

    pub fn account(&self, resource_group: &str, name: &str) -> Option<DataLakeStoreAccount> {
        self.lock().accounts.get(&key(resource_group, name)).cloned()
    }

    /// Remove an account behind the back of the definitions
    pub fn remove_account(&self, resource_group: &str, name: &str) {
        self.lock().accounts.remove(&key(resource_group, name));
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| MUTATING_CALLS.contains(&call.as_str()))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Record `call`, failing it if it was scripted to
    fn enter(&self, call: &str) -> Result<MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.lock();
        state.calls.push(call.to_string());
        if self.failing.contains(call) {
            return Err(ApiError::Remote {
                status: 500,
                code: "InternalServerError".to_string(),
                message: format!("{call} failed"),
            });
        }
        Ok(state)
    }

    fn start(
        &self,
        state: &mut FakeState,
        body: Option<serde_json::Value>,
        location: bool,
    ) -> Operation {
        if self.polls == 0 {
            return Operation::Completed(body);
        }
        let url = format!("https://management.azure.com/operations/{}", state.operations.len());
        state.operations.insert(
            url.clone(),
            PendingOperation {
                remaining_polls: self.polls,
                body,
            },
        );
        if location {
            Operation::Location { url }
        } else {
            Operation::AsyncOperation { url, result: None }
        }
    }

    fn site(
        &self,
        call: &str,
        resource_group: &str,
        name: &str,
    ) -> Result<FakeSite, ApiError> {
        self.enter(call)?
            .sites
            .get(&key(resource_group, name))
            .cloned()
            .ok_or(ApiError::NotFound)
    }
}

#[async_trait]
impl ArmApi for FakeArm {
    fn subscription_id(&self) -> &str {
        SUBSCRIPTION_ID
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn poll_operation(&self, operation: &Operation) -> Result<OperationStatus, ApiError> {
        let url = match operation {
            Operation::Completed(body) => return Ok(OperationStatus::Succeeded(body.clone())),
            Operation::AsyncOperation { url, .. } | Operation::Location { url } => url,
        };
        let mut state = self.enter("poll_operation")?;
        let pending = state.operations.get_mut(url).ok_or(ApiError::NotFound)?;
        if pending.remaining_polls <= 1 {
            let body = pending.body.take();
            state.operations.remove(url);
            Ok(OperationStatus::Succeeded(body))
        } else {
            pending.remaining_polls -= 1;
            Ok(OperationStatus::InProgress)
        }
    }
}

#[async_trait]
impl DataLakeStoreApi for FakeArm {
    async fn get_account(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<DataLakeStoreAccount, ApiError> {
        self.enter("get_account")?
            .accounts
            .get(&key(resource_group, name))
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn create_account(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &CreateDataLakeStoreAccountParameters,
    ) -> Result<Operation, ApiError> {
        let mut state = self.enter("create_account")?;
        let properties = &parameters.properties;
        let encryption_state = properties
            .encryption_state
            .clone()
            .unwrap_or_else(|| "Enabled".to_string());
        let encryption_config = if encryption_state.eq_ignore_ascii_case("Enabled") {
            Some(properties.encryption_config.clone().unwrap_or(EncryptionConfig {
                kind: Some("ServiceManaged".to_string()),
            }))
        } else {
            None
        };
        let tier = properties
            .new_tier
            .clone()
            .unwrap_or_else(|| "Consumption".to_string());

        let account = DataLakeStoreAccount {
            id: Some(ResourceId::data_lake_store(SUBSCRIPTION_ID, resource_group, name).to_string()),
            name: Some(name.to_string()),
            location: Some(parameters.location.clone()),
            tags: parameters.tags.clone(),
            properties: Some(DataLakeStoreAccountProperties {
                provisioning_state: Some("Succeeded".to_string()),
                current_tier: Some(tier.clone()),
                new_tier: Some(tier),
                encryption_state: Some(encryption_state),
                encryption_config,
                firewall_state: properties
                    .firewall_state
                    .clone()
                    .or_else(|| Some("Disabled".to_string())),
                firewall_allow_azure_ips: properties
                    .firewall_allow_azure_ips
                    .clone()
                    .or_else(|| Some("Disabled".to_string())),
                endpoint: Some(format!("{name}.azuredatalakestore.net")),
            }),
        };
        state.accounts.insert(key(resource_group, name), account);
        Ok(self.start(&mut state, None, false))
    }

    async fn update_account(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &UpdateDataLakeStoreAccountParameters,
    ) -> Result<Operation, ApiError> {
        let mut state = self.enter("update_account")?;
        let account = state
            .accounts
            .get_mut(&key(resource_group, name))
            .ok_or(ApiError::NotFound)?;
        if let Some(tags) = &parameters.tags {
            account.tags = Some(tags.clone());
        }
        let properties = account.properties.get_or_insert_with(Default::default);
        let update = &parameters.properties;
        if let Some(tier) = &update.new_tier {
            properties.new_tier = Some(tier.clone());
            properties.current_tier = Some(tier.clone());
        }
        if let Some(firewall_state) = &update.firewall_state {
            properties.firewall_state = Some(firewall_state.clone());
        }
        if let Some(allow) = &update.firewall_allow_azure_ips {
            properties.firewall_allow_azure_ips = Some(allow.clone());
        }
        Ok(self.start(&mut state, None, false))
    }

    async fn delete_account(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<Operation, ApiError> {
        let mut state = self.enter("delete_account")?;
        state
            .accounts
            .remove(&key(resource_group, name))
            .ok_or(ApiError::NotFound)?;
        Ok(self.start(&mut state, None, false))
    }
}

#[async_trait]
impl WebAppsApi for FakeArm {
    async fn get_site(&self, resource_group: &str, name: &str) -> Result<Site, ApiError> {
        Ok(self.site("get_site", resource_group, name)?.site)
    }

    async fn get_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteConfigResource, ApiError> {
        Ok(self
            .site("get_configuration", resource_group, name)?
            .configuration)
    }

    async fn get_auth_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<AuthSettingsResource, ApiError> {
        Ok(self
            .site("get_auth_settings", resource_group, name)?
            .auth_settings)
    }

    async fn get_backup_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<BackupRequestResource, ApiError> {
        self.site("get_backup_configuration", resource_group, name)?
            .backup
            .ok_or(ApiError::NotFound)
    }

    async fn get_diagnostic_logs_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteLogsConfigResource, ApiError> {
        Ok(self
            .site("get_diagnostic_logs_configuration", resource_group, name)?
            .logs)
    }

    async fn list_application_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<StringDictionary, ApiError> {
        Ok(self
            .site("list_application_settings", resource_group, name)?
            .app_settings)
    }

    async fn list_azure_storage_accounts(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<AzureStoragePropertyDictionaryResource, ApiError> {
        Ok(self
            .site("list_azure_storage_accounts", resource_group, name)?
            .storage_accounts)
    }

    async fn list_connection_strings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ConnectionStringDictionary, ApiError> {
        Ok(self
            .site("list_connection_strings", resource_group, name)?
            .connection_strings)
    }

    async fn list_publishing_credentials(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<Operation, ApiError> {
        let credentials = self
            .site("list_publishing_credentials", resource_group, name)?
            .credentials;
        let body = serde_json::to_value(credentials)?;
        let mut state = self.lock();
        Ok(self.start(&mut state, Some(body), true))
    }
}
