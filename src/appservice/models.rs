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

//! Wire representation of `Microsoft.Web/sites` (api-version 2021-02-01)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
    pub identity: Option<ManagedServiceIdentity>,
    pub properties: Option<SiteProperties>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProperties {
    pub state: Option<String>,
    pub enabled: Option<bool>,
    pub default_host_name: Option<String>,
    pub server_farm_id: Option<String>,
    pub client_affinity_enabled: Option<bool>,
    pub client_cert_enabled: Option<bool>,
    pub client_cert_mode: Option<String>,
    pub https_only: Option<bool>,
    pub custom_domain_verification_id: Option<String>,
    pub outbound_ip_addresses: Option<String>,
    pub possible_outbound_ip_addresses: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedServiceIdentity {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub principal_id: Option<String>,
    pub tenant_id: Option<String>,
    pub user_assigned_identities: Option<BTreeMap<String, UserAssignedIdentity>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentity {
    pub principal_id: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfigResource {
    pub id: Option<String>,
    pub properties: Option<SiteConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub always_on: Option<bool>,
    pub api_management_config: Option<ApiManagementConfig>,
    pub app_command_line: Option<String>,
    pub auto_heal_enabled: Option<bool>,
    pub acr_use_managed_identity_creds: Option<bool>,
    #[serde(rename = "acrUserManagedIdentityID")]
    pub acr_user_managed_identity_id: Option<String>,
    pub cors: Option<CorsSettings>,
    pub default_documents: Option<Vec<String>>,
    pub detailed_error_logging_enabled: Option<bool>,
    pub ftps_state: Option<String>,
    pub health_check_path: Option<String>,
    #[serde(rename = "http20Enabled")]
    pub http2_enabled: Option<bool>,
    pub ip_security_restrictions: Option<Vec<IpSecurityRestriction>>,
    pub scm_ip_security_restrictions: Option<Vec<IpSecurityRestriction>>,
    pub scm_ip_security_restrictions_use_main: Option<bool>,
    pub linux_fx_version: Option<String>,
    pub load_balancing: Option<String>,
    pub local_my_sql_enabled: Option<bool>,
    pub managed_pipeline_mode: Option<String>,
    pub min_tls_version: Option<String>,
    pub scm_min_tls_version: Option<String>,
    pub remote_debugging_enabled: Option<bool>,
    pub remote_debugging_version: Option<String>,
    pub scm_type: Option<String>,
    #[serde(rename = "use32BitWorkerProcess")]
    pub use_32_bit_worker_process: Option<bool>,
    pub vnet_route_all_enabled: Option<bool>,
    pub web_sockets_enabled: Option<bool>,
    pub number_of_workers: Option<i64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiManagementConfig {
    pub id: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsSettings {
    pub allowed_origins: Option<Vec<String>>,
    pub support_credentials: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpSecurityRestriction {
    pub ip_address: Option<String>,
    pub vnet_subnet_resource_id: Option<String>,
    pub action: Option<String>,
    /// `Default`, `XffProxy` or `ServiceTag`; with `ServiceTag` the tag is carried by `ip_address`
    pub tag: Option<String>,
    pub priority: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettingsResource {
    pub id: Option<String>,
    pub properties: Option<AuthSettings>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettings {
    pub enabled: Option<bool>,
    pub runtime_version: Option<String>,
    pub unauthenticated_client_action: Option<String>,
    pub token_store_enabled: Option<bool>,
    pub allowed_external_redirect_urls: Option<Vec<String>>,
    pub default_provider: Option<String>,
    pub token_refresh_extension_hours: Option<f64>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub issuer: Option<String>,
    pub allowed_audiences: Option<Vec<String>>,
    /// `key=value` pairs
    pub additional_login_params: Option<Vec<String>>,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    #[serde(rename = "googleOAuthScopes")]
    pub google_oauth_scopes: Option<Vec<String>>,
    pub facebook_app_id: Option<String>,
    pub facebook_app_secret: Option<String>,
    #[serde(rename = "facebookOAuthScopes")]
    pub facebook_oauth_scopes: Option<Vec<String>>,
    #[serde(rename = "gitHubClientId")]
    pub github_client_id: Option<String>,
    #[serde(rename = "gitHubClientSecret")]
    pub github_client_secret: Option<String>,
    #[serde(rename = "gitHubOAuthScopes")]
    pub github_oauth_scopes: Option<Vec<String>>,
    pub twitter_consumer_key: Option<String>,
    pub twitter_consumer_secret: Option<String>,
    pub microsoft_account_client_id: Option<String>,
    pub microsoft_account_client_secret: Option<String>,
    #[serde(rename = "microsoftAccountOAuthScopes")]
    pub microsoft_account_oauth_scopes: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequestResource {
    pub id: Option<String>,
    pub properties: Option<BackupRequestProperties>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequestProperties {
    pub backup_name: Option<String>,
    pub enabled: Option<bool>,
    pub storage_account_url: Option<String>,
    pub backup_schedule: Option<BackupSchedule>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSchedule {
    pub frequency_interval: Option<i64>,
    /// `Day` or `Hour`
    pub frequency_unit: Option<String>,
    pub keep_at_least_one_backup: Option<bool>,
    pub retention_period_in_days: Option<i64>,
    pub start_time: Option<String>,
    pub last_execution_time: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLogsConfigResource {
    pub id: Option<String>,
    pub properties: Option<SiteLogsConfigProperties>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLogsConfigProperties {
    pub application_logs: Option<ApplicationLogsConfig>,
    pub http_logs: Option<HttpLogsConfig>,
    pub failed_requests_tracing: Option<EnabledConfig>,
    pub detailed_error_messages: Option<EnabledConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationLogsConfig {
    pub file_system: Option<FileSystemApplicationLogsConfig>,
    pub azure_blob_storage: Option<AzureBlobStorageApplicationLogsConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSystemApplicationLogsConfig {
    pub level: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureBlobStorageApplicationLogsConfig {
    pub level: Option<String>,
    pub sas_url: Option<String>,
    pub retention_in_days: Option<i64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpLogsConfig {
    pub file_system: Option<FileSystemHttpLogsConfig>,
    pub azure_blob_storage: Option<AzureBlobStorageHttpLogsConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemHttpLogsConfig {
    pub retention_in_mb: Option<i64>,
    pub retention_in_days: Option<i64>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureBlobStorageHttpLogsConfig {
    pub sas_url: Option<String>,
    pub retention_in_days: Option<i64>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnabledConfig {
    pub enabled: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringDictionary {
    pub properties: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzureStoragePropertyDictionaryResource {
    pub properties: Option<BTreeMap<String, AzureStorageInfoValue>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureStorageInfoValue {
    /// `AzureFiles` or `AzureBlob`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub account_name: Option<String>,
    pub share_name: Option<String>,
    pub access_key: Option<String>,
    pub mount_path: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStringDictionary {
    pub properties: Option<BTreeMap<String, ConnectionStringValue>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStringValue {
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Publishing credentials of a site
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub properties: Option<UserProperties>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProperties {
    pub publishing_user_name: Option<String>,
    pub publishing_password: Option<String>,
}
