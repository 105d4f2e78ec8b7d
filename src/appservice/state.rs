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

use serde::{Deserialize, Serialize};
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::{Value, ValueBool, ValueList, ValueMap, ValueNumber, ValueString};
use tf_provider::map;

use crate::utils::WithSchema;

pub type ValueFloat = Value<f64>;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinuxWebAppDataSourceState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub resource_group_name: ValueString<'a>,
    pub location: ValueString<'a>,
    pub kind: ValueString<'a>,
    pub service_plan_id: ValueString<'a>,
    pub app_settings: ValueMap<'a, ValueString<'a>>,
    pub auth_settings: ValueList<Value<AuthSettingsState<'a>>>,
    pub backup: ValueList<Value<BackupState<'a>>>,
    pub client_affinity_enabled: ValueBool,
    pub client_cert_enabled: ValueBool,
    pub client_cert_mode: ValueString<'a>,
    pub connection_string: ValueList<Value<ConnectionStringState<'a>>>,
    pub custom_domain_verification_id: ValueString<'a>,
    pub default_hostname: ValueString<'a>,
    pub enabled: ValueBool,
    pub https_only: ValueBool,
    pub identity: ValueList<Value<IdentityState<'a>>>,
    pub logs: ValueList<Value<LogsState<'a>>>,
    pub outbound_ip_addresses: ValueString<'a>,
    pub outbound_ip_address_list: ValueList<ValueString<'a>>,
    pub possible_outbound_ip_addresses: ValueString<'a>,
    pub possible_outbound_ip_address_list: ValueList<ValueString<'a>>,
    pub site_config: ValueList<Value<SiteConfigState<'a>>>,
    pub site_credential: ValueList<Value<SiteCredentialState<'a>>>,
    pub storage_account: ValueList<Value<StorageAccountState<'a>>>,
    pub tags: ValueMap<'a, ValueString<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSettingsState<'a> {
    pub enabled: ValueBool,
    pub additional_login_params: ValueMap<'a, ValueString<'a>>,
    pub allowed_external_redirect_urls: ValueList<ValueString<'a>>,
    pub default_provider: ValueString<'a>,
    pub issuer: ValueString<'a>,
    pub runtime_version: ValueString<'a>,
    pub token_refresh_extension_hours: ValueFloat,
    pub token_store_enabled: ValueBool,
    pub unauthenticated_client_action: ValueString<'a>,
    pub active_directory: ValueList<Value<ActiveDirectoryAuthState<'a>>>,
    pub facebook: ValueList<Value<FacebookAuthState<'a>>>,
    pub github: ValueList<Value<OAuthClientState<'a>>>,
    pub google: ValueList<Value<OAuthClientState<'a>>>,
    pub microsoft: ValueList<Value<OAuthClientState<'a>>>,
    pub twitter: ValueList<Value<TwitterAuthState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDirectoryAuthState<'a> {
    pub client_id: ValueString<'a>,
    pub client_secret: ValueString<'a>,
    pub allowed_audiences: ValueList<ValueString<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacebookAuthState<'a> {
    pub app_id: ValueString<'a>,
    pub app_secret: ValueString<'a>,
    pub oauth_scopes: ValueList<ValueString<'a>>,
}

/// GitHub, Google and Microsoft share the same client settings
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthClientState<'a> {
    pub client_id: ValueString<'a>,
    pub client_secret: ValueString<'a>,
    pub oauth_scopes: ValueList<ValueString<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterAuthState<'a> {
    pub consumer_key: ValueString<'a>,
    pub consumer_secret: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupState<'a> {
    pub name: ValueString<'a>,
    pub storage_account_url: ValueString<'a>,
    pub enabled: ValueBool,
    pub schedule: ValueList<Value<BackupScheduleState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupScheduleState<'a> {
    pub frequency_interval: ValueNumber,
    pub frequency_unit: ValueString<'a>,
    pub keep_at_least_one_backup: ValueBool,
    pub retention_period_days: ValueNumber,
    pub start_time: ValueString<'a>,
    pub last_execution_time: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStringState<'a> {
    pub name: ValueString<'a>,
    #[serde(rename = "type")]
    pub kind: ValueString<'a>,
    pub value: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityState<'a> {
    #[serde(rename = "type")]
    pub kind: ValueString<'a>,
    pub identity_ids: ValueList<ValueString<'a>>,
    pub principal_id: ValueString<'a>,
    pub tenant_id: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsState<'a> {
    pub detailed_error_messages: ValueBool,
    pub failed_request_tracing: ValueBool,
    pub application_logs: ValueList<Value<ApplicationLogsState<'a>>>,
    pub http_logs: ValueList<Value<HttpLogsState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLogsState<'a> {
    pub file_system_level: ValueString<'a>,
    pub azure_blob_storage: ValueList<Value<ApplicationBlobLogsState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationBlobLogsState<'a> {
    pub level: ValueString<'a>,
    pub sas_url: ValueString<'a>,
    pub retention_in_days: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpLogsState<'a> {
    pub file_system: ValueList<Value<FileSystemLogsState>>,
    pub azure_blob_storage: ValueList<Value<HttpBlobLogsState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSystemLogsState {
    pub retention_in_days: ValueNumber,
    pub retention_in_mb: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpBlobLogsState<'a> {
    pub sas_url: ValueString<'a>,
    pub retention_in_days: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfigState<'a> {
    pub always_on: ValueBool,
    pub api_management_api_id: ValueString<'a>,
    pub app_command_line: ValueString<'a>,
    pub application_stack: ValueList<Value<ApplicationStackState<'a>>>,
    pub auto_heal_enabled: ValueBool,
    pub container_registry_managed_identity_client_id: ValueString<'a>,
    pub container_registry_use_managed_identity: ValueBool,
    pub cors: ValueList<Value<CorsState<'a>>>,
    pub default_documents: ValueList<ValueString<'a>>,
    pub detailed_error_logging_enabled: ValueBool,
    pub ftps_state: ValueString<'a>,
    pub health_check_path: ValueString<'a>,
    pub http2_enabled: ValueBool,
    pub ip_restriction: ValueList<Value<IpRestrictionState<'a>>>,
    pub linux_fx_version: ValueString<'a>,
    pub load_balancing_mode: ValueString<'a>,
    pub local_mysql_enabled: ValueBool,
    pub managed_pipeline_mode: ValueString<'a>,
    pub minimum_tls_version: ValueString<'a>,
    pub remote_debugging_enabled: ValueBool,
    pub remote_debugging_version: ValueString<'a>,
    pub scm_ip_restriction: ValueList<Value<IpRestrictionState<'a>>>,
    pub scm_minimum_tls_version: ValueString<'a>,
    pub scm_type: ValueString<'a>,
    pub scm_use_main_ip_restriction: ValueBool,
    pub use_32_bit_worker: ValueBool,
    pub vnet_route_all_enabled: ValueBool,
    pub websockets_enabled: ValueBool,
    pub worker_count: ValueNumber,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationStackState<'a> {
    pub docker_image: ValueString<'a>,
    pub docker_image_tag: ValueString<'a>,
    pub dotnet_version: ValueString<'a>,
    pub java_server: ValueString<'a>,
    pub java_server_version: ValueString<'a>,
    pub java_version: ValueString<'a>,
    pub node_version: ValueString<'a>,
    pub php_version: ValueString<'a>,
    pub python_version: ValueString<'a>,
    pub ruby_version: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsState<'a> {
    pub allowed_origins: ValueList<ValueString<'a>>,
    pub support_credentials: ValueBool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpRestrictionState<'a> {
    pub action: ValueString<'a>,
    pub ip_address: ValueString<'a>,
    pub name: ValueString<'a>,
    pub priority: ValueNumber,
    pub service_tag: ValueString<'a>,
    pub virtual_network_subnet_id: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteCredentialState<'a> {
    pub name: ValueString<'a>,
    pub password: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageAccountState<'a> {
    pub name: ValueString<'a>,
    #[serde(rename = "type")]
    pub kind: ValueString<'a>,
    pub account_name: ValueString<'a>,
    pub share_name: ValueString<'a>,
    pub access_key: ValueString<'a>,
    pub mount_path: ValueString<'a>,
}

fn list_of(attr_type: AttributeType) -> AttributeType {
    AttributeType::List(Box::new(attr_type))
}

fn strings() -> AttributeType {
    list_of(AttributeType::String)
}

fn string_map() -> AttributeType {
    AttributeType::Map(Box::new(AttributeType::String))
}

fn ip_restriction_type() -> AttributeType {
    list_of(AttributeType::Object(map! {
        "action" => AttributeType::String,
        "ip_address" => AttributeType::String,
        "name" => AttributeType::String,
        "priority" => AttributeType::Number,
        "service_tag" => AttributeType::String,
        "virtual_network_subnet_id" => AttributeType::String,
    }))
}

fn oauth_client_type() -> AttributeType {
    list_of(AttributeType::Object(map! {
        "client_id" => AttributeType::String,
        "client_secret" => AttributeType::String,
        "oauth_scopes" => strings(),
    }))
}

fn auth_settings_type() -> AttributeType {
    list_of(AttributeType::Object(map! {
        "enabled" => AttributeType::Bool,
        "additional_login_params" => string_map(),
        "allowed_external_redirect_urls" => strings(),
        "default_provider" => AttributeType::String,
        "issuer" => AttributeType::String,
        "runtime_version" => AttributeType::String,
        "token_refresh_extension_hours" => AttributeType::Number,
        "token_store_enabled" => AttributeType::Bool,
        "unauthenticated_client_action" => AttributeType::String,
        "active_directory" => list_of(AttributeType::Object(map! {
            "client_id" => AttributeType::String,
            "client_secret" => AttributeType::String,
            "allowed_audiences" => strings(),
        })),
        "facebook" => list_of(AttributeType::Object(map! {
            "app_id" => AttributeType::String,
            "app_secret" => AttributeType::String,
            "oauth_scopes" => strings(),
        })),
        "github" => oauth_client_type(),
        "google" => oauth_client_type(),
        "microsoft" => oauth_client_type(),
        "twitter" => list_of(AttributeType::Object(map! {
            "consumer_key" => AttributeType::String,
            "consumer_secret" => AttributeType::String,
        })),
    }))
}

fn backup_type() -> AttributeType {
    list_of(AttributeType::Object(map! {
        "name" => AttributeType::String,
        "storage_account_url" => AttributeType::String,
        "enabled" => AttributeType::Bool,
        "schedule" => list_of(AttributeType::Object(map! {
            "frequency_interval" => AttributeType::Number,
            "frequency_unit" => AttributeType::String,
            "keep_at_least_one_backup" => AttributeType::Bool,
            "retention_period_days" => AttributeType::Number,
            "start_time" => AttributeType::String,
            "last_execution_time" => AttributeType::String,
        })),
    }))
}

fn logs_type() -> AttributeType {
    list_of(AttributeType::Object(map! {
        "detailed_error_messages" => AttributeType::Bool,
        "failed_request_tracing" => AttributeType::Bool,
        "application_logs" => list_of(AttributeType::Object(map! {
            "file_system_level" => AttributeType::String,
            "azure_blob_storage" => list_of(AttributeType::Object(map! {
                "level" => AttributeType::String,
                "sas_url" => AttributeType::String,
                "retention_in_days" => AttributeType::Number,
            })),
        })),
        "http_logs" => list_of(AttributeType::Object(map! {
            "file_system" => list_of(AttributeType::Object(map! {
                "retention_in_days" => AttributeType::Number,
                "retention_in_mb" => AttributeType::Number,
            })),
            "azure_blob_storage" => list_of(AttributeType::Object(map! {
                "sas_url" => AttributeType::String,
                "retention_in_days" => AttributeType::Number,
            })),
        })),
    }))
}

fn site_config_type() -> AttributeType {
    list_of(AttributeType::Object(map! {
        "always_on" => AttributeType::Bool,
        "api_management_api_id" => AttributeType::String,
        "app_command_line" => AttributeType::String,
        "application_stack" => list_of(AttributeType::Object(map! {
            "docker_image" => AttributeType::String,
            "docker_image_tag" => AttributeType::String,
            "dotnet_version" => AttributeType::String,
            "java_server" => AttributeType::String,
            "java_server_version" => AttributeType::String,
            "java_version" => AttributeType::String,
            "node_version" => AttributeType::String,
            "php_version" => AttributeType::String,
            "python_version" => AttributeType::String,
            "ruby_version" => AttributeType::String,
        })),
        "auto_heal_enabled" => AttributeType::Bool,
        "container_registry_managed_identity_client_id" => AttributeType::String,
        "container_registry_use_managed_identity" => AttributeType::Bool,
        "cors" => list_of(AttributeType::Object(map! {
            "allowed_origins" => strings(),
            "support_credentials" => AttributeType::Bool,
        })),
        "default_documents" => strings(),
        "detailed_error_logging_enabled" => AttributeType::Bool,
        "ftps_state" => AttributeType::String,
        "health_check_path" => AttributeType::String,
        "http2_enabled" => AttributeType::Bool,
        "ip_restriction" => ip_restriction_type(),
        "linux_fx_version" => AttributeType::String,
        "load_balancing_mode" => AttributeType::String,
        "local_mysql_enabled" => AttributeType::Bool,
        "managed_pipeline_mode" => AttributeType::String,
        "minimum_tls_version" => AttributeType::String,
        "remote_debugging_enabled" => AttributeType::Bool,
        "remote_debugging_version" => AttributeType::String,
        "scm_ip_restriction" => ip_restriction_type(),
        "scm_minimum_tls_version" => AttributeType::String,
        "scm_type" => AttributeType::String,
        "scm_use_main_ip_restriction" => AttributeType::Bool,
        "use_32_bit_worker" => AttributeType::Bool,
        "vnet_route_all_enabled" => AttributeType::Bool,
        "websockets_enabled" => AttributeType::Bool,
        "worker_count" => AttributeType::Number,
    }))
}

fn computed(attr_type: AttributeType, description: &str) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint: AttributeConstraint::Computed,
        ..Default::default()
    }
}

fn computed_sensitive(attr_type: AttributeType, description: &str) -> Attribute {
    Attribute {
        sensitive: true,
        ..computed(attr_type, description)
    }
}

impl<'a> WithSchema for LinuxWebAppDataSourceState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => computed(AttributeType::String, "Resource Manager ID of the web app"),
                    "name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Name of the Linux Web App"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "resource_group_name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Resource group holding the web app"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "location" => computed(AttributeType::String, "Azure region of the web app"),
                    "kind" => computed(AttributeType::String, "Kind of site"),
                    "service_plan_id" => computed(AttributeType::String, "ID of the App Service Plan hosting the app"),
                    "app_settings" => computed(string_map(), "Application settings, without the platform-managed ones"),
                    "auth_settings" => computed_sensitive(auth_settings_type(), "Authentication settings"),
                    "backup" => computed_sensitive(backup_type(), "Backup configuration"),
                    "client_affinity_enabled" => computed(AttributeType::Bool, "Whether session affinity cookies are issued"),
                    "client_cert_enabled" => computed(AttributeType::Bool, "Whether client certificates are requested"),
                    "client_cert_mode" => computed(AttributeType::String, "Client certificate mode"),
                    "connection_string" => computed_sensitive(list_of(AttributeType::Object(map! {
                        "name" => AttributeType::String,
                        "type" => AttributeType::String,
                        "value" => AttributeType::String,
                    })), "Connection strings"),
                    "custom_domain_verification_id" => computed(AttributeType::String, "Identifier used to verify custom domains"),
                    "default_hostname" => computed(AttributeType::String, "Default host name of the app"),
                    "enabled" => computed(AttributeType::Bool, "Whether the app is enabled"),
                    "https_only" => computed(AttributeType::Bool, "Whether only HTTPS requests are accepted"),
                    "identity" => computed(list_of(AttributeType::Object(map! {
                        "type" => AttributeType::String,
                        "identity_ids" => strings(),
                        "principal_id" => AttributeType::String,
                        "tenant_id" => AttributeType::String,
                    })), "Managed identity of the app"),
                    "logs" => computed_sensitive(logs_type(), "Diagnostic logs configuration"),
                    "outbound_ip_addresses" => computed(AttributeType::String, "Comma separated outbound IP addresses"),
                    "outbound_ip_address_list" => computed(strings(), "Outbound IP addresses"),
                    "possible_outbound_ip_addresses" => computed(AttributeType::String, "Comma separated possible outbound IP addresses"),
                    "possible_outbound_ip_address_list" => computed(strings(), "Possible outbound IP addresses"),
                    "site_config" => computed(site_config_type(), "Site configuration"),
                    "site_credential" => computed_sensitive(list_of(AttributeType::Object(map! {
                        "name" => AttributeType::String,
                        "password" => AttributeType::String,
                    })), "Publishing credentials"),
                    "storage_account" => computed_sensitive(list_of(AttributeType::Object(map! {
                        "name" => AttributeType::String,
                        "type" => AttributeType::String,
                        "account_name" => AttributeType::String,
                        "share_name" => AttributeType::String,
                        "access_key" => AttributeType::String,
                        "mount_path" => AttributeType::String,
                    })), "Storage accounts mounted in the app"),
                    "tags" => computed(string_map(), "Tags assigned to the web app"),
                },
                description: Description::plain("Looks up an existing Linux Web App"),
                ..Default::default()
            },
        }
    }
}
