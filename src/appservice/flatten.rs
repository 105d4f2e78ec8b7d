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
use std::collections::BTreeMap;

use tf_provider::value::{Value, ValueList, ValueMap, ValueString};

use crate::helpers::split_addresses;
use crate::utils::{bool_or_false, number_or_zero, single_or_empty, string_list, string_or_empty};

use super::models::{
    AuthSettingsResource, AzureStoragePropertyDictionaryResource, BackupRequestResource,
    ConnectionStringDictionary, IpSecurityRestriction, ManagedServiceIdentity, SiteConfig,
    SiteConfigResource, SiteLogsConfigResource, StringDictionary, User,
};
use super::state::{
    ActiveDirectoryAuthState, ApplicationBlobLogsState, ApplicationLogsState,
    ApplicationStackState, AuthSettingsState, BackupScheduleState, BackupState,
    ConnectionStringState, CorsState, FacebookAuthState, FileSystemLogsState, HttpBlobLogsState,
    HttpLogsState, IdentityState, IpRestrictionState, LogsState, OAuthClientState,
    SiteConfigState, SiteCredentialState, StorageAccountState, TwitterAuthState,
};

/// Settings written by the platform when logging is configured
const PLATFORM_APP_SETTINGS: [&str; 4] = [
    "DIAGNOSTICS_AZUREBLOBCONTAINERSASURL",
    "DIAGNOSTICS_AZUREBLOBRETENTIONINDAYS",
    "WEBSITE_HTTPLOGGING_CONTAINER_URL",
    "WEBSITE_HTTPLOGGING_RETENTION_DAYS",
];

fn owned<'a>(value: String) -> ValueString<'a> {
    Value::Value(Cow::Owned(value))
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty())
}

pub(super) fn string_map<'a, I>(entries: I) -> ValueMap<'a, ValueString<'a>>
where
    I: IntoIterator<Item = (String, String)>,
{
    Value::Value(
        entries
            .into_iter()
            .map(|(key, value)| (Cow::Owned(key), owned(value)))
            .collect(),
    )
}

pub(super) fn flatten_tags<'a>(
    tags: Option<BTreeMap<String, String>>,
) -> ValueMap<'a, ValueString<'a>> {
    string_map(tags.unwrap_or_default())
}

/// Comma separated list, as a string and as an ordered sequence
pub(super) fn flatten_addresses<'a>(
    addresses: Option<String>,
) -> (ValueString<'a>, ValueList<ValueString<'a>>) {
    let addresses = addresses.unwrap_or_default();
    let list = string_list(split_addresses(&addresses));
    (owned(addresses), list)
}

pub(super) fn flatten_app_settings<'a>(settings: StringDictionary) -> ValueMap<'a, ValueString<'a>> {
    string_map(
        settings
            .properties
            .unwrap_or_default()
            .into_iter()
            .filter(|(key, _)| {
                !PLATFORM_APP_SETTINGS
                    .iter()
                    .any(|managed| managed.eq_ignore_ascii_case(key))
            }),
    )
}

/// `key=value` login parameters; a parameter without `=` maps to an empty value
fn login_params<'a>(params: Option<Vec<String>>) -> ValueMap<'a, ValueString<'a>> {
    string_map(params.unwrap_or_default().into_iter().map(|param| {
        match param.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (param, String::new()),
        }
    }))
}

pub(super) fn flatten_auth_settings<'a>(
    auth: AuthSettingsResource,
) -> ValueList<Value<AuthSettingsState<'a>>> {
    single_or_empty(auth.properties.map(|auth| {
        let active_directory = non_empty(&auth.client_id).then(|| ActiveDirectoryAuthState {
            client_id: string_or_empty(auth.client_id),
            client_secret: string_or_empty(auth.client_secret),
            allowed_audiences: string_list(auth.allowed_audiences.unwrap_or_default()),
        });
        let facebook = non_empty(&auth.facebook_app_id).then(|| FacebookAuthState {
            app_id: string_or_empty(auth.facebook_app_id),
            app_secret: string_or_empty(auth.facebook_app_secret),
            oauth_scopes: string_list(auth.facebook_oauth_scopes.unwrap_or_default()),
        });
        let github = non_empty(&auth.github_client_id).then(|| OAuthClientState {
            client_id: string_or_empty(auth.github_client_id),
            client_secret: string_or_empty(auth.github_client_secret),
            oauth_scopes: string_list(auth.github_oauth_scopes.unwrap_or_default()),
        });
        let google = non_empty(&auth.google_client_id).then(|| OAuthClientState {
            client_id: string_or_empty(auth.google_client_id),
            client_secret: string_or_empty(auth.google_client_secret),
            oauth_scopes: string_list(auth.google_oauth_scopes.unwrap_or_default()),
        });
        let microsoft = non_empty(&auth.microsoft_account_client_id).then(|| OAuthClientState {
            client_id: string_or_empty(auth.microsoft_account_client_id),
            client_secret: string_or_empty(auth.microsoft_account_client_secret),
            oauth_scopes: string_list(auth.microsoft_account_oauth_scopes.unwrap_or_default()),
        });
        let twitter = non_empty(&auth.twitter_consumer_key).then(|| TwitterAuthState {
            consumer_key: string_or_empty(auth.twitter_consumer_key),
            consumer_secret: string_or_empty(auth.twitter_consumer_secret),
        });

        AuthSettingsState {
            enabled: bool_or_false(auth.enabled),
            additional_login_params: login_params(auth.additional_login_params),
            allowed_external_redirect_urls: string_list(
                auth.allowed_external_redirect_urls.unwrap_or_default(),
            ),
            default_provider: string_or_empty(auth.default_provider),
            issuer: string_or_empty(auth.issuer),
            runtime_version: string_or_empty(auth.runtime_version),
            token_refresh_extension_hours: Value::Value(
                auth.token_refresh_extension_hours.unwrap_or_default(),
            ),
            token_store_enabled: bool_or_false(auth.token_store_enabled),
            unauthenticated_client_action: string_or_empty(auth.unauthenticated_client_action),
            active_directory: single_or_empty(active_directory),
            facebook: single_or_empty(facebook),
            github: single_or_empty(github),
            google: single_or_empty(google),
            microsoft: single_or_empty(microsoft),
            twitter: single_or_empty(twitter),
        }
    }))
}

pub(super) fn flatten_backup<'a>(
    backup: Option<BackupRequestResource>,
) -> ValueList<Value<BackupState<'a>>> {
    single_or_empty(
        backup
            .and_then(|backup| backup.properties)
            .map(|backup| BackupState {
                name: string_or_empty(backup.backup_name),
                storage_account_url: string_or_empty(backup.storage_account_url),
                enabled: bool_or_false(backup.enabled),
                schedule: single_or_empty(backup.backup_schedule.map(|schedule| {
                    BackupScheduleState {
                        frequency_interval: number_or_zero(schedule.frequency_interval),
                        frequency_unit: string_or_empty(schedule.frequency_unit),
                        keep_at_least_one_backup: bool_or_false(schedule.keep_at_least_one_backup),
                        retention_period_days: number_or_zero(schedule.retention_period_in_days),
                        start_time: string_or_empty(schedule.start_time),
                        last_execution_time: string_or_empty(schedule.last_execution_time),
                    }
                })),
            }),
    )
}

pub(super) fn flatten_identity<'a>(
    identity: Option<ManagedServiceIdentity>,
) -> ValueList<Value<IdentityState<'a>>> {
    let identity = identity.filter(|identity| {
        identity
            .kind
            .as_deref()
            .is_some_and(|kind| !kind.is_empty() && !kind.eq_ignore_ascii_case("None"))
    });
    single_or_empty(identity.map(|identity| IdentityState {
        kind: string_or_empty(identity.kind),
        identity_ids: string_list(identity.user_assigned_identities.unwrap_or_default().into_keys()),
        principal_id: string_or_empty(identity.principal_id),
        tenant_id: string_or_empty(identity.tenant_id),
    }))
}

pub(super) fn flatten_logs<'a>(logs: SiteLogsConfigResource) -> ValueList<Value<LogsState<'a>>> {
    single_or_empty(logs.properties.map(|logs| {
        let application_logs = logs.application_logs.unwrap_or_default();
        let level = application_logs
            .file_system
            .and_then(|file_system| file_system.level)
            .filter(|level| !level.eq_ignore_ascii_case("Off"));
        let application_blob = application_logs
            .azure_blob_storage
            .filter(|blob| non_empty(&blob.sas_url))
            .map(|blob| ApplicationBlobLogsState {
                level: string_or_empty(blob.level),
                sas_url: string_or_empty(blob.sas_url),
                retention_in_days: number_or_zero(blob.retention_in_days),
            });
        let application = (level.is_some() || application_blob.is_some()).then(|| {
            ApplicationLogsState {
                file_system_level: string_or_empty(level),
                azure_blob_storage: single_or_empty(application_blob),
            }
        });

        let http_logs = logs.http_logs.unwrap_or_default();
        let http_file_system = http_logs
            .file_system
            .filter(|file_system| file_system.enabled.unwrap_or_default())
            .map(|file_system| FileSystemLogsState {
                retention_in_days: number_or_zero(file_system.retention_in_days),
                retention_in_mb: number_or_zero(file_system.retention_in_mb),
            });
        let http_blob = http_logs
            .azure_blob_storage
            .filter(|blob| non_empty(&blob.sas_url))
            .map(|blob| HttpBlobLogsState {
                sas_url: string_or_empty(blob.sas_url),
                retention_in_days: number_or_zero(blob.retention_in_days),
            });
        let http = (http_file_system.is_some() || http_blob.is_some()).then(|| HttpLogsState {
            file_system: single_or_empty(http_file_system),
            azure_blob_storage: single_or_empty(http_blob),
        });

        LogsState {
            detailed_error_messages: bool_or_false(
                logs.detailed_error_messages.and_then(|config| config.enabled),
            ),
            failed_request_tracing: bool_or_false(
                logs.failed_requests_tracing.and_then(|config| config.enabled),
            ),
            application_logs: single_or_empty(application),
            http_logs: single_or_empty(http),
        }
    }))
}

/// Decode `linuxFxVersion`, such as `NODE|14-lts` or `DOCKER|nginx:latest`
pub(super) fn decode_application_stack<'a>(
    linux_fx_version: &str,
) -> Option<ApplicationStackState<'a>> {
    let (runtime, version) = linux_fx_version.split_once('|')?;
    let version = version.to_string();
    let mut stack = ApplicationStackState::default();
    match runtime.to_uppercase().as_str() {
        "DOCKER" => {
            // a colon followed by a path belongs to the registry host
            let (image, tag) = version
                .rsplit_once(':')
                .filter(|(_, tag)| !tag.contains('/'))
                .map(|(image, tag)| (image.to_string(), tag.to_string()))
                .unwrap_or_else(|| (version.clone(), String::new()));
            stack.docker_image = owned(image);
            stack.docker_image_tag = owned(tag);
        }
        "DOTNETCORE" | "DOTNET" => stack.dotnet_version = owned(version),
        "JAVA" | "TOMCAT" | "JBOSSEAP" => {
            let (server_version, java_version) = version
                .split_once('-')
                .map(|(server, java)| (server.to_string(), java.to_string()))
                .unwrap_or_else(|| (version.clone(), String::new()));
            stack.java_server = owned(runtime.to_uppercase());
            stack.java_server_version = owned(server_version);
            stack.java_version = owned(java_version);
        }
        "NODE" => stack.node_version = owned(version),
        "PHP" => stack.php_version = owned(version),
        "PYTHON" => stack.python_version = owned(version),
        "RUBY" => stack.ruby_version = owned(version),
        _ => return None,
    }
    Some(stack)
}

fn flatten_ip_restrictions<'a>(
    restrictions: Option<Vec<IpSecurityRestriction>>,
) -> ValueList<Value<IpRestrictionState<'a>>> {
    Value::Value(
        restrictions
            .unwrap_or_default()
            .into_iter()
            .map(|restriction| {
                let service_tag = restriction
                    .tag
                    .as_deref()
                    .is_some_and(|tag| tag.eq_ignore_ascii_case("ServiceTag"));
                let (ip_address, service_tag) = if service_tag {
                    (None, restriction.ip_address)
                } else {
                    (restriction.ip_address, None)
                };
                Value::Value(IpRestrictionState {
                    action: string_or_empty(restriction.action),
                    ip_address: string_or_empty(ip_address),
                    name: string_or_empty(restriction.name),
                    priority: number_or_zero(restriction.priority),
                    service_tag: string_or_empty(service_tag),
                    virtual_network_subnet_id: string_or_empty(restriction.vnet_subnet_resource_id),
                })
            })
            .collect(),
    )
}

fn flatten_site_config_properties<'a>(config: SiteConfig) -> SiteConfigState<'a> {
    let application_stack = config
        .linux_fx_version
        .as_deref()
        .and_then(decode_application_stack);
    SiteConfigState {
        always_on: bool_or_false(config.always_on),
        api_management_api_id: string_or_empty(
            config.api_management_config.and_then(|config| config.id),
        ),
        app_command_line: string_or_empty(config.app_command_line),
        application_stack: single_or_empty(application_stack),
        auto_heal_enabled: bool_or_false(config.auto_heal_enabled),
        container_registry_managed_identity_client_id: string_or_empty(
            config.acr_user_managed_identity_id,
        ),
        container_registry_use_managed_identity: bool_or_false(
            config.acr_use_managed_identity_creds,
        ),
        cors: single_or_empty(config.cors.map(|cors| CorsState {
            allowed_origins: string_list(cors.allowed_origins.unwrap_or_default()),
            support_credentials: bool_or_false(cors.support_credentials),
        })),
        default_documents: string_list(config.default_documents.unwrap_or_default()),
        detailed_error_logging_enabled: bool_or_false(config.detailed_error_logging_enabled),
        ftps_state: string_or_empty(config.ftps_state),
        health_check_path: string_or_empty(config.health_check_path),
        http2_enabled: bool_or_false(config.http2_enabled),
        ip_restriction: flatten_ip_restrictions(config.ip_security_restrictions),
        linux_fx_version: string_or_empty(config.linux_fx_version),
        load_balancing_mode: string_or_empty(config.load_balancing),
        local_mysql_enabled: bool_or_false(config.local_my_sql_enabled),
        managed_pipeline_mode: string_or_empty(config.managed_pipeline_mode),
        minimum_tls_version: string_or_empty(config.min_tls_version),
        remote_debugging_enabled: bool_or_false(config.remote_debugging_enabled),
        remote_debugging_version: string_or_empty(config.remote_debugging_version),
        scm_ip_restriction: flatten_ip_restrictions(config.scm_ip_security_restrictions),
        scm_minimum_tls_version: string_or_empty(config.scm_min_tls_version),
        scm_type: string_or_empty(config.scm_type),
        scm_use_main_ip_restriction: bool_or_false(config.scm_ip_security_restrictions_use_main),
        use_32_bit_worker: bool_or_false(config.use_32_bit_worker_process),
        vnet_route_all_enabled: bool_or_false(config.vnet_route_all_enabled),
        websockets_enabled: bool_or_false(config.web_sockets_enabled),
        worker_count: number_or_zero(config.number_of_workers),
    }
}

pub(super) fn flatten_site_config<'a>(
    config: SiteConfigResource,
) -> ValueList<Value<SiteConfigState<'a>>> {
    single_or_empty(config.properties.map(flatten_site_config_properties))
}

pub(super) fn flatten_storage_accounts<'a>(
    accounts: AzureStoragePropertyDictionaryResource,
) -> ValueList<Value<StorageAccountState<'a>>> {
    Value::Value(
        accounts
            .properties
            .unwrap_or_default()
            .into_iter()
            .map(|(name, account)| {
                Value::Value(StorageAccountState {
                    name: owned(name),
                    kind: string_or_empty(account.kind),
                    account_name: string_or_empty(account.account_name),
                    share_name: string_or_empty(account.share_name),
                    access_key: string_or_empty(account.access_key),
                    mount_path: string_or_empty(account.mount_path),
                })
            })
            .collect(),
    )
}

pub(super) fn flatten_connection_strings<'a>(
    connection_strings: ConnectionStringDictionary,
) -> ValueList<Value<ConnectionStringState<'a>>> {
    Value::Value(
        connection_strings
            .properties
            .unwrap_or_default()
            .into_iter()
            .map(|(name, connection_string)| {
                Value::Value(ConnectionStringState {
                    name: owned(name),
                    kind: string_or_empty(connection_string.kind),
                    value: string_or_empty(connection_string.value),
                })
            })
            .collect(),
    )
}

pub(super) fn flatten_site_credentials<'a>(
    credentials: User,
) -> ValueList<Value<SiteCredentialState<'a>>> {
    single_or_empty(credentials.properties.map(|user| SiteCredentialState {
        name: string_or_empty(user.publishing_user_name),
        password: string_or_empty(user.publishing_password),
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn string(s: &'static str) -> ValueString<'static> {
        Value::Value(Cow::Borrowed(s))
    }

    #[test]
    fn addresses_keep_their_order() {
        let (joined, list) = flatten_addresses(Some("52.1.1.2,52.1.1.1,,52.1.1.3".to_string()));
        assert_eq!(joined, string("52.1.1.2,52.1.1.1,,52.1.1.3"));
        assert_eq!(
            list,
            Value::Value(vec![
                string("52.1.1.2"),
                string("52.1.1.1"),
                string("52.1.1.3")
            ])
        );

        let (joined, list) = flatten_addresses(None);
        assert_eq!(joined, string(""));
        assert_eq!(list, Value::Value(Vec::new()));
    }

    #[test]
    fn platform_app_settings_are_removed() {
        let settings: StringDictionary = serde_json::from_value(json!({
            "properties": {
                "FOO": "bar",
                "WEBSITE_HTTPLOGGING_CONTAINER_URL": "https://logs",
                "diagnostics_azureblobretentionindays": "3"
            }
        }))
        .unwrap();

        let mut expected = BTreeMap::new();
        expected.insert(Cow::Borrowed("FOO"), string("bar"));
        assert_eq!(flatten_app_settings(settings), Value::Value(expected));
    }

    #[test]
    fn login_params_become_a_map() {
        let params = login_params(Some(vec![
            "response_type=code id_token".to_string(),
            "resource=api://app=1".to_string(),
            "prompt".to_string(),
        ]));

        let mut expected = BTreeMap::new();
        expected.insert(Cow::Borrowed("response_type"), string("code id_token"));
        expected.insert(Cow::Borrowed("resource"), string("api://app=1"));
        expected.insert(Cow::Borrowed("prompt"), string(""));
        assert_eq!(params, Value::Value(expected));
    }

    #[test]
    fn decodes_application_stacks() {
        let node = decode_application_stack("NODE|14-lts").unwrap();
        assert_eq!(node.node_version, string("14-lts"));

        let docker = decode_application_stack("DOCKER|myregistry.azurecr.io:443/app:v2").unwrap();
        assert_eq!(docker.docker_image, string("myregistry.azurecr.io:443/app"));
        assert_eq!(docker.docker_image_tag, string("v2"));

        let untagged = decode_application_stack("DOCKER|localhost:5000/app").unwrap();
        assert_eq!(untagged.docker_image, string("localhost:5000/app"));
        assert_eq!(untagged.docker_image_tag, string(""));

        let tomcat = decode_application_stack("TOMCAT|9.0-java11").unwrap();
        assert_eq!(tomcat.java_server, string("TOMCAT"));
        assert_eq!(tomcat.java_server_version, string("9.0"));
        assert_eq!(tomcat.java_version, string("java11"));

        assert!(decode_application_stack("").is_none());
        assert!(decode_application_stack("COBOL|85").is_none());
    }

    #[test]
    fn identity_lists_user_assigned_ids() {
        let identity: ManagedServiceIdentity = serde_json::from_value(json!({
            "type": "SystemAssigned, UserAssigned",
            "principalId": "p0",
            "tenantId": "t0",
            "userAssignedIdentities": {"/id/b": {}, "/id/a": {}}
        }))
        .unwrap();

        let Value::Value(flattened) = flatten_identity(Some(identity)) else {
            panic!("identity should be known");
        };
        let Value::Value(identity) = &flattened[0] else {
            panic!("identity should be known");
        };
        assert_eq!(
            identity.identity_ids,
            Value::Value(vec![string("/id/a"), string("/id/b")])
        );
        assert_eq!(identity.principal_id, string("p0"));

        let none = ManagedServiceIdentity {
            kind: Some("None".to_string()),
            ..Default::default()
        };
        assert_eq!(flatten_identity(Some(none)), Value::Value(Vec::new()));
    }

    #[test]
    fn service_tags_are_not_ip_addresses() {
        let restrictions = flatten_ip_restrictions(Some(vec![IpSecurityRestriction {
            ip_address: Some("AzureFrontDoor.Backend".to_string()),
            tag: Some("ServiceTag".to_string()),
            action: Some("Allow".to_string()),
            priority: Some(200),
            ..Default::default()
        }]));
        let Value::Value(restrictions) = restrictions else {
            panic!("restrictions should be known");
        };
        let Value::Value(restriction) = &restrictions[0] else {
            panic!("restriction should be known");
        };
        assert_eq!(restriction.service_tag, string("AzureFrontDoor.Backend"));
        assert_eq!(restriction.ip_address, string(""));
        assert_eq!(restriction.priority, Value::Value(200));
    }

    #[test]
    fn disabled_logs_are_omitted() {
        let logs: SiteLogsConfigResource = serde_json::from_value(json!({
            "properties": {
                "applicationLogs": {"fileSystem": {"level": "Off"}},
                "httpLogs": {"fileSystem": {"retentionInMb": 35, "enabled": false}},
                "detailedErrorMessages": {"enabled": true}
            }
        }))
        .unwrap();

        let Value::Value(logs) = flatten_logs(logs) else {
            panic!("logs should be known");
        };
        let Value::Value(logs) = &logs[0] else {
            panic!("logs should be known");
        };
        assert_eq!(logs.application_logs, Value::Value(Vec::new()));
        assert_eq!(logs.http_logs, Value::Value(Vec::new()));
        assert_eq!(logs.detailed_error_messages, Value::Value(true));
        assert_eq!(logs.failed_request_tracing, Value::Value(false));
    }
}
