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

use async_trait::async_trait;
use reqwest::{header, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::appservice::models::{
    AuthSettingsResource, AzureStoragePropertyDictionaryResource, BackupRequestResource,
    ConnectionStringDictionary, Site, SiteConfigResource, SiteLogsConfigResource,
    StringDictionary,
};
use crate::datalake::models::{
    CreateDataLakeStoreAccountParameters, DataLakeStoreAccount,
    UpdateDataLakeStoreAccountParameters,
};
use crate::id::ResourceId;

use super::{ApiError, ArmApi, DataLakeStoreApi, Operation, OperationStatus, WebAppsApi};

const DATA_LAKE_STORE_API_VERSION: &str = "2016-11-01";
const WEB_APPS_API_VERSION: &str = "2021-02-01";
const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";

/// Tokens are renewed that long before they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Login and management endpoints of an Azure cloud
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudEnvironment {
    pub authority: String,
    pub resource_manager: String,
}

impl CloudEnvironment {
    pub const NAMES: [&'static str; 3] = ["public", "usgovernment", "china"];

    pub fn from_name(name: &str) -> Option<Self> {
        let (authority, resource_manager) = match name.to_ascii_lowercase().as_str() {
            "" | "public" => (
                "https://login.microsoftonline.com",
                "https://management.azure.com",
            ),
            "usgovernment" => (
                "https://login.microsoftonline.us",
                "https://management.usgovcloudapi.net",
            ),
            "china" => (
                "https://login.chinacloudapi.cn",
                "https://management.chinacloudapi.cn",
            ),
            _ => return None,
        };
        Some(Self {
            authority: authority.to_string(),
            resource_manager: resource_manager.to_string(),
        })
    }
}

impl Default for CloudEnvironment {
    fn default() -> Self {
        Self {
            authority: "https://login.microsoftonline.com".to_string(),
            resource_manager: "https://management.azure.com".to_string(),
        }
    }
}

/// Service principal authenticating with a client secret
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecretCredential {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3599
}

#[derive(Debug)]
struct AccessToken {
    secret: String,
    expires_at: Instant,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct AsyncOperationStatus {
    status: String,
    error: Option<ErrorBody>,
}

/// Azure Resource Manager client over HTTPS
#[derive(Debug)]
pub struct ArmClient {
    http: reqwest::Client,
    environment: CloudEnvironment,
    subscription_id: String,
    credential: ClientSecretCredential,
    poll_interval: Duration,
    token: RwLock<Option<AccessToken>>,
}

impl ArmClient {
    pub fn new(
        environment: CloudEnvironment,
        subscription_id: String,
        credential: ClientSecretCredential,
        poll_interval: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("terraform-provider-azurerm/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            environment,
            subscription_id,
            credential,
            poll_interval,
            token: RwLock::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, ApiError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
                return Ok(token.secret.clone());
            }
        }

        let mut slot = self.token.write().await;
        if let Some(token) = slot.as_ref() {
            if token.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
                return Ok(token.secret.clone());
            }
        }

        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.environment.authority.trim_end_matches('/'),
            self.credential.tenant_id
        );
        let scope = format!(
            "{}/.default",
            self.environment.resource_manager.trim_end_matches('/')
        );
        debug!(tenant = %self.credential.tenant_id, "requesting management access token");
        let response = self
            .http
            .post(url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credential.client_id.as_str()),
                ("client_secret", self.credential.client_secret.as_str()),
                ("scope", scope.as_str()),
            ])
            .send()
            .await?;
        let token: TokenResponse = check_status(response).await?.json().await?;

        let secret = token.access_token;
        *slot = Some(AccessToken {
            secret: secret.clone(),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(secret)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.environment.resource_manager.trim_end_matches('/'),
            path
        )
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        api_version: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let token = self.access_token().await?;
        debug!(%method, path, api_version, "calling resource manager");
        let mut request = self
            .http
            .request(method, self.url(path))
            .query(&[("api-version", api_version)])
            .bearer_auth(token);
        request = match body {
            Some(body) => request.json(body),
            // list operations are POSTs without payload
            None => request.header(header::CONTENT_LENGTH, 0),
        };
        check_status(request.send().await?).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .send::<()>(Method::GET, path, api_version, None)
            .await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .send::<()>(Method::POST, path, api_version, None)
            .await?;
        Ok(response.json().await?)
    }

    async fn start<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        api_version: &str,
        body: Option<&B>,
    ) -> Result<Operation, ApiError> {
        let response = self.send(method, path, api_version, body).await?;
        let status = response.status();
        let headers = response.headers();

        let async_operation = header_value(headers, AZURE_ASYNC_OPERATION);
        let location = header_value(headers, header::LOCATION.as_str());
        match (async_operation, location) {
            (Some(url), result) if status != StatusCode::NO_CONTENT => {
                Ok(Operation::AsyncOperation { url, result })
            }
            (None, Some(url)) if status == StatusCode::ACCEPTED => Ok(Operation::Location { url }),
            _ => Ok(Operation::Completed(body_of(response).await?)),
        }
    }

    async fn poll_url(&self, url: &str) -> Result<Response, ApiError> {
        let token = self.access_token().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        check_status(response).await
    }

    fn data_lake_store_path(&self, resource_group: &str, name: &str) -> String {
        ResourceId::data_lake_store(&self.subscription_id, resource_group, name).to_string()
    }

    fn site_path(&self, resource_group: &str, name: &str, suffix: &str) -> String {
        format!(
            "{}{}",
            ResourceId::web_app(&self.subscription_id, resource_group, name),
            suffix
        )
    }
}

fn header_value(headers: &header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

async fn body_of(response: Response) -> Result<Option<serde_json::Value>, ApiError> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        Ok(None)
    } else {
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

/// Turn non-success statuses into typed errors
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ErrorEnvelope>(&text)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| ErrorBody {
            code: String::new(),
            message: text,
        });
    Err(ApiError::Remote {
        status: status.as_u16(),
        code: body.code,
        message: body.message,
    })
}

#[async_trait]
impl ArmApi for ArmClient {
    fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    async fn poll_operation(&self, operation: &Operation) -> Result<OperationStatus, ApiError> {
        match operation {
            Operation::Completed(body) => Ok(OperationStatus::Succeeded(body.clone())),
            Operation::AsyncOperation { url, result } => {
                let status: AsyncOperationStatus = self.poll_url(url).await?.json().await?;
                if status.status.eq_ignore_ascii_case("succeeded") {
                    let body = match result {
                        Some(result) => body_of(self.poll_url(result).await?).await?,
                        None => None,
                    };
                    Ok(OperationStatus::Succeeded(body))
                } else if status.status.eq_ignore_ascii_case("failed")
                    || status.status.eq_ignore_ascii_case("canceled")
                {
                    Ok(OperationStatus::Failed {
                        message: status.error.map(|e| e.message).unwrap_or_default(),
                        status: status.status,
                    })
                } else {
                    Ok(OperationStatus::InProgress)
                }
            }
            Operation::Location { url } => {
                let response = self.poll_url(url).await?;
                if response.status() == StatusCode::ACCEPTED {
                    Ok(OperationStatus::InProgress)
                } else {
                    Ok(OperationStatus::Succeeded(body_of(response).await?))
                }
            }
        }
    }
}

#[async_trait]
impl DataLakeStoreApi for ArmClient {
    async fn get_account(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<DataLakeStoreAccount, ApiError> {
        self.get_json(
            &self.data_lake_store_path(resource_group, name),
            DATA_LAKE_STORE_API_VERSION,
        )
        .await
    }

    async fn create_account(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &CreateDataLakeStoreAccountParameters,
    ) -> Result<Operation, ApiError> {
        self.start(
            Method::PUT,
            &self.data_lake_store_path(resource_group, name),
            DATA_LAKE_STORE_API_VERSION,
            Some(parameters),
        )
        .await
    }

    async fn update_account(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &UpdateDataLakeStoreAccountParameters,
    ) -> Result<Operation, ApiError> {
        self.start(
            Method::PATCH,
            &self.data_lake_store_path(resource_group, name),
            DATA_LAKE_STORE_API_VERSION,
            Some(parameters),
        )
        .await
    }

    async fn delete_account(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<Operation, ApiError> {
        self.start::<()>(
            Method::DELETE,
            &self.data_lake_store_path(resource_group, name),
            DATA_LAKE_STORE_API_VERSION,
            None,
        )
        .await
    }
}

#[async_trait]
impl WebAppsApi for ArmClient {
    async fn get_site(&self, resource_group: &str, name: &str) -> Result<Site, ApiError> {
        self.get_json(
            &self.site_path(resource_group, name, ""),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn get_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteConfigResource, ApiError> {
        self.get_json(
            &self.site_path(resource_group, name, "/config/web"),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn get_auth_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<AuthSettingsResource, ApiError> {
        self.post_json(
            &self.site_path(resource_group, name, "/config/authsettings/list"),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn get_backup_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<BackupRequestResource, ApiError> {
        self.post_json(
            &self.site_path(resource_group, name, "/config/backup/list"),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn get_diagnostic_logs_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteLogsConfigResource, ApiError> {
        self.get_json(
            &self.site_path(resource_group, name, "/config/logs"),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn list_application_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<StringDictionary, ApiError> {
        self.post_json(
            &self.site_path(resource_group, name, "/config/appsettings/list"),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn list_azure_storage_accounts(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<AzureStoragePropertyDictionaryResource, ApiError> {
        self.post_json(
            &self.site_path(resource_group, name, "/config/azurestorageaccounts/list"),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn list_connection_strings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ConnectionStringDictionary, ApiError> {
        self.post_json(
            &self.site_path(resource_group, name, "/config/connectionstrings/list"),
            WEB_APPS_API_VERSION,
        )
        .await
    }

    async fn list_publishing_credentials(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<Operation, ApiError> {
        self.start::<()>(
            Method::POST,
            &self.site_path(resource_group, name, "/config/publishingcredentials/list"),
            WEB_APPS_API_VERSION,
            None,
        )
        .await
    }
}
