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

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::appservice::models::{
    AuthSettingsResource, AzureStoragePropertyDictionaryResource, BackupRequestResource,
    ConnectionStringDictionary, Site, SiteConfigResource, SiteLogsConfigResource,
    StringDictionary,
};
use crate::datalake::models::{
    CreateDataLakeStoreAccountParameters, DataLakeStoreAccount,
    UpdateDataLakeStoreAccountParameters,
};

pub mod arm;
#[cfg(test)]
pub(crate) mod fake;
pub mod poll;

pub use arm::{ArmClient, CloudEnvironment};
pub use poll::{wait_for_completion, Deadline};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("the remote object was not found")]
    NotFound,

    #[error("a resource with the ID {id:?} already exists - to be managed via Terraform this resource needs to be imported into the State")]
    AlreadyExists { id: String },

    #[error("unexpected status {status} ({code}): {message}")]
    Remote {
        status: u16,
        code: String,
        message: String,
    },

    #[error("operation did not complete within {after:?}")]
    Timeout { after: Duration },

    #[error("long-running operation ended with status {status}: {message}")]
    OperationFailed { status: String, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid resource id {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    #[error("the provider has not been configured")]
    NotConfigured,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Returns true when the root cause of `err` is a remote "not found".
pub fn was_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_not_found)
}

/// Handle on a long-running remote operation, as returned by a mutating call
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// The call completed synchronously, with its response body if any
    Completed(Option<serde_json::Value>),
    /// Poll an `Azure-AsyncOperation` status document, then fetch `result` once it succeeded
    AsyncOperation { url: String, result: Option<String> },
    /// Poll a `Location` url until it stops answering `202 Accepted`
    Location { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationStatus {
    InProgress,
    Succeeded(Option<serde_json::Value>),
    Failed { status: String, message: String },
}

#[async_trait]
pub trait ArmApi: Send + Sync + 'static {
    /// Subscription every identity built by the definitions lives in
    fn subscription_id(&self) -> &str;

    /// Delay between two polls of a long-running operation
    fn poll_interval(&self) -> Duration;

    /// Fetch the current status of a long-running operation
    async fn poll_operation(&self, operation: &Operation) -> Result<OperationStatus, ApiError>;
}

#[async_trait]
pub trait DataLakeStoreApi: ArmApi {
    async fn get_account(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<DataLakeStoreAccount, ApiError>;

    async fn create_account(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &CreateDataLakeStoreAccountParameters,
    ) -> Result<Operation, ApiError>;

    async fn update_account(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &UpdateDataLakeStoreAccountParameters,
    ) -> Result<Operation, ApiError>;

    async fn delete_account(&self, resource_group: &str, name: &str)
        -> Result<Operation, ApiError>;
}

#[async_trait]
pub trait WebAppsApi: ArmApi {
    async fn get_site(&self, resource_group: &str, name: &str) -> Result<Site, ApiError>;

    async fn get_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteConfigResource, ApiError>;

    async fn get_auth_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<AuthSettingsResource, ApiError>;

    async fn get_backup_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<BackupRequestResource, ApiError>;

    async fn get_diagnostic_logs_configuration(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteLogsConfigResource, ApiError>;

    async fn list_application_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<StringDictionary, ApiError>;

    async fn list_azure_storage_accounts(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<AzureStoragePropertyDictionaryResource, ApiError>;

    async fn list_connection_strings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<ConnectionStringDictionary, ApiError>;

    /// Starts the publishing credentials listing, whose result is the operation's body
    async fn list_publishing_credentials(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<Operation, ApiError>;
}

/// Shared slot for the API client, filled when the provider is configured.
///
/// Resources and data sources are instantiated before Terraform sends the
/// provider configuration, so they hold the handle and resolve it per call.
pub struct ClientHandle<C> {
    inner: Arc<RwLock<Option<Arc<C>>>>,
}

impl<C> ClientHandle<C> {
    pub fn new(client: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(client)))),
        }
    }

    pub async fn set(&self, client: C) {
        *self.inner.write().await = Some(Arc::new(client));
    }

    pub async fn get(&self) -> Result<Arc<C>, ApiError> {
        self.inner.read().await.clone().ok_or(ApiError::NotConfigured)
    }
}

impl<C> Default for ClientHandle<C> {
    fn default() -> Self {
        Self {
            inner: Default::default(),
        }
    }
}

impl<C> Clone for ClientHandle<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C> std::fmt::Debug for ClientHandle<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let configured = self.inner.try_read().map(|c| c.is_some()).ok();
        f.debug_struct("ClientHandle")
            .field("configured", &configured)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_handle_reports_not_configured() {
        let handle = ClientHandle::<u32>::default();
        assert!(matches!(handle.get().await, Err(ApiError::NotConfigured)));

        let shared = handle.clone();
        shared.set(7).await;
        assert_eq!(*handle.get().await.unwrap(), 7);
    }

    #[test]
    fn not_found_survives_context() {
        let err = anyhow::Error::from(ApiError::NotFound).context("retrieving Data Lake Store");
        assert!(was_not_found(&err));

        let err = anyhow::Error::from(ApiError::NotConfigured).context("retrieving");
        assert!(!was_not_found(&err));
    }
}
