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

//! Wire representation of `Microsoft.DataLakeStore/accounts` (api-version 2016-11-01)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const TIERS: [&str; 7] = [
    "Consumption",
    "Commitment_1TB",
    "Commitment_10TB",
    "Commitment_100TB",
    "Commitment_500TB",
    "Commitment_1PB",
    "Commitment_5PB",
];
pub const ENCRYPTION_STATES: [&str; 2] = ["Enabled", "Disabled"];
pub const ENCRYPTION_TYPES: [&str; 1] = ["ServiceManaged"];
pub const FIREWALL_STATES: [&str; 2] = ["Enabled", "Disabled"];
pub const FIREWALL_ALLOW_AZURE_IPS_STATES: [&str; 2] = ["Enabled", "Disabled"];

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLakeStoreAccount {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
    pub properties: Option<DataLakeStoreAccountProperties>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLakeStoreAccountProperties {
    pub provisioning_state: Option<String>,
    pub current_tier: Option<String>,
    pub new_tier: Option<String>,
    pub encryption_state: Option<String>,
    pub encryption_config: Option<EncryptionConfig>,
    pub firewall_state: Option<String>,
    pub firewall_allow_azure_ips: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfig {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataLakeStoreAccountParameters {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    pub properties: CreateDataLakeStoreAccountProperties,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataLakeStoreAccountProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_allow_azure_ips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_config: Option<EncryptionConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataLakeStoreAccountParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    pub properties: UpdateDataLakeStoreAccountProperties,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataLakeStoreAccountProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_allow_azure_ips: Option<String>,
}
