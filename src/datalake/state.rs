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
    Attribute, AttributeConstraint, AttributeType, Block, Description, NestedBlock, Schema,
};
use tf_provider::value::{Value, ValueList, ValueMap, ValueString};
use tf_provider::map;

use crate::timeouts::StateTimeouts;
use crate::utils::{DisplayJoinable, WithSchema};

use super::models::{
    ENCRYPTION_STATES, ENCRYPTION_TYPES, FIREWALL_ALLOW_AZURE_IPS_STATES, FIREWALL_STATES, TIERS,
};
use super::DEFAULT_TIMEOUTS;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataLakeStoreState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub location: ValueString<'a>,
    pub resource_group_name: ValueString<'a>,
    pub tier: ValueString<'a>,
    pub encryption_state: ValueString<'a>,
    pub encryption_type: ValueString<'a>,
    pub firewall_state: ValueString<'a>,
    pub firewall_allow_azure_ips: ValueString<'a>,
    pub endpoint: ValueString<'a>,
    pub tags: ValueMap<'a, ValueString<'a>>,
    #[serde(default)]
    pub timeouts: ValueList<Value<StateTimeouts<'a>>>,
}

fn one_of(prefix: &str, choices: &[&str], default: Option<&str>) -> Description {
    let mut text = format!(
        "{prefix}, one of: {}",
        choices.iter().join_with(", ")
    );
    if let Some(default) = default {
        text.push_str(&format!(" (default: `{default}`)"));
    }
    Description::plain(text)
}

impl<'a> WithSchema for DataLakeStoreState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "id" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Resource Manager ID of the account"),
                        constraint: AttributeConstraint::Computed,
                        ..Default::default()
                    },
                    "name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Name of the Data Lake Store, 3 to 24 lowercase letters and digits. Changing it forces a new resource"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "location" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Azure region of the account. Changing it forces a new resource"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "resource_group_name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Resource group holding the account. Changing it forces a new resource"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "tier" => Attribute {
                        attr_type: AttributeType::String,
                        description: one_of("Monthly commitment tier", &TIERS, Some(super::DEFAULT_TIER)),
                        constraint: AttributeConstraint::OptionalComputed,
                        ..Default::default()
                    },
                    "encryption_state" => Attribute {
                        attr_type: AttributeType::String,
                        description: one_of("Encryption of the stored data. Changing it forces a new resource", &ENCRYPTION_STATES, Some(super::DEFAULT_ENCRYPTION_STATE)),
                        constraint: AttributeConstraint::OptionalComputed,
                        ..Default::default()
                    },
                    "encryption_type" => Attribute {
                        attr_type: AttributeType::String,
                        description: one_of("Encryption key management. Changing it forces a new resource", &ENCRYPTION_TYPES, None),
                        constraint: AttributeConstraint::OptionalComputed,
                        ..Default::default()
                    },
                    "firewall_state" => Attribute {
                        attr_type: AttributeType::String,
                        description: one_of("Firewall of the account", &FIREWALL_STATES, Some(super::DEFAULT_FIREWALL_STATE)),
                        constraint: AttributeConstraint::OptionalComputed,
                        ..Default::default()
                    },
                    "firewall_allow_azure_ips" => Attribute {
                        attr_type: AttributeType::String,
                        description: one_of("Whether Azure service IPs bypass the firewall", &FIREWALL_ALLOW_AZURE_IPS_STATES, Some(super::DEFAULT_FIREWALL_ALLOW_AZURE_IPS)),
                        constraint: AttributeConstraint::OptionalComputed,
                        ..Default::default()
                    },
                    "endpoint" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Endpoint of the account"),
                        constraint: AttributeConstraint::Computed,
                        ..Default::default()
                    },
                    "tags" => Attribute {
                        attr_type: AttributeType::Map(Box::new(AttributeType::String)),
                        description: Description::plain("Tags assigned to the account"),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                },
                blocks: map! {
                    "timeouts" => NestedBlock::List(StateTimeouts::block(&DEFAULT_TIMEOUTS)),
                },
                description: Description::plain("Manages an Azure Data Lake Store Gen1 account"),
                ..Default::default()
            },
        }
    }
}
