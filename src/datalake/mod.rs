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

use crate::timeouts::DefaultTimeouts;

pub mod models;
mod normalize;
mod read;
mod resource;
mod state;
mod validate;

pub use resource::DataLakeStoreResource;

pub(crate) const DEFAULT_TIER: &str = "Consumption";
pub(crate) const DEFAULT_ENCRYPTION_STATE: &str = "Enabled";
pub(crate) const DEFAULT_FIREWALL_STATE: &str = "Enabled";
pub(crate) const DEFAULT_FIREWALL_ALLOW_AZURE_IPS: &str = "Enabled";

pub(crate) const DEFAULT_TIMEOUTS: DefaultTimeouts = DefaultTimeouts {
    create: Duration::from_secs(30 * 60),
    read: Duration::from_secs(5 * 60),
    update: Duration::from_secs(30 * 60),
    delete: Duration::from_secs(30 * 60),
};
