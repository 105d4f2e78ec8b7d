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

use tf_provider::schema::Schema;
use tf_provider::value::ValueEmpty;
use tf_provider::{AttributePath, DataSource, Diagnostics};

use crate::client::{ClientHandle, Deadline, WebAppsApi};
use crate::utils::{report, WithSchema, WithValidate};

use super::state::LinuxWebAppDataSourceState;

const READ_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
pub struct LinuxWebAppDataSource<A> {
    client: ClientHandle<A>,
}

impl<A: WebAppsApi> LinuxWebAppDataSource<A> {
    pub fn new(client: ClientHandle<A>) -> Self {
        Self { client }
    }

    async fn fetch(&self, state: &mut LinuxWebAppDataSourceState<'_>) -> anyhow::Result<()> {
        let api = self.client.get().await?;
        state.read(&*api, &Deadline::after(READ_TIMEOUT)).await
    }
}

#[async_trait]
impl<A> DataSource for LinuxWebAppDataSource<A>
where
    A: WebAppsApi,
{
    type State<'a> = LinuxWebAppDataSourceState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(LinuxWebAppDataSourceState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, AttributePath::default());

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let mut state = config.clone();
        report(
            diags,
            "Failed to read Linux Web App",
            self.fetch(&mut state).await,
        )?;

        Some(state)
    }
}
