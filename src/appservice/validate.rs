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

use tf_provider::{AttributePath, Diagnostics};

use crate::utils::WithValidate;
use crate::validation;

use super::state::LinuxWebAppDataSourceState;

impl<'a> WithValidate for LinuxWebAppDataSourceState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        validation::web_app_name(diags, &self.name, attr_path.clone().attribute("name"));
        validation::resource_group_name(
            diags,
            &self.resource_group_name,
            attr_path.attribute("resource_group_name"),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use tf_provider::value::Value;

    use super::*;

    fn config(name: &'static str) -> LinuxWebAppDataSourceState<'static> {
        LinuxWebAppDataSourceState {
            name: Value::Value(Cow::Borrowed(name)),
            resource_group_name: Value::Value(Cow::Borrowed("rg1")),
            ..Default::default()
        }
    }

    #[test]
    fn web_app_names() {
        for (name, valid) in [
            ("app1", true),
            ("my-web-app", true),
            ("a", false),
            ("-app", false),
            ("app-", false),
            ("app_1", false),
        ] {
            let mut diags = Diagnostics::default();
            config(name).validate(&mut diags, AttributePath::default());
            assert_eq!(diags.errors.is_empty(), valid, "{name:?}");
        }
    }

    #[test]
    fn unknown_name_is_accepted() {
        let state = LinuxWebAppDataSourceState {
            name: Value::Unknown,
            ..config("app1")
        };
        let mut diags = Diagnostics::default();
        state.validate(&mut diags, AttributePath::default());
        assert!(diags.errors.is_empty());
    }
}
