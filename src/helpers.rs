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

use tf_provider::value::{Value, ValueMap, ValueString};

use crate::utils::known_str;

/// Canonical form of an Azure region: `West Europe` becomes `westeurope`
pub(crate) fn normalize_location(location: &str) -> String {
    location.replace(' ', "").to_lowercase()
}

pub(crate) fn locations_equivalent(a: &str, b: &str) -> bool {
    normalize_location(a) == normalize_location(b)
}

pub(crate) fn case_equivalent(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Store `remote`, unless the prior value spells the same thing differently.
///
/// Keeping the configured spelling is what suppresses a diff on values the
/// API normalizes (casing of enumerations, region names).
pub(crate) fn keep_equivalent<'a>(
    prior: &ValueString<'a>,
    remote: Option<String>,
    equivalent: fn(&str, &str) -> bool,
) -> ValueString<'a> {
    let remote = remote.unwrap_or_default();
    match known_str(prior) {
        Some(prior_str) if equivalent(prior_str, &remote) => prior.clone(),
        _ => Value::Value(Cow::Owned(remote)),
    }
}

pub(crate) fn expand_tags(tags: &ValueMap<'_, ValueString<'_>>) -> Option<BTreeMap<String, String>> {
    match tags {
        Value::Value(tags) => Some(
            tags.iter()
                .filter_map(|(key, value)| Some((key.to_string(), known_str(value)?.to_string())))
                .collect(),
        ),
        _ => None,
    }
}

/// Remote tags as state; an empty set stays null when the configuration has no `tags`
pub(crate) fn flatten_tags<'a>(
    prior: &ValueMap<'a, ValueString<'a>>,
    remote: Option<BTreeMap<String, String>>,
) -> ValueMap<'a, ValueString<'a>> {
    let remote = remote.unwrap_or_default();
    if remote.is_empty() && !matches!(prior, Value::Value(_)) {
        return Value::Null;
    }
    Value::Value(
        remote
            .into_iter()
            .map(|(key, value)| (Cow::Owned(key), Value::Value(Cow::Owned(value))))
            .collect(),
    )
}

/// Split a comma-joined address list, preserving order and dropping empty entries
pub(crate) fn split_addresses(addresses: &str) -> Vec<String> {
    addresses
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}
