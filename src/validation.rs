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

//! Attribute validators. Null and unknown values are always accepted.

use lazy_static::lazy_static;
use regex::Regex;
use tf_provider::value::{Value, ValueMap, ValueString};
use tf_provider::{AttributePath, Diagnostics};

use crate::utils::{known_str, DisplayJoinable};

const MAX_TAGS: usize = 50;
const MAX_TAG_KEY_LEN: usize = 512;
const MAX_TAG_VALUE_LEN: usize = 256;

lazy_static! {
    static ref DATA_LAKE_ACCOUNT_NAME: Regex = Regex::new(r"^[a-z0-9]{3,24}$").unwrap();
    static ref RESOURCE_GROUP_NAME: Regex = Regex::new(r"^[-\w\._\(\)]{1,90}$").unwrap();
    static ref WEB_APP_NAME: Regex =
        Regex::new(r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,58}[0-9a-zA-Z]$").unwrap();
}

fn matches(
    diags: &mut Diagnostics,
    value: &ValueString,
    attr_path: AttributePath,
    pattern: &Regex,
    message: &str,
) -> bool {
    let Some(value) = known_str(value) else {
        return true;
    };
    if pattern.is_match(value) {
        true
    } else {
        diags.error(
            "Invalid name",
            format!("{value:?}: {message}"),
            attr_path,
        );
        false
    }
}

pub(crate) fn data_lake_account_name(
    diags: &mut Diagnostics,
    value: &ValueString,
    attr_path: AttributePath,
) {
    matches(
        diags,
        value,
        attr_path,
        &DATA_LAKE_ACCOUNT_NAME,
        "can only consist of lowercase letters and numbers, and must be between 3 and 24 characters long",
    );
}

pub(crate) fn web_app_name(diags: &mut Diagnostics, value: &ValueString, attr_path: AttributePath) {
    matches(
        diags,
        value,
        attr_path,
        &WEB_APP_NAME,
        "must be between 2 and 60 characters, contain only letters, numbers and hyphens, and cannot start or end with a hyphen",
    );
}

pub(crate) fn resource_group_name(
    diags: &mut Diagnostics,
    value: &ValueString,
    attr_path: AttributePath,
) {
    let valid = matches(
        diags,
        value,
        attr_path.clone(),
        &RESOURCE_GROUP_NAME,
        "may only contain alphanumeric characters, dash, underscores, parentheses and periods, and be at most 90 characters long",
    );
    if valid && known_str(value).is_some_and(|name| name.ends_with('.')) {
        diags.error(
            "Invalid name",
            "resource group names cannot end with a period",
            attr_path,
        );
    }
}

pub(crate) fn not_empty(diags: &mut Diagnostics, value: &ValueString, attr_path: AttributePath) {
    if known_str(value).is_some_and(|value| value.trim().is_empty()) {
        diags.error_short("Value must not be empty", attr_path);
    }
}

/// Enumeration membership, ignoring case
pub(crate) fn string_in_slice(
    diags: &mut Diagnostics,
    value: &ValueString,
    choices: &[&str],
    attr_path: AttributePath,
) {
    let Some(value) = known_str(value) else {
        return;
    };
    if !choices.iter().any(|choice| choice.eq_ignore_ascii_case(value)) {
        diags.error(
            "Unsupported value",
            format!(
                "{value:?} is not one of: {}",
                choices.iter().join_with(", ")
            ),
            attr_path,
        );
    }
}

pub(crate) fn tags(
    diags: &mut Diagnostics,
    tags: &ValueMap<'_, ValueString<'_>>,
    attr_path: AttributePath,
) {
    let Value::Value(tags) = tags else {
        return;
    };
    if tags.len() > MAX_TAGS {
        diags.error(
            "Too many tags",
            format!("a maximum of {MAX_TAGS} tags can be applied, got {}", tags.len()),
            attr_path.clone(),
        );
    }
    for (key, value) in tags {
        let key_path = attr_path.clone().key(key.to_string());
        if key.len() > MAX_TAG_KEY_LEN {
            diags.error(
                "Tag key too long",
                format!("tag keys are limited to {MAX_TAG_KEY_LEN} characters"),
                key_path.clone(),
            );
        }
        if known_str(value).is_some_and(|value| value.len() > MAX_TAG_VALUE_LEN) {
            diags.error(
                "Tag value too long",
                format!("tag values are limited to {MAX_TAG_VALUE_LEN} characters"),
                key_path,
            );
        }
    }
}
