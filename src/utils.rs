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
use std::cell::RefCell;

use tf_provider::value::{Value, ValueBool, ValueList, ValueNumber, ValueString};
use tf_provider::schema::Schema;
use tf_provider::{AttributePath, Diagnostics};

pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

pub(crate) trait WithValidate {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath);
}

pub(crate) trait WithNormalize {
    fn normalize(&mut self, diags: &mut Diagnostics);
}

/// Turn a failed operation into a root error diagnostic
pub(crate) fn report<T>(
    diags: &mut Diagnostics,
    summary: &'static str,
    result: anyhow::Result<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            diags.root_error(summary, format!("{err:#}"));
            None
        }
    }
}

/// Known string content, `None` while null or unknown
pub(crate) fn known_str<'b>(value: &'b ValueString<'_>) -> Option<&'b str> {
    match value {
        Value::Value(s) => Some(s.as_ref()),
        _ => None,
    }
}

pub(crate) fn string_or_empty<'a>(value: Option<String>) -> ValueString<'a> {
    Value::Value(Cow::Owned(value.unwrap_or_default()))
}

pub(crate) fn bool_or_false(value: Option<bool>) -> ValueBool {
    Value::Value(value.unwrap_or_default())
}

pub(crate) fn number_or_zero(value: Option<i64>) -> ValueNumber {
    Value::Value(value.unwrap_or_default())
}

pub(crate) fn string_list<'a, I>(values: I) -> ValueList<ValueString<'a>>
where
    I: IntoIterator<Item = String>,
{
    Value::Value(
        values
            .into_iter()
            .map(|value| Value::Value(Cow::Owned(value)))
            .collect(),
    )
}

/// Wrap zero or one flattened block, the way nested lists of a single object are stored
pub(crate) fn single_or_empty<T>(value: Option<T>) -> ValueList<Value<T>> {
    Value::Value(value.into_iter().map(Value::Value).collect())
}

pub struct DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    iter: RefCell<T>,
    sep: &'a str,
}

pub trait DisplayJoinable {
    type Joiner<'a>;
    fn join_with(self, sep: &str) -> Self::Joiner<'_>;
}

impl<T, I> DisplayJoinable for T
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    type Joiner<'a> = DisplayJoiner<'a, T, I>;

    fn join_with(self, sep: &str) -> Self::Joiner<'_> {
        DisplayJoiner {
            iter: RefCell::new(self),
            sep,
        }
    }
}

impl<'a, T, I> std::fmt::Display for DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        let mut iter = self.iter.try_borrow_mut().or(Err(std::fmt::Error))?;
        for elt in iter.by_ref() {
            f.write_str(sep)?;
            f.write_fmt(format_args!("{elt}"))?;
            sep = self.sep;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_separator() {
        let joined = ["Enabled", "Disabled"].iter().join_with(", ").to_string();
        assert_eq!(joined, "Enabled, Disabled");
        assert_eq!(std::iter::empty::<&str>().join_with("/").to_string(), "");
    }

    #[test]
    fn known_str_skips_null_and_unknown() {
        assert_eq!(known_str(&Value::Value(Cow::Borrowed("a"))), Some("a"));
        assert_eq!(known_str(&ValueString::Null), None);
        assert_eq!(known_str(&ValueString::Unknown), None);
    }
}
