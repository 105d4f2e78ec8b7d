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

use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description};
use tf_provider::value::{Value, ValueList, ValueString};
use tf_provider::{map, AttributePath, Diagnostics};

use crate::utils::known_str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    Create,
    Read,
    Update,
    Delete,
}

impl TimeoutKind {
    const ALL: [TimeoutKind; 4] = [
        TimeoutKind::Create,
        TimeoutKind::Read,
        TimeoutKind::Update,
        TimeoutKind::Delete,
    ];

    fn name(self) -> &'static str {
        match self {
            TimeoutKind::Create => "create",
            TimeoutKind::Read => "read",
            TimeoutKind::Update => "update",
            TimeoutKind::Delete => "delete",
        }
    }
}

/// Per-operation time budget when the configuration sets none
#[derive(Debug, Clone, Copy)]
pub struct DefaultTimeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl DefaultTimeouts {
    fn get(&self, kind: TimeoutKind) -> Duration {
        match kind {
            TimeoutKind::Create => self.create,
            TimeoutKind::Read => self.read,
            TimeoutKind::Update => self.update,
            TimeoutKind::Delete => self.delete,
        }
    }
}

/// `timeouts` block of a resource
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTimeouts<'a> {
    pub create: ValueString<'a>,
    pub read: ValueString<'a>,
    pub update: ValueString<'a>,
    pub delete: ValueString<'a>,
}

impl<'a> StateTimeouts<'a> {
    fn get(&self, kind: TimeoutKind) -> &ValueString<'a> {
        match kind {
            TimeoutKind::Create => &self.create,
            TimeoutKind::Read => &self.read,
            TimeoutKind::Update => &self.update,
            TimeoutKind::Delete => &self.delete,
        }
    }

    pub fn block(defaults: &DefaultTimeouts) -> Block {
        let attribute = |kind: TimeoutKind| Attribute {
            attr_type: AttributeType::String,
            description: Description::plain(format!(
                "Time allowed to {} the resource (default: {})",
                kind.name(),
                humantime::format_duration(defaults.get(kind))
            )),
            constraint: AttributeConstraint::Optional,
            ..Default::default()
        };
        Block {
            attributes: map! {
                "create" => attribute(TimeoutKind::Create),
                "read"   => attribute(TimeoutKind::Read),
                "update" => attribute(TimeoutKind::Update),
                "delete" => attribute(TimeoutKind::Delete),
            },
            description: Description::plain("Operation timeouts"),
            ..Default::default()
        }
    }
}

/// Budget for `kind`, from the first `timeouts` block if it sets a valid one
pub fn resolve(
    timeouts: &ValueList<Value<StateTimeouts<'_>>>,
    kind: TimeoutKind,
    defaults: &DefaultTimeouts,
) -> Duration {
    let configured = match timeouts {
        Value::Value(blocks) => blocks.iter().find_map(|block| match block {
            Value::Value(block) => known_str(block.get(kind)),
            _ => None,
        }),
        _ => None,
    };
    configured
        .and_then(|value| humantime::parse_duration(value).ok())
        .unwrap_or_else(|| defaults.get(kind))
}

pub fn validate(
    diags: &mut Diagnostics,
    timeouts: &ValueList<Value<StateTimeouts<'_>>>,
    attr_path: AttributePath,
) {
    let Value::Value(blocks) = timeouts else {
        return;
    };
    if blocks.len() > 1 {
        diags.error_short(
            "At most one `timeouts` block may be declared",
            attr_path.clone(),
        );
    }
    for (i, block) in blocks.iter().enumerate() {
        let Value::Value(block) = block else {
            continue;
        };
        for kind in TimeoutKind::ALL {
            let Some(value) = known_str(block.get(kind)) else {
                continue;
            };
            if let Err(err) = humantime::parse_duration(value) {
                diags.error(
                    format!("Invalid `{}` timeout", kind.name()),
                    format!("{value:?} is not a duration (for example `30m` or `1h30m`): {err}"),
                    attr_path.clone().index(i as i64).attribute(kind.name()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    const DEFAULTS: DefaultTimeouts = DefaultTimeouts {
        create: Duration::from_secs(30 * 60),
        read: Duration::from_secs(5 * 60),
        update: Duration::from_secs(30 * 60),
        delete: Duration::from_secs(30 * 60),
    };

    fn configured(create: &'static str) -> ValueList<Value<StateTimeouts<'static>>> {
        Value::Value(vec![Value::Value(StateTimeouts {
            create: Value::Value(Cow::Borrowed(create)),
            ..Default::default()
        })])
    }

    #[test]
    fn falls_back_to_defaults() {
        assert_eq!(
            resolve(&Value::Null, TimeoutKind::Read, &DEFAULTS),
            Duration::from_secs(300)
        );
        assert_eq!(
            resolve(&configured("1h"), TimeoutKind::Delete, &DEFAULTS),
            Duration::from_secs(1800)
        );
    }

    #[test]
    fn uses_configured_duration() {
        assert_eq!(
            resolve(&configured("1h30m"), TimeoutKind::Create, &DEFAULTS),
            Duration::from_secs(5400)
        );
    }

    #[test]
    fn rejects_invalid_durations() {
        let mut diags = Diagnostics::default();
        validate(&mut diags, &configured("soon"), AttributePath::new("timeouts"));
        assert_eq!(diags.errors.len(), 1);

        let mut diags = Diagnostics::default();
        validate(&mut diags, &configured("45s"), AttributePath::new("timeouts"));
        assert!(diags.errors.is_empty());
    }
}
