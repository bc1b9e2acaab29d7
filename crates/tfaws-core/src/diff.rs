//! Attribute-level change detection between two typed configurations
//!
//! Typed configs are compared through their attribute maps so that the
//! schema's rules (computed, force-new, diff suppression) apply uniformly.

use crate::error::{Error, Result};
use crate::schema::ResourceSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Serialize a typed config into its attribute map
pub fn to_attributes<T: Serialize>(config: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(config)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Other(format!(
            "configuration must serialize to an object, got {}",
            other
        ))),
    }
}

/// Deserialize an attribute map into a typed config
pub fn from_attributes<T: DeserializeOwned>(attributes: Map<String, Value>) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(attributes))?)
}

/// Top-level attributes that changed between two configurations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changed: BTreeSet<&'static str>,
}

impl ChangeSet {
    /// Compute the changed, updatable attributes of `old` → `new`
    pub fn between<T: Serialize>(schema: &ResourceSchema, old: &T, new: &T) -> Result<Self> {
        let old = to_attributes(old)?;
        let new = to_attributes(new)?;

        Ok(Self {
            changed: schema.changed_attributes(&old, &new).into_iter().collect(),
        })
    }

    /// Whether `name` changed
    pub fn has_change(&self, name: &str) -> bool {
        self.changed.contains(name)
    }

    /// Whether any of `names` changed
    pub fn has_changes(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.has_change(n))
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.changed.iter().copied()
    }
}

/// Diff suppression functions for [`crate::schema::Attribute::suppress_diff`]
pub mod suppress {
    use serde_json::{Value, json};

    /// Policy elements whose single value and one-element list forms are equivalent
    const LIST_OR_SCALAR_KEYS: &[&str] = &["Action", "NotAction", "Resource", "NotResource"];

    /// Two JSON policy documents are equivalent
    ///
    /// Whitespace, key order, scalar-vs-one-element-list and the order of
    /// string lists do not matter. This holds inside `Principal` and
    /// `NotPrincipal` maps and `Condition` blocks too, and statements compare
    /// as an unordered collection. Unparseable documents only match when
    /// their text is identical.
    pub fn equivalent_policies(old: &Value, new: &Value) -> bool {
        let (Some(old), Some(new)) = (old.as_str(), new.as_str()) else {
            return old == new;
        };
        if old.trim().is_empty() || new.trim().is_empty() {
            return old.trim() == new.trim();
        }

        match (
            serde_json::from_str::<Value>(old),
            serde_json::from_str::<Value>(new),
        ) {
            (Ok(a), Ok(b)) => normalize_policy(a) == normalize_policy(b),
            _ => old == new,
        }
    }

    fn normalize_policy(value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        let value = normalize_element(&key, normalize_policy(value));
                        (key, value)
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.into_iter().map(normalize_policy).collect()),
            other => other,
        }
    }

    fn normalize_element(key: &str, value: Value) -> Value {
        match key {
            "Statement" => {
                let mut statements = match value {
                    Value::Array(items) => items,
                    other => vec![other],
                };
                statements.sort_by_cached_key(Value::to_string);
                Value::Array(statements)
            }
            "Principal" | "NotPrincipal" => match value {
                // "*" is shorthand for every AWS principal
                Value::String(s) if s == "*" => json!({ "AWS": ["*"] }),
                Value::Object(_) => map_values(value, as_sorted_list),
                other => as_sorted_list(other),
            },
            "Condition" => map_values(value, |operator| map_values(operator, as_sorted_list)),
            key if LIST_OR_SCALAR_KEYS.contains(&key) => as_sorted_list(value),
            _ => value,
        }
    }

    fn map_values(value: Value, f: fn(Value) -> Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, f(v))).collect()),
            other => other,
        }
    }

    fn as_sorted_list(value: Value) -> Value {
        let mut items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        if items.iter().all(Value::is_string) {
            items.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
        }
        Value::Array(items)
    }

    /// A configuration that drops an optional block the remote still reports
    pub fn missing_optional_block(old: &Value, new: &Value) -> bool {
        let old_len = old.as_array().map_or(0, Vec::len);
        let new_len = new.as_array().map_or(0, Vec::len);
        old_len == 1 && new_len == 0
    }
}
