//! Declarative resource schemas
//!
//! A [`ResourceSchema`] is the attribute table of one resource type. The
//! host uses it to plan (required/computed/force-new, defaults) and the
//! adapters use it to validate configuration, detect changed attributes and
//! type-check values read back from the remote API.
//!
//! ```rust
//! use tfaws_core::schema::{Attribute, ResourceSchema, Validator};
//!
//! let schema = ResourceSchema::new("example_thing")
//!     .attribute(Attribute::required_string("name").force_new().validate(Validator::NoZeroValue))
//!     .attribute(Attribute::computed_string("arn"));
//!
//! assert!(schema.get("name").is_some());
//! ```

use crate::arn::Arn;
use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Decides whether a difference between `old` and `new` should be ignored
pub type DiffSuppressFn = fn(old: &Value, new: &Value) -> bool;

static ACCOUNT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(aws|aws-managed|third-party|\d{12})$").expect("valid regex"));
static PARTITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^aws(-[a-z]+)*$").expect("valid regex"));
static REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[a-z]+)+-\d$").expect("valid regex"));
static PLAIN_ACCOUNT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{12}$").expect("valid regex"));
/// Compiled `Validator::StringMatch` patterns
static STRING_MATCH_RES: LazyLock<Mutex<HashMap<&'static str, Regex>>> =
    LazyLock::new(Default::default);

/// Value type of an attribute
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int,
    /// Unordered set of strings
    StringSet,
    /// Nested configuration block, rendered as a list of objects
    Block {
        max_items: usize,
        attributes: Vec<Attribute>,
    },
}

/// Who supplies an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be set in configuration
    Required,
    /// May be set in configuration
    Optional,
    /// Only ever populated by Read
    Computed,
    /// May be set; Read fills it in when it isn't
    OptionalComputed,
}

impl AttributeMode {
    /// Whether configuration may carry this attribute
    pub fn is_configurable(self) -> bool {
        !matches!(self, AttributeMode::Computed)
    }
}

/// Validation rule applied to configured values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// A 12-digit account id
    AccountId,
    /// A well-formed ARN (empty passes)
    Arn,
    /// Not the zero value of its type
    NoZeroValue,
    /// String length within `min..=max`
    StringLenBetween { min: usize, max: usize },
    /// One of a fixed set of strings
    StringInSlice { values: Vec<&'static str> },
    /// Matches a regular expression
    StringMatch {
        pattern: &'static str,
        message: &'static str,
    },
}

impl Validator {
    /// Check `value` of attribute `name`
    pub fn check(&self, name: &str, value: &Value) -> std::result::Result<(), String> {
        match self {
            Validator::NoZeroValue => {
                if is_zero_value(value) {
                    Err(format!("{:?} must not be empty", name))
                } else {
                    Ok(())
                }
            }
            Validator::AccountId => {
                let s = expect_str(name, value)?;
                if PLAIN_ACCOUNT_ID_RE.is_match(s) {
                    Ok(())
                } else {
                    Err(format!("{:?} ({}) must be a 12 digit account ID", name, s))
                }
            }
            Validator::Arn => {
                let s = expect_str(name, value)?;
                if s.is_empty() {
                    return Ok(());
                }
                check_arn(name, s)
            }
            Validator::StringLenBetween { min, max } => {
                let s = expect_str(name, value)?;
                let len = s.chars().count();
                if len < *min || len > *max {
                    Err(format!(
                        "expected length of {} to be in the range ({} - {}), got {}",
                        name, min, max, s
                    ))
                } else {
                    Ok(())
                }
            }
            Validator::StringInSlice { values } => {
                let s = expect_str(name, value)?;
                if values.contains(&s) {
                    Ok(())
                } else {
                    Err(format!(
                        "expected {} to be one of {:?}, got {}",
                        name, values, s
                    ))
                }
            }
            Validator::StringMatch { pattern, message } => {
                let s = expect_str(name, value)?;
                let re = string_match_regex(*pattern)
                    .map_err(|e| format!("invalid pattern for {}: {}", name, e))?;
                if re.is_match(s) {
                    Ok(())
                } else {
                    Err(format!("invalid value for {} ({})", name, message))
                }
            }
        }
    }
}

fn string_match_regex(pattern: &'static str) -> std::result::Result<Regex, regex::Error> {
    let mut compiled = STRING_MATCH_RES
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = compiled.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    compiled.insert(pattern, re.clone());
    Ok(re)
}

fn expect_str<'a>(name: &str, value: &'a Value) -> std::result::Result<&'a str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected type of {} to be string", name))
}

fn check_arn(name: &str, s: &str) -> std::result::Result<(), String> {
    let arn = Arn::parse(s).map_err(|e| format!("{:?} ({}) is an invalid ARN: {}", name, s, e))?;

    if arn.partition.is_empty() {
        return Err(format!("{:?} ({}) is an invalid ARN: missing partition value", name, s));
    }
    if !PARTITION_RE.is_match(&arn.partition) {
        return Err(format!(
            "{:?} ({}) is an invalid ARN: invalid partition value (expecting to match regular expression: {})",
            name,
            s,
            PARTITION_RE.as_str()
        ));
    }
    if !arn.region.is_empty() && !REGION_RE.is_match(&arn.region) {
        return Err(format!(
            "{:?} ({}) is an invalid ARN: invalid region value (expecting to match regular expression: {})",
            name,
            s,
            REGION_RE.as_str()
        ));
    }
    if !arn.account_id.is_empty() && !ACCOUNT_ID_RE.is_match(&arn.account_id) {
        return Err(format!(
            "{:?} ({}) is an invalid ARN: invalid account ID value (expecting to match regular expression: {})",
            name,
            s,
            ACCOUNT_ID_RE.as_str()
        ));
    }
    if arn.resource.is_empty() {
        return Err(format!(
            "{:?} ({}) is an invalid ARN: missing resource value",
            name, s
        ));
    }
    Ok(())
}

/// Whether `value` is unset or the zero value of its type
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// One attribute of a resource or nested block
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(flatten)]
    pub ty: AttributeType,
    pub mode: AttributeMode,
    /// Changing the value forces the resource to be replaced
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    #[serde(skip)]
    pub diff_suppress: Option<DiffSuppressFn>,
}

impl Attribute {
    /// Create an attribute
    pub fn new(name: &'static str, ty: AttributeType, mode: AttributeMode) -> Self {
        Self {
            name,
            ty,
            mode,
            force_new: false,
            default: None,
            validators: Vec::new(),
            diff_suppress: None,
        }
    }

    pub fn required_string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String, AttributeMode::Required)
    }

    pub fn optional_string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String, AttributeMode::Optional)
    }

    pub fn computed_string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String, AttributeMode::Computed)
    }

    pub fn optional_computed_string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String, AttributeMode::OptionalComputed)
    }

    pub fn optional_bool(name: &'static str) -> Self {
        Self::new(name, AttributeType::Bool, AttributeMode::Optional)
    }

    pub fn computed_bool(name: &'static str) -> Self {
        Self::new(name, AttributeType::Bool, AttributeMode::Computed)
    }

    pub fn string_set(name: &'static str, mode: AttributeMode) -> Self {
        Self::new(name, AttributeType::StringSet, mode)
    }

    /// A nested block holding at most `max_items` elements
    pub fn block(
        name: &'static str,
        mode: AttributeMode,
        max_items: usize,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self::new(name, AttributeType::Block { max_items, attributes }, mode)
    }

    /// Mark the attribute as immutable after create
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Set a default applied when configuration leaves the attribute unset
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Add a validator
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Ignore differences for which `f` returns true
    pub fn suppress_diff(mut self, f: DiffSuppressFn) -> Self {
        self.diff_suppress = Some(f);
        self
    }

    /// Whether `old` and `new` count as a change of this attribute
    pub fn differs(&self, old: &Value, new: &Value) -> bool {
        if self.mode == AttributeMode::OptionalComputed && is_zero_value(new) {
            return false;
        }
        if old == new || (is_zero_value(old) && is_zero_value(new)) {
            return false;
        }
        match self.diff_suppress {
            Some(suppress) => !suppress(old, new),
            None => true,
        }
    }

    /// Check that `value` has this attribute's type
    ///
    /// `null` is accepted for every type.
    pub fn check_type(&self, value: &Value) -> std::result::Result<(), String> {
        match (&self.ty, value) {
            (_, Value::Null) => Ok(()),
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),
            (AttributeType::Int, Value::Number(n)) if n.is_i64() => Ok(()),
            (AttributeType::StringSet, Value::Array(items)) => {
                let mut seen = Vec::with_capacity(items.len());
                for item in items {
                    let s = item
                        .as_str()
                        .ok_or_else(|| format!("{} elements must be strings", self.name))?;
                    if seen.contains(&s) {
                        return Err(format!("{} contains duplicate element {:?}", self.name, s));
                    }
                    seen.push(s);
                }
                Ok(())
            }
            (AttributeType::Block { max_items, attributes }, Value::Array(items)) => {
                if items.len() > *max_items {
                    return Err(format!(
                        "{}: attribute supports {} item maximum, config has {} declared",
                        self.name,
                        max_items,
                        items.len()
                    ));
                }
                for item in items {
                    let fields = item
                        .as_object()
                        .ok_or_else(|| format!("{} elements must be objects", self.name))?;
                    for (key, field_value) in fields {
                        let nested =
                            attributes.iter().find(|a| a.name == key).ok_or_else(|| {
                                format!("{}.{} is not a known attribute", self.name, key)
                            })?;
                        nested
                            .check_type(field_value)
                            .map_err(|e| format!("{}.{}", self.name, e))?;
                    }
                }
                Ok(())
            }
            (ty, other) => Err(format!(
                "{} expects {}, got {}",
                self.name,
                type_label(ty),
                other
            )),
        }
    }

    fn validate_value(&self, value: Option<&Value>, path: &str, errors: &mut Vec<String>) {
        let value = value.filter(|v| !v.is_null());

        let Some(value) = value else {
            if self.mode == AttributeMode::Required {
                errors.push(format!("{:?}: required field is not set", path));
            }
            return;
        };

        if let Err(e) = self.check_type(value) {
            errors.push(e);
            return;
        }

        if self.mode == AttributeMode::Required || !is_zero_value(value) {
            for validator in &self.validators {
                if let Err(e) = validator.check(path, value) {
                    errors.push(e);
                }
            }
        }

        if let (AttributeType::Block { attributes, .. }, Value::Array(items)) = (&self.ty, value) {
            for item in items {
                if let Some(fields) = item.as_object() {
                    for nested in attributes.iter().filter(|a| a.mode.is_configurable()) {
                        let nested_path = format!("{}.0.{}", path, nested.name);
                        nested.validate_value(fields.get(nested.name), &nested_path, errors);
                    }
                }
            }
        }
    }

    fn apply_default(&self, fields: &mut Map<String, Value>) {
        let is_set = fields.get(self.name).is_some_and(|v| !v.is_null());

        if !is_set {
            if let Some(default) = &self.default {
                fields.insert(self.name.to_string(), default.clone());
            }
            return;
        }

        if let AttributeType::Block { attributes, .. } = &self.ty
            && let Some(Value::Array(items)) = fields.get_mut(self.name)
        {
            for item in items.iter_mut() {
                if let Value::Object(nested) = item {
                    for attribute in attributes {
                        attribute.apply_default(nested);
                    }
                }
            }
        }
    }
}

fn type_label(ty: &AttributeType) -> &'static str {
    match ty {
        AttributeType::String => "a string",
        AttributeType::Bool => "a bool",
        AttributeType::Int => "an integer",
        AttributeType::StringSet => "a set of strings",
        AttributeType::Block { .. } => "a list of blocks",
    }
}

/// Attribute table of one resource type
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: Vec<Attribute>,
    /// Whether import by identifier is supported
    pub importable: bool,
}

impl ResourceSchema {
    /// Create an empty schema
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            attributes: Vec::new(),
            importable: false,
        }
    }

    /// Add an attribute
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Allow passthrough import by identifier
    pub fn importable(mut self) -> Self {
        self.importable = true;
        self
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Validate a configuration attribute map
    ///
    /// All problems are collected into one [`Error::InvalidInput`].
    pub fn validate(&self, config: &Map<String, Value>) -> Result<()> {
        let mut errors = Vec::new();

        for key in config.keys() {
            if self.get(key).is_none() {
                errors.push(format!("An argument named {:?} is not expected here", key));
            }
        }

        for attribute in self.attributes.iter().filter(|a| a.mode.is_configurable()) {
            attribute.validate_value(config.get(attribute.name), attribute.name, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "{}: {}",
                self.type_name,
                errors.join("; ")
            )))
        }
    }

    /// Fill unset attributes (and nested block attributes) with their defaults
    pub fn apply_defaults(&self, config: &mut Map<String, Value>) {
        for attribute in &self.attributes {
            attribute.apply_default(config);
        }
    }

    /// Type-check a value read back from the remote API
    pub fn check_value(&self, name: &str, value: &Value) -> Result<()> {
        let attribute = self.get(name).ok_or_else(|| {
            Error::shape_setting(self.type_name, name, "attribute is not declared in the schema")
        })?;
        attribute
            .check_type(value)
            .map_err(|message| Error::shape_setting(self.type_name, name, message))
    }

    /// Configurable, updatable attributes whose value differs between `old` and `new`
    ///
    /// Computed-only and force-new attributes never appear here.
    pub fn changed_attributes(
        &self,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
    ) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.mode.is_configurable() && !a.force_new)
            .filter(|a| a.differs(field(old, a.name), field(new, a.name)))
            .map(|a| a.name)
            .collect()
    }

    /// Force-new attributes whose value differs between `old` and `new`
    pub fn replacement_attributes(
        &self,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
    ) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.mode.is_configurable() && a.force_new)
            .filter(|a| a.differs(field(old, a.name), field(new, a.name)))
            .map(|a| a.name)
            .collect()
    }
}

fn field<'a>(map: &'a Map<String, Value>, name: &str) -> &'a Value {
    map.get(name).unwrap_or(&Value::Null)
}
