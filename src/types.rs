//! Value types shared by the configuration records.
//!
//! Records are open mappings, so individual attributes are kept as untyped
//! [`FieldValue`]s and rendered exactly as they were written.

use std::fmt;

use serde::Deserialize;
use serde_yaml::Value;
use strum::{Display, EnumIter, EnumString};

/// Discriminator stored under the `option` key of every record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RecordKind {
    General,
    Machine,
}

impl RecordKind {
    /// Key holding the discriminator in each record
    pub const KEY: &'static str = "option";

    /// Read the discriminator of a record, if it has a known one.
    pub fn of(record: &Value) -> Option<Self> {
        record
            .get(Self::KEY)
            .and_then(Value::as_str)
            .and_then(|kind| kind.parse().ok())
    }
}

/// A single attribute value, printed as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(pub Value);

impl FieldValue {
    /// Absent, null and `false` are falsy; anything else counts as set.
    ///
    /// Plain `no`/`off` already arrive here as `false` (see `yaml11`), while
    /// a quoted `"no"` stays a string and is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self.0, Value::Null | Value::Bool(false))
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self(Value::Bool(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self(Value::Number(value.into()))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, &self.0)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => Ok(()),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => write!(f, "{}", n),
        Value::String(s) => f.write_str(s),
        Value::Tagged(tagged) => write_value(f, &tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => match serde_json::to_string(value) {
            Ok(json) => f.write_str(&json),
            // Mappings with non-string keys have no JSON form
            Err(_) => write!(f, "{:?}", value),
        },
    }
}

/// Renders an optional field, with absence printed as the empty string.
pub struct Shown<'a>(pub Option<&'a FieldValue>);

impl fmt::Display for Shown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => Ok(()),
        }
    }
}

/// One customization override from a machine's `vm_mods` list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VmMod {
    #[serde(default)]
    pub option: Option<FieldValue>,
    #[serde(default)]
    pub value: Option<FieldValue>,
}

impl VmMod {
    pub fn new(option: impl Into<FieldValue>, value: impl Into<FieldValue>) -> Self {
        Self {
            option: Some(option.into()),
            value: Some(value.into()),
        }
    }
}
