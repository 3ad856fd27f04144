//! Record representation for validation.
//!
//! A record is whatever payload a caller wants checked, already deserialized
//! from its transport. It is modeled as a tagged union so the validators can
//! pattern-match on the dynamic kind of every node.

use indexmap::IndexMap;
use std::borrow::Cow;

/// A value in a record tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecordValue {
    /// Null/missing value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Whole-number value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Sequence of values
    Array(Vec<RecordValue>),
    /// Key/value mapping, in insertion order
    Object(IndexMap<String, RecordValue>),
}

impl RecordValue {
    /// Parses a record from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(value.into())
    }

    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, RecordValue::Null)
    }

    /// Returns true for integer and floating point values.
    pub fn is_number(&self) -> bool {
        matches!(self, RecordValue::Integer(_) | RecordValue::Float(_))
    }

    /// Returns the kind name of this value, using schema type vocabulary.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RecordValue::Null => "null",
            RecordValue::Bool(_) => "boolean",
            RecordValue::Integer(_) => "integer",
            RecordValue::Float(_) => "float",
            RecordValue::String(_) => "string",
            RecordValue::Array(_) => "array",
            RecordValue::Object(_) => "object",
        }
    }

    /// Attempts to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RecordValue::Float(f) => Some(*f),
            RecordValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RecordValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a sequence.
    pub fn as_array(&self) -> Option<&[RecordValue]> {
        match self {
            RecordValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to get this value as a mapping.
    pub fn as_object(&self) -> Option<&IndexMap<String, RecordValue>> {
        match self {
            RecordValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns the string form used by pattern and format checks.
    ///
    /// Strings are returned verbatim, floats keep their fractional part
    /// (`1500.0`), and containers render as compact JSON.
    pub fn string_form(&self) -> Cow<'_, str> {
        match self {
            RecordValue::String(s) => Cow::Borrowed(s),
            RecordValue::Null => Cow::Borrowed("null"),
            RecordValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            RecordValue::Integer(i) => Cow::Owned(i.to_string()),
            RecordValue::Float(f) => Cow::Owned(format!("{f:?}")),
            RecordValue::Array(_) | RecordValue::Object(_) => Cow::Owned(self.to_json().to_string()),
        }
    }

    /// Compares two values, treating integers and floats numerically.
    pub fn loosely_equals(&self, other: &RecordValue) -> bool {
        match (self, other) {
            (a, b) if a.is_number() && b.is_number() => a.as_f64() == b.as_f64(),
            (RecordValue::Array(a), RecordValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_equals(y))
            }
            (RecordValue::Object(a), RecordValue::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|other| v.loosely_equals(other)))
            }
            (a, b) => a == b,
        }
    }

    /// Converts this value back into a `serde_json::Value`.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            RecordValue::Null => Value::Null,
            RecordValue::Bool(b) => Value::Bool(*b),
            RecordValue::Integer(i) => Value::from(*i),
            RecordValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            RecordValue::String(s) => Value::String(s.clone()),
            RecordValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            RecordValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for RecordValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RecordValue::Null,
            Value::Bool(b) => RecordValue::Bool(b),
            // Numbers that do not fit i64 (large u64 values) fall back to floats.
            Value::Number(n) => match n.as_i64() {
                Some(i) => RecordValue::Integer(i),
                None => RecordValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RecordValue::String(s),
            Value::Array(items) => RecordValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                RecordValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for RecordValue {
    fn from(value: &serde_json::Value) -> Self {
        value.clone().into()
    }
}

impl From<String> for RecordValue {
    fn from(s: String) -> Self {
        RecordValue::String(s)
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        RecordValue::String(s.to_string())
    }
}

impl From<i64> for RecordValue {
    fn from(i: i64) -> Self {
        RecordValue::Integer(i)
    }
}

impl From<f64> for RecordValue {
    fn from(f: f64) -> Self {
        RecordValue::Float(f)
    }
}

impl From<bool> for RecordValue {
    fn from(b: bool) -> Self {
        RecordValue::Bool(b)
    }
}

impl From<Vec<RecordValue>> for RecordValue {
    fn from(items: Vec<RecordValue>) -> Self {
        RecordValue::Array(items)
    }
}

impl From<IndexMap<String, RecordValue>> for RecordValue {
    fn from(map: IndexMap<String, RecordValue>) -> Self {
        RecordValue::Object(map)
    }
}
