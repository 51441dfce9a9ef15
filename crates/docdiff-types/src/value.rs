//! In-memory document model.
//!
//! A [`Value`] is parsed fresh from a document for every comparison, so trees
//! never contain cycles and never share sub-trees across the two sides of a
//! diff. Objects are kept in a `BTreeMap`, which makes key iteration (and thus
//! every rendering) lexicographic and stable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON number compared by numeric value rather than textual form.
///
/// Comparison is exact: integers against integers, floats against floats,
/// and a float against an integer only when the float is integral and has
/// exactly that value. `1`, `1.0` and `1e0` are all equal, while
/// `9007199254740993` and `9007199254740992.0` are not.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(serde_json::Number);

impl Number {
    /// Wrap a finite float. Returns `None` for NaN and infinities, which JSON
    /// cannot represent.
    pub fn from_f64(f: f64) -> Option<Self> {
        serde_json::Number::from_f64(f).map(Self)
    }

    /// The value as `f64` (lossy for very large integers).
    pub fn as_f64(&self) -> f64 {
        // Every serde_json number has an f64 view.
        self.0.as_f64().unwrap_or(f64::NAN)
    }

    /// The value as `i64`, if it is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// Returns `true` if the number was written with a fraction or exponent.
    pub fn is_float(&self) -> bool {
        self.0.is_f64()
    }

    /// The underlying serde_json number.
    pub fn as_json(&self) -> &serde_json::Number {
        &self.0
    }

    fn as_integer(&self) -> Option<i128> {
        self.0
            .as_i64()
            .map(i128::from)
            .or_else(|| self.0.as_u64().map(i128::from))
    }
}

/// A float equals an integer only when it is integral and exactly that
/// integer; a saturating cast cannot reach the i64/u64 range from outside.
fn float_equals_integer(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f as i128 == i
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_integer(), other.as_integer()) {
            (Some(x), Some(y)) => x == y,
            (Some(i), None) => float_equals_integer(other.as_f64(), i),
            (None, Some(i)) => float_equals_integer(self.as_f64(), i),
            (None, None) => self.as_f64() == other.as_f64(),
        }
    }
}

// JSON has no NaN, so numeric equality is reflexive.
impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<serde_json::Number> for Number {
    fn from(n: serde_json::Number) -> Self {
        Self(n)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self(n.into())
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Self(n.into())
    }
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns `true` for the leaf kinds (null, bool, number, string).
    pub fn is_scalar(self) -> bool {
        !matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// A parsed semi-structured document.
///
/// Equality is deep structural equality with numeric comparison for numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` for null, bool, number and string values.
    pub fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a field of an object. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Convert into a `serde_json::Value` (keys stay sorted).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Value::Number(n.0.clone()),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// Pretty-printed JSON with two-space indentation and sorted keys.
    pub fn to_pretty_string(&self) -> String {
        // Serializing a serde_json::Value cannot fail: all keys are strings.
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
    }

    /// A copy of this tree with every object field named `key` removed, at
    /// any depth.
    pub fn without_key(&self, key: &str) -> Value {
        match self {
            Self::Array(items) => Self::Array(items.iter().map(|v| v.without_key(key)).collect()),
            Self::Object(map) => Self::Object(
                map.iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| (k.clone(), v.without_key(key)))
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }
}

/// Compact JSON rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(Number(n)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
