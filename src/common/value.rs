use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};

/// A single dataframe cell, reduced to the handful of shapes the metrics care about.
///
/// Floats holding an exact integer are stored as `Int`, so `1` and `1.0` compare equal.
/// Booleans compare as the numbers `0` and `1`. The total order is `Null < numbers < Str`,
/// with floats ordered by `total_cmp`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged, from = "RawValue")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Wire shape of [`Value`]; deserialized values are re-normalized on the way in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(b),
            RawValue::Int(i) => Value::Int(i),
            RawValue::Float(f) => Value::float(f),
            RawValue::Str(s) => Value::Str(s),
        }
    }
}

impl Value {
    /// Build a numeric value, folding integral floats into `Int`.
    pub fn float(value: f64) -> Self {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Value::Int(value as i64)
        } else {
            Value::Float(value)
        }
    }

    #[inline] pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Numeric view of the value, used for threshold and range comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Null | Value::Str(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => 1,
            Value::Str(_) => 2,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Bool(a), Value::Int(_) | Value::Float(_)) => Value::Int(*a as i64).cmp(other),
            (Value::Int(_) | Value::Float(_), Value::Bool(b)) => self.cmp(&Value::Int(*b as i64)),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            // Ties between an Int and a Float only happen at the edge of the i64 range;
            // break them by variant so Eq stays consistent with Hash.
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => (*b as i64).hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl From<&AnyValue<'_>> for Value {
    fn from(value: &AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Value::Null,
            AnyValue::Boolean(b) => Value::Bool(*b),
            AnyValue::String(s) => Value::Str(s.to_string()),
            AnyValue::StringOwned(s) => Value::Str(s.to_string()),
            AnyValue::Int32(v) => Value::Int(*v as i64),
            AnyValue::Int64(v) => Value::Int(*v),
            AnyValue::UInt32(v) => Value::Int(*v as i64),
            AnyValue::UInt64(v) => i64::try_from(*v).map(Value::Int).unwrap_or(Value::Float(*v as f64)),
            AnyValue::Float32(v) => Value::float(*v as f64),
            AnyValue::Float64(v) => Value::float(*v),
            other => match other.extract::<f64>() {
                Some(number) => Value::float(number),
                None => Value::Str(format!("{other}")),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Value::Bool(value) }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self { Value::Int(value as i64) }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self { Value::Int(value) }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self { Value::Int(value as i64) }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self { Value::float(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::Str(value.to_string()) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Value::Str(value) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            other => fmt::Display::fmt(other, f),
        }
    }
}
