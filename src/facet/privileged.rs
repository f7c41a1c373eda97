use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Value;

/// Rule deciding which values of a protected attribute are privileged.
/// Every value the rule does not match, nulls included, is unprivileged.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum Privileged {
    /// A single privileged value (binary attributes).
    Value(Value),
    /// Any of a set of privileged values (categorical attributes).
    AnyOf(Vec<Value>),
    /// Numeric values within `lo..=hi` (numerical attributes).
    Range { lo: f64, hi: f64 },
}

impl Privileged {
    /// Privileged iff the cell equals `value`.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Privileged iff the cell equals one of `values`.
    pub fn any_of<I, V>(values: I) -> Self where I: IntoIterator<Item = V>, V: Into<Value> {
        Self::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Privileged iff the cell is numeric and lies in the closed interval `[lo, hi]`.
    pub fn range(lo: f64, hi: f64) -> Self {
        Self::Range { lo, hi }
    }

    /// Check whether a single cell falls in the privileged facet.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Privileged::Value(privileged) => value == privileged,
            Privileged::AnyOf(privileged) => privileged.contains(value),
            Privileged::Range { lo, hi } => value.as_f64().is_some_and(|x| *lo <= x && x <= *hi),
        }
    }
}

impl fmt::Display for Privileged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Privileged::Value(value) => write!(f, "== {value:?}"),
            Privileged::AnyOf(values) => write!(f, "in {values:?}"),
            Privileged::Range { lo, hi } => write!(f, "in [{lo}, {hi}]"),
        }
    }
}

impl fmt::Debug for Privileged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Privileged({self})")
    }
}
