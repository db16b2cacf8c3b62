//! Shared primitive types used across the engine.

use serde::{Deserialize, Serialize};

/// A calendar year. The unique key of every record.
pub type Year = u16;

/// Size of the Fortune Global 500 list, the eMNC share denominator.
pub const FORTUNE_GLOBAL_500: f64 = 500.0;

/// Result of a derived formula.
///
/// `Undefined` marks a zero denominator. It is a value, not an error, and
/// never collapses into NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Value(f64),
    Undefined,
}

impl MetricValue {
    /// `numerator / denominator`, or `Undefined` when the denominator is zero.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            Self::Undefined
        } else {
            Self::Value(numerator / denominator)
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Value(v) => Self::Value(f(v)),
            Self::Undefined => Self::Undefined,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}
