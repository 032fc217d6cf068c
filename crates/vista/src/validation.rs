//! Validation rules whose failures are flashed to the session.

use std::fmt;

/// A validation rule.
pub trait Rule: fmt::Debug + Send + Sync {
    fn is_valid(&self, value: &str) -> bool;

    /// Message shown next to a field that failed this rule.
    fn message(&self) -> String;
}

/// Numeric value within `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Between {
    pub min: f64,
    pub max: f64,
}

impl Between {
    pub fn new(min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

impl Rule for Between {
    fn is_valid(&self, value: &str) -> bool {
        value
            .trim()
            .parse::<f64>()
            .is_ok_and(|n| n >= self.min && n <= self.max)
    }

    fn message(&self) -> String {
        format!("Value should be between {} and {}", self.min, self.max)
    }
}

/// Only ASCII letters and digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlphaNumeric;

impl Rule for AlphaNumeric {
    fn is_valid(&self, value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
    }

    fn message(&self) -> String {
        "Value should only contain alphanumeric characters".to_string()
    }
}
