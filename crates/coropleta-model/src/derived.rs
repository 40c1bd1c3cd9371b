use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Row-scoped derivation failure.
///
/// Each row fails independently; a failed row is excluded from
/// classification and rendered as "no data", never aborting the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeriveError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("missing input")]
    MissingInput,
    #[error("non-numeric input")]
    NonNumeric,
    #[error("non-finite result")]
    NonFinite,
}

impl DeriveError {
    /// Short stable code for diagnostics and renderer legends.
    pub fn as_code(self) -> &'static str {
        match self {
            DeriveError::DivisionByZero => "div/0",
            DeriveError::MissingInput => "missing",
            DeriveError::NonNumeric => "non-numeric",
            DeriveError::NonFinite => "non-finite",
        }
    }
}

/// Outcome of deriving one row: a finite value or a row-scoped error.
///
/// Exactly one of the two holds per row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Derived {
    Value(f64),
    Error(DeriveError),
}

impl Derived {
    pub fn is_error(&self) -> bool {
        matches!(self, Derived::Error(_))
    }

    /// The derived value, if the row derived cleanly.
    pub fn value(&self) -> Option<f64> {
        match self {
            Derived::Value(v) => Some(*v),
            Derived::Error(_) => None,
        }
    }
}

impl From<f64> for Derived {
    fn from(value: f64) -> Self {
        Derived::Value(value)
    }
}

impl From<DeriveError> for Derived {
    fn from(value: DeriveError) -> Self {
        Derived::Error(value)
    }
}

impl fmt::Display for Derived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derived::Value(v) => write!(f, "{v}"),
            Derived::Error(e) => f.write_str(e.as_code()),
        }
    }
}
