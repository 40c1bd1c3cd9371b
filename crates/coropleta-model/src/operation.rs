use serde::{Deserialize, Serialize};

/// The derivation applied to each row's input columns.
///
/// A closed tagged union rather than user-named column lookups: column labels
/// are display metadata only, and the operation is resolved once at the
/// pipeline boundary. Immutable per generate invocation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// `A`: plot column A as entered.
    RawPassthrough,
    /// `(A / B) * multiplier`, e.g. rate per 1 000 inhabitants.
    Rate { multiplier: f64 },
    /// `A / B`.
    Divide,
    /// `A * B`.
    Multiply,
    /// `((A - B) / B) * 100`.
    PercentDifference,
    /// `A + B`.
    Sum,
}

impl Default for Operation {
    fn default() -> Self {
        Operation::RawPassthrough
    }
}

impl Operation {
    /// Whether column B participates. [`Operation::RawPassthrough`] reads
    /// only column A; B is ignored entirely, whatever it holds.
    #[must_use]
    pub fn uses_second_column(&self) -> bool {
        !matches!(self, Operation::RawPassthrough)
    }
}
