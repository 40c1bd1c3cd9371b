use serde::{Deserialize, Serialize};

use crate::{CellValue, Derived, RegionName};

/// User-facing labels for the two input columns.
///
/// Labels are presentation only; they never participate in lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnLabels {
    pub a: String,
    pub b: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            a: "A".to_string(),
            b: "B".to_string(),
        }
    }
}

/// One editable table row: a region plus its two input cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRow {
    pub region: RegionName,
    pub a: CellValue,
    pub b: CellValue,
}

impl ValueRow {
    pub fn new(region: impl Into<RegionName>, a: CellValue, b: CellValue) -> Self {
        Self {
            region: region.into(),
            a,
            b,
        }
    }

    /// The zero-seeded row a freshly built view starts from.
    pub fn zeroed(region: impl Into<RegionName>) -> Self {
        Self::new(region, CellValue::Number(0.0), CellValue::Number(0.0))
    }
}

/// One row after derivation: the region plus its derived outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub region: RegionName,
    pub derived: Derived,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_rows_start_at_zero() {
        let row = ValueRow::zeroed("Murcia");
        assert_eq!(row.a, CellValue::Number(0.0));
        assert_eq!(row.b, CellValue::Number(0.0));
    }
}
