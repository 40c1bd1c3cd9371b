use coropleta_model::{CellValue, Derived, DeriveError, DerivedRow, Operation, ValueRow};

/// Compute the derived value for every row.
///
/// Pure function of rows + operation. Each row succeeds or fails on its own;
/// a bad cell in one row never aborts the batch.
pub fn derive_rows(rows: &[ValueRow], operation: &Operation) -> Vec<DerivedRow> {
    rows.iter()
        .map(|row| DerivedRow {
            region: row.region.clone(),
            derived: match derive_value(row, operation) {
                Ok(value) => Derived::Value(value),
                Err(err) => Derived::Error(err),
            },
        })
        .collect()
}

fn derive_value(row: &ValueRow, operation: &Operation) -> Result<f64, DeriveError> {
    let a = numeric(&row.a)?;
    let value = match *operation {
        Operation::RawPassthrough => a,
        Operation::Rate { multiplier } => div(a, numeric(&row.b)?)? * multiplier,
        Operation::Divide => div(a, numeric(&row.b)?)?,
        Operation::Multiply => a * numeric(&row.b)?,
        Operation::PercentDifference => {
            let b = numeric(&row.b)?;
            div(a - b, b)? * 100.0
        }
        Operation::Sum => a + numeric(&row.b)?,
    };
    // Overflow to ±inf must not reach the classifier.
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DeriveError::NonFinite)
    }
}

fn numeric(cell: &CellValue) -> Result<f64, DeriveError> {
    match cell {
        CellValue::Blank => Err(DeriveError::MissingInput),
        CellValue::Text(_) => Err(DeriveError::NonNumeric),
        CellValue::Number(n) if !n.is_finite() => Err(DeriveError::NonFinite),
        CellValue::Number(n) => Ok(*n),
    }
}

/// IEEE division with the zero denominator reported instead of plotted.
fn div(a: f64, b: f64) -> Result<f64, DeriveError> {
    if b == 0.0 {
        Err(DeriveError::DivisionByZero)
    } else {
        Ok(a / b)
    }
}
