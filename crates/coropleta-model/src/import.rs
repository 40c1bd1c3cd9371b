//! CSV import of table rows.
//!
//! The caller owns I/O (anything `BufRead`); this module only converts CSV
//! text of the shape `region,a[,b]` into [`ValueRow`]s. Cell parsing is
//! lenient: an unparseable entry becomes [`CellValue::Text`] and surfaces as
//! a row-scoped derivation error later, so one bad cell never aborts the
//! import.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::BufRead;

use csv::ByteRecord;
use encoding_rs::WINDOWS_1252;
use thiserror::Error;

use crate::{canonical_key, CellValue, ValueRow};

#[derive(Clone, Debug)]
pub struct RowImportOptions {
    pub delimiter: u8,
    pub has_header: bool,
    /// How to decode raw CSV bytes into text fields.
    pub encoding: TextEncoding,
    /// Decimal separator used when parsing numbers.
    ///
    /// `.` matches inputs like `1234.56`; `,` matches inputs like `1234,56`.
    pub decimal_separator: char,
}

impl Default for RowImportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            encoding: TextEncoding::Auto,
            decimal_separator: '.',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    /// Attempt UTF-8; fields with invalid UTF-8 fall back to Windows-1252.
    ///
    /// This matches what spreadsheet exports of Spanish-language data most
    /// commonly produce.
    Auto,
    /// Decode as UTF-8 and reject invalid byte sequences.
    Utf8,
    /// Decode as Windows-1252 (aka CP-1252).
    Windows1252,
}

#[derive(Debug, Error)]
pub enum RowImportError {
    #[error("csv input was empty")]
    EmptyInput,
    #[error("csv parse error at row {row}: {reason}")]
    Parse { row: u64, reason: String },
    #[error("csv row {row} has no region name")]
    MissingRegion { row: u64 },
    #[error("duplicate region {name:?} at row {row}")]
    DuplicateRegion { name: String, row: u64 },
    #[error("csv field is not valid utf-8 at row {row}")]
    InvalidUtf8 { row: u64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Import CSV rows of the shape `region,a[,b]`.
///
/// The region column must be non-empty and unique (it is the join key for
/// everything downstream). A missing third column leaves cell B blank.
pub fn import_rows_csv<R: BufRead>(
    reader: R,
    options: &RowImportOptions,
) -> Result<Vec<ValueRow>, RowImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        // Headers are handled manually so row numbers stay consistent.
        .has_headers(false)
        // Accept rows with varying column counts.
        .flexible(true)
        .from_reader(reader);

    let mut record = ByteRecord::new();
    let mut row_number: u64 = 0;
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();
    let mut any = false;

    while csv_reader
        .read_byte_record(&mut record)
        .map_err(|e| map_csv_error(e, row_number + 1))?
    {
        row_number += 1;
        if options.has_header && row_number == 1 {
            any = true;
            continue;
        }
        any = true;

        if record.is_empty() {
            continue;
        }

        let name_raw = decode_field(record.get(0).unwrap_or(b""), options.encoding, row_number)?;
        let name = name_raw.trim();
        if name.is_empty() {
            return Err(RowImportError::MissingRegion { row: row_number });
        }
        if !seen.insert(canonical_key(name)) {
            return Err(RowImportError::DuplicateRegion {
                name: name.to_string(),
                row: row_number,
            });
        }

        let a = parse_cell(record.get(1), options, row_number)?;
        let b = parse_cell(record.get(2), options, row_number)?;
        rows.push(ValueRow::new(name, a, b));
    }

    if !any {
        return Err(RowImportError::EmptyInput);
    }
    Ok(rows)
}

fn parse_cell(
    raw: Option<&[u8]>,
    options: &RowImportOptions,
    row: u64,
) -> Result<CellValue, RowImportError> {
    let Some(raw) = raw else {
        return Ok(CellValue::Blank);
    };
    let text = decode_field(raw, options.encoding, row)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(CellValue::Blank);
    }
    Ok(parse_number(trimmed, options.decimal_separator)
        .map_or_else(|| CellValue::Text(trimmed.to_string()), CellValue::Number))
}

fn parse_number(text: &str, decimal_separator: char) -> Option<f64> {
    let normalized: Cow<'_, str> = if decimal_separator == '.' {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace(decimal_separator, "."))
    };
    let value: f64 = normalized.parse().ok()?;
    // `inf`/`nan` spellings parse but are meaningless table entries.
    value.is_finite().then_some(value)
}

fn decode_field(
    raw: &[u8],
    encoding: TextEncoding,
    row: u64,
) -> Result<String, RowImportError> {
    match encoding {
        TextEncoding::Auto => match std::str::from_utf8(raw) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Ok(WINDOWS_1252.decode(raw).0.into_owned()),
        },
        TextEncoding::Utf8 => std::str::from_utf8(raw)
            .map(str::to_string)
            .map_err(|_| RowImportError::InvalidUtf8 { row }),
        TextEncoding::Windows1252 => Ok(WINDOWS_1252.decode(raw).0.into_owned()),
    }
}

fn map_csv_error(err: csv::Error, row: u64) -> RowImportError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => RowImportError::Io(io),
        _ => RowImportError::Parse { row, reason },
    }
}
