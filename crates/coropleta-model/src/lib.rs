//! `coropleta-model` defines the core in-memory data structures shared by the
//! choropleth pipeline.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the region catalog (loading, relocation, exclusion policies)
//! - the derivation/classification engine
//! - host boundaries via `serde` (JSON-safe schema)
//!
//! Geometry is represented with [`geo`] types and treated as opaque content:
//! nothing in this crate inspects coordinates beyond carrying them.

mod cell;
mod derived;
pub mod import;
mod operation;
mod region;
mod row;

pub use cell::CellValue;
pub use derived::{Derived, DeriveError};
pub use import::{import_rows_csv, RowImportError, RowImportOptions, TextEncoding};
pub use operation::Operation;
pub use region::{canonical_key, Region, RegionName};
pub use row::{ColumnLabels, DerivedRow, ValueRow};
