//! `coropleta-catalog` produces the canonical, display-ready set of regions.
//!
//! Loading goes through an explicit ordered list of [`RegionSource`]
//! strategies; each failure is recorded in a structured [`DataUnavailable`]
//! cause chain rather than swallowed. A loaded catalog is immutable for the
//! rest of the session and shared read-only via [`CatalogCache`].
//!
//! Two display policies live here as well:
//! - [`RegionCatalog::relocate`] translates one region's geometry by a fixed
//!   offset (bringing distant territories visually near the mainland);
//! - [`RegionCatalog::view`] filters an exclusion set into the active view
//!   the downstream row set derives from.

mod cache;
mod catalog;
mod source;

pub use cache::CatalogCache;
pub use catalog::{CatalogView, DataUnavailable, FailedAttempt, LoadFailure, RegionCatalog};
pub use source::{RegionSource, SourceError, StaticSource};

/// Display offset conventionally applied to the Canary Islands so they sit
/// near the peninsula instead of off the African coast.
pub const CANARY_DISPLAY_OFFSET: (f64, f64) = (5.5, 7.5);
