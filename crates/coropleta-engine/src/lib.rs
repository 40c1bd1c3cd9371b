#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! Derivation, join and classification: the compute core of the choropleth
//! pipeline.
//!
//! Each generate action runs [`generate`] as a pure request/response
//! pipeline (Derive, then Join, then Classify) over an immutable region view
//! and row set. Row-scoped failures ([`coropleta_model::DeriveError`]) and join
//! mismatches travel alongside the successful partial result as
//! [`PipelineWarning`]s; only the absence of any classifiable value is fatal
//! to an invocation.
//!
//! The renderer is an external collaborator behind [`MapRenderer`]; this
//! crate guarantees the tuple shape and ordinal bucket semantics, never
//! colors or styling.

pub mod classify;
mod derive;
mod join;
mod pipeline;
mod render;

pub use classify::{
    classify, Bucket, Classification, ClassifyError, InsufficientDistinctValues, Scheme,
    DEFAULT_BUCKETS,
};
pub use derive::derive_rows;
pub use join::{join, Joined, UnmatchedRegion};
pub use pipeline::{generate, MapFrame, MapSpec, PipelineError, PipelineWarning, RegionBinding};
pub use render::MapRenderer;
