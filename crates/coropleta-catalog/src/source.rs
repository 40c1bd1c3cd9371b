use geo::MultiPolygon;
use thiserror::Error;

/// A transport-independent provider of `(name, geometry)` pairs.
///
/// File, URL or in-memory: the catalog does not care. Implementations own
/// all I/O and format parsing; the catalog only validates the result set
/// (non-empty, unique names).
pub trait RegionSource {
    /// Human-readable identity of this source, used in diagnostics and as
    /// part of cache keys.
    fn describe(&self) -> String;

    /// Produce the full `(name, geometry)` sequence.
    fn load(&self) -> Result<Vec<(String, MultiPolygon<f64>)>, SourceError>;
}

/// Failure inside one source strategy.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source could not be read: {0}")]
    Read(String),
    #[error("source could not be parsed: {0}")]
    Parse(String),
}

/// A source over data already resident in memory.
///
/// Hosts that fetch and parse geometry themselves (the usual arrangement)
/// hand the result to the catalog through this adapter.
#[derive(Clone, Debug)]
pub struct StaticSource {
    name: String,
    regions: Vec<(String, MultiPolygon<f64>)>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, regions: Vec<(String, MultiPolygon<f64>)>) -> Self {
        Self {
            name: name.into(),
            regions,
        }
    }
}

impl RegionSource for StaticSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<Vec<(String, MultiPolygon<f64>)>, SourceError> {
        Ok(self.regions.clone())
    }
}
