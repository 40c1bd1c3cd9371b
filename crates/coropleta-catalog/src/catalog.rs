use std::collections::HashSet;
use std::fmt;

use geo::Translate;
use thiserror::Error;

use coropleta_model::{canonical_key, Region, ValueRow};

use crate::source::{RegionSource, SourceError};

/// Why one loader strategy was rejected.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("source produced no regions")]
    Empty,
    #[error("duplicate region name {0:?}")]
    DuplicateName(String),
}

/// One rejected loader strategy: which source, and why.
#[derive(Debug)]
pub struct FailedAttempt {
    pub source: String,
    pub failure: LoadFailure,
}

/// Every loader strategy failed. Fatal for the session; the caller may retry
/// the whole load, the catalog never retries on its own.
#[derive(Debug)]
pub struct DataUnavailable {
    pub attempts: Vec<FailedAttempt>,
}

impl fmt::Display for DataUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no region source could be loaded")?;
        for attempt in &self.attempts {
            write!(f, "; {}: {}", attempt.source, attempt.failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for DataUnavailable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.attempts
            .first()
            .map(|a| &a.failure as &(dyn std::error::Error + 'static))
    }
}

/// The loaded set of named regions for one session.
///
/// Region names are unique and stable across reloads; they are the join key
/// for every later pipeline step.
#[derive(Clone, Debug)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Try each source in order; the first one that yields a valid region set
    /// wins. Failures fall through to the next strategy with the cause
    /// recorded, and an all-fail returns [`DataUnavailable`] listing every
    /// attempt.
    pub fn load(sources: &[&dyn RegionSource]) -> Result<Self, DataUnavailable> {
        let mut attempts = Vec::new();
        for source in sources {
            let described = source.describe();
            let outcome = source
                .load()
                .map_err(LoadFailure::from)
                .and_then(Self::from_pairs);
            match outcome {
                Ok(catalog) => {
                    log::debug!(
                        "region catalog loaded from {described}: {} regions",
                        catalog.len()
                    );
                    return Ok(catalog);
                }
                Err(failure) => {
                    log::warn!("region source {described} failed: {failure}");
                    attempts.push(FailedAttempt {
                        source: described,
                        failure,
                    });
                }
            }
        }
        Err(DataUnavailable { attempts })
    }

    fn from_pairs(pairs: Vec<(String, geo::MultiPolygon<f64>)>) -> Result<Self, LoadFailure> {
        if pairs.is_empty() {
            return Err(LoadFailure::Empty);
        }
        let mut seen = HashSet::new();
        let mut regions = Vec::with_capacity(pairs.len());
        for (name, geometry) in pairs {
            if !seen.insert(canonical_key(&name)) {
                return Err(LoadFailure::DuplicateName(name));
            }
            regions.push(Region::new(name, geometry));
        }
        regions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { regions })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All regions, sorted by canonical name.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = canonical_key(name);
        self.regions.iter().any(|r| r.name.key() == key)
    }

    /// Translate the named region's geometry by `(dx, dy)`. Returns whether a
    /// region was moved; an absent name is a no-op.
    ///
    /// Repeated calls compound the offset; apply at most once per session.
    pub fn relocate(&mut self, name: &str, dx: f64, dy: f64) -> bool {
        let key = canonical_key(name);
        match self.regions.iter_mut().find(|r| r.name.key() == key) {
            Some(region) => {
                region.geometry = region.geometry.translate(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Build the active view for the given exclusion set.
    ///
    /// Non-destructive: excluded regions stay in the catalog and reappear
    /// (with zeroed rows) once the exclusion set no longer names them. Must
    /// be recomputed whenever the exclusion set changes, since the row set
    /// derives from it.
    pub fn view<S: AsRef<str>>(&self, excluded: &[S]) -> CatalogView {
        let keys: HashSet<String> = excluded
            .iter()
            .map(|name| canonical_key(name.as_ref()))
            .collect();
        let regions = self
            .regions
            .iter()
            .map(|r| {
                let mut region = r.clone();
                region.excluded = keys.contains(region.name.key());
                region
            })
            .collect();
        CatalogView { regions }
    }

    /// The catalog minus the named regions.
    pub fn exclude<S: AsRef<str>>(&self, excluded: &[S]) -> Vec<Region> {
        self.view(excluded).active().cloned().collect()
    }
}

/// One exclusion set applied to a catalog: every region, flagged.
#[derive(Clone, Debug)]
pub struct CatalogView {
    regions: Vec<Region>,
}

impl CatalogView {
    /// All regions, excluded ones flagged (renderers may still outline them).
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions participating in the current view.
    pub fn active(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| !r.excluded)
    }

    /// The zero-seeded row set for the active regions, one row each.
    pub fn rows(&self) -> Vec<ValueRow> {
        self.active()
            .map(|r| ValueRow::zeroed(r.name.clone()))
            .collect()
    }
}
