use std::fmt;
use std::hash::{Hash, Hasher};

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical join key for a region name.
///
/// Region names are the join key between the catalog, the editable table and
/// the renderer, and they arrive from independently-typed sources. The
/// canonical form is NFKD-normalized with combining marks stripped,
/// lowercased, and whitespace-collapsed, so `"Andalucía"`, `"andalucia"` and
/// `" ANDALUCÍA "` all join.
pub fn canonical_key(name: &str) -> String {
    let stripped: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A region name: the display spelling plus its precomputed canonical key.
///
/// Equality, ordering and hashing all use the canonical key; the display form
/// preserves whatever the source spelled.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RegionName {
    display: String,
    key: String,
}

impl RegionName {
    pub fn new(display: impl Into<String>) -> Self {
        let display = display.into();
        let key = canonical_key(&display);
        Self { display, key }
    }

    /// The spelling as entered / loaded.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The canonical join key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for RegionName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RegionName {}

impl PartialOrd for RegionName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegionName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for RegionName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl From<String> for RegionName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for RegionName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<RegionName> for String {
    fn from(value: RegionName) -> Self {
        value.display
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// A named geographic region with its polygon geometry.
///
/// Identity is the name. Geometry is owned by the catalog and mutated only by
/// the catalog's relocation operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: RegionName,
    pub geometry: MultiPolygon<f64>,
    /// Filtered out of the current view. Excluded regions stay in the catalog
    /// and return (with zeroed rows) when re-included.
    #[serde(default)]
    pub excluded: bool,
}

impl Region {
    pub fn new(name: impl Into<RegionName>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            geometry,
            excluded: false,
        }
    }
}
