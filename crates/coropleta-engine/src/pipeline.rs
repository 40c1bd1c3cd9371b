use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use coropleta_model::{canonical_key, ColumnLabels, Derived, Operation, Region, ValueRow};

use crate::classify::{
    classify, Classification, ClassifyError, InsufficientDistinctValues, Scheme, DEFAULT_BUCKETS,
};
use crate::derive::derive_rows;
use crate::join::{join, UnmatchedRegion};

/// Everything one generate action is configured with, received as plain
/// immutable values from the table-input collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub operation: Operation,
    pub scheme: Scheme,
    pub buckets: usize,
    pub title: String,
    /// Renderer palette name, pass-through (e.g. "Blues"); the core only
    /// guarantees ordinal bucket correctness.
    pub palette: String,
    /// Unit suffix for legend labels (e.g. "hab/km²").
    pub unit: String,
    pub labels: ColumnLabels,
    /// Region names excluded from this invocation's view and row set.
    pub excluded: Vec<String>,
}

impl Default for MapSpec {
    fn default() -> Self {
        Self {
            operation: Operation::default(),
            scheme: Scheme::default(),
            buckets: DEFAULT_BUCKETS,
            title: String::new(),
            palette: "Blues".to_string(),
            unit: String::new(),
            labels: ColumnLabels::default(),
            excluded: Vec::new(),
        }
    }
}

/// One region ready for rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionBinding {
    pub region: Region,
    pub derived: Derived,
    /// Ordinal bucket index; `None` is the renderer's "no data" category.
    pub bucket: Option<usize>,
}

/// Non-fatal diagnostics accumulated across the pipeline, returned alongside
/// the successful partial result.
#[derive(Clone, Debug, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineWarning {
    #[error(transparent)]
    Unmatched(UnmatchedRegion),
    #[error(transparent)]
    ReducedBuckets(InsufficientDistinctValues),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// The renderer hand-off: classified bindings plus everything the legend and
/// caption need. Owned entirely by the invocation that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapFrame {
    pub title: String,
    pub palette: String,
    pub unit: String,
    pub column_labels: ColumnLabels,
    /// Sorted by canonical region name.
    pub bindings: Vec<RegionBinding>,
    pub classification: Classification,
    /// Ascending legend labels, one per bucket.
    pub legend: Vec<String>,
    pub warnings: Vec<PipelineWarning>,
}

impl fmt::Display for MapFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} regions, {} buckets, {} warnings)",
            if self.title.is_empty() {
                "untitled map"
            } else {
                self.title.as_str()
            },
            self.bindings.len(),
            self.classification.k(),
            self.warnings.len()
        )
    }
}

/// Run the full pipeline for one generate action: Derive → Join → Classify.
///
/// `regions` is the loaded catalog view and `rows` the table as edited; both
/// are borrowed immutably and the result is owned by this invocation. Rows
/// whose derivation failed are carried through as "no data" bindings. The
/// only fatal outcome here is a row/value set with nothing classifiable in
/// it; every other fault degrades to a [`PipelineWarning`].
pub fn generate(
    regions: &[Region],
    rows: &[ValueRow],
    spec: &MapSpec,
) -> Result<MapFrame, PipelineError> {
    // The exclusion toggle removes a region from both sides of the join.
    let excluded: HashSet<String> = spec.excluded.iter().map(|n| canonical_key(n)).collect();
    let active: Vec<Region> = regions
        .iter()
        .filter(|r| !r.excluded && !excluded.contains(r.name.key()))
        .cloned()
        .collect();
    let rows: Vec<ValueRow> = rows
        .iter()
        .filter(|r| !excluded.contains(r.region.key()))
        .cloned()
        .collect();

    let derived = derive_rows(&rows, &spec.operation);
    let joined = join(&active, &derived);
    let mut warnings: Vec<PipelineWarning> = joined
        .warnings
        .into_iter()
        .map(PipelineWarning::Unmatched)
        .collect();

    let values: Vec<f64> = joined
        .pairs
        .iter()
        .filter_map(|(_, row)| row.derived.value())
        .collect();
    let classification = classify(&values, spec.scheme, spec.buckets)?;
    if let Some(reduction) = classification.reduction {
        warnings.push(PipelineWarning::ReducedBuckets(reduction));
    }

    let bindings = joined
        .pairs
        .into_iter()
        .map(|(region, row)| {
            let bucket = row
                .derived
                .value()
                .and_then(|v| classification.bucket_of(v));
            RegionBinding {
                region,
                derived: row.derived,
                bucket,
            }
        })
        .collect();

    let legend = classification.labels(&spec.unit);
    Ok(MapFrame {
        title: spec.title.clone(),
        palette: spec.palette.clone(),
        unit: spec.unit.clone(),
        column_labels: spec.labels.clone(),
        bindings,
        classification,
        legend,
        warnings,
    })
}
