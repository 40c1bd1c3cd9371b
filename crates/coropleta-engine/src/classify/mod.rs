//! Fixed-bucket interval classification.
//!
//! Values are classified into at most [`DEFAULT_BUCKETS`] contiguous,
//! ascending intervals by either natural breaks (Fisher–Jenks) or quantiles.
//! The classifier never fails on ties or small inputs: with fewer distinct
//! values than requested buckets it reduces the bucket count and reports the
//! reduction, since the legend the caller renders changes shape.

mod jenks;
mod quantiles;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// The bucket count every variant of the original applications requested.
pub const DEFAULT_BUCKETS: usize = 4;

/// Classification scheme, a configuration choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Minimize within-bucket variance (Fisher–Jenks).
    NaturalBreaks,
    /// Equal-count buckets from order statistics.
    Quantiles,
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::NaturalBreaks
    }
}

/// One contiguous value interval, `[lower, upper]` for the first bucket and
/// `(lower, upper]` for the rest.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    /// How many classified values fell in this bucket.
    pub count: usize,
}

/// Fewer distinct values than requested buckets; the count was reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("only {actual} bucket(s) possible for {requested} requested")]
pub struct InsufficientDistinctValues {
    pub requested: usize,
    pub actual: usize,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("no finite values to classify")]
    NoValues,
    #[error("bucket count must be at least 1")]
    ZeroBuckets,
}

/// An ordered partition of the observed value range.
///
/// Buckets ascend by lower bound; color assignment is monotonic with bucket
/// order (the palette itself belongs to the renderer).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub scheme: Scheme,
    pub buckets: SmallVec<[Bucket; DEFAULT_BUCKETS]>,
    /// Present when the bucket count had to drop below the request.
    pub reduction: Option<InsufficientDistinctValues>,
}

impl Classification {
    pub fn k(&self) -> usize {
        self.buckets.len()
    }

    /// Ordinal bucket index for a value, `None` outside the classified range
    /// or non-finite (the renderer's "no data" category).
    pub fn bucket_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let first = self.buckets.first()?;
        if value < first.lower {
            return None;
        }
        self.buckets.iter().position(|b| value <= b.upper)
    }

    /// Legend labels, one per bucket, ascending, with an optional unit suffix.
    pub fn labels(&self, unit: &str) -> Vec<String> {
        self.buckets
            .iter()
            .map(|b| {
                let range = format!("{} - {}", format_bound(b.lower), format_bound(b.upper));
                if unit.is_empty() {
                    range
                } else {
                    format!("{range} {unit}")
                }
            })
            .collect()
    }
}

/// Classify finite values into at most `k` ordered buckets.
///
/// Non-finite entries are ignored (rows carrying a derivation error never
/// reach this point through the pipeline). At least one finite value and
/// `k >= 1` are required.
pub fn classify(values: &[f64], scheme: Scheme, k: usize) -> Result<Classification, ClassifyError> {
    if k == 0 {
        return Err(ClassifyError::ZeroBuckets);
    }
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Err(ClassifyError::NoValues);
    }
    sorted.sort_by(f64::total_cmp);

    let distinct = count_distinct(&sorted);
    let effective_k = k.min(distinct);

    let mut uppers = match scheme {
        Scheme::NaturalBreaks => jenks::break_values(&sorted, effective_k),
        Scheme::Quantiles => quantiles::break_values(&sorted, effective_k),
    };
    // Tied break values collapse into one bucket.
    uppers.dedup();

    let lowest = sorted[0];
    let mut buckets: SmallVec<[Bucket; DEFAULT_BUCKETS]> = SmallVec::new();
    let mut lower = lowest;
    for upper in uppers {
        buckets.push(Bucket {
            lower,
            upper,
            count: 0,
        });
        lower = upper;
    }

    for value in &sorted {
        let index = buckets
            .iter()
            .position(|b| *value <= b.upper)
            .unwrap_or(buckets.len() - 1);
        buckets[index].count += 1;
    }

    let reduction = (buckets.len() < k).then_some(InsufficientDistinctValues {
        requested: k,
        actual: buckets.len(),
    });
    if let Some(reduction) = reduction {
        log::warn!("classification reduced: {reduction}");
    }

    Ok(Classification {
        scheme,
        buckets,
        reduction,
    })
}

fn count_distinct(sorted: &[f64]) -> usize {
    let mut distinct = 0;
    let mut previous: Option<OrderedFloat<f64>> = None;
    for value in sorted {
        let value = OrderedFloat(*value);
        if previous != Some(value) {
            distinct += 1;
            previous = Some(value);
        }
    }
    distinct
}

/// Bucket bound for a legend: two decimals, trailing zeros trimmed.
fn format_bound(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
