use ahash::AHashMap;
use serde::Serialize;
use thiserror::Error;

use coropleta_model::{DerivedRow, Region};

/// A join mismatch between the catalog and the input rows.
///
/// Collected as warnings; the join proceeds with the matched subset. Both
/// directions are surfaced: a stale row label and a region nobody entered
/// data for are equally worth telling the user about.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedRegion {
    #[error("row {name:?} has no matching region")]
    RowWithoutRegion { name: String },
    #[error("region {name:?} has no row")]
    RegionWithoutRow { name: String },
    #[error("duplicate row for region {name:?}")]
    DuplicateRow { name: String },
}

/// Result of joining regions to derived rows by canonical name.
#[derive(Clone, Debug)]
pub struct Joined {
    /// Matched pairs, sorted by canonical region name. Sorting here makes
    /// the per-region assignment independent of input row order.
    pub pairs: Vec<(Region, DerivedRow)>,
    pub warnings: Vec<UnmatchedRegion>,
}

/// Inner join of regions and rows on canonical name.
///
/// With two rows naming the same region, the first occurrence wins and the
/// duplicate is reported (CSV import already rejects duplicates, but rows
/// can arrive from other table hosts).
pub fn join(regions: &[Region], rows: &[DerivedRow]) -> Joined {
    let mut warnings = Vec::new();

    let mut by_key: AHashMap<&str, &DerivedRow> = AHashMap::with_capacity(rows.len());
    for row in rows {
        if by_key.contains_key(row.region.key()) {
            warnings.push(UnmatchedRegion::DuplicateRow {
                name: row.region.display().to_string(),
            });
        } else {
            by_key.insert(row.region.key(), row);
        }
    }

    let mut ordered: Vec<&Region> = regions.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let mut pairs = Vec::with_capacity(ordered.len());
    for region in ordered {
        match by_key.remove(region.name.key()) {
            Some(row) => pairs.push((region.clone(), row.clone())),
            None => warnings.push(UnmatchedRegion::RegionWithoutRow {
                name: region.name.display().to_string(),
            }),
        }
    }

    let mut leftover: Vec<&DerivedRow> = by_key.into_values().collect();
    leftover.sort_by(|a, b| a.region.cmp(&b.region));
    for row in leftover {
        warnings.push(UnmatchedRegion::RowWithoutRegion {
            name: row.region.display().to_string(),
        });
    }

    for warning in &warnings {
        log::warn!("join: {warning}");
    }

    Joined { pairs, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coropleta_model::Derived;
    use geo::MultiPolygon;

    fn region(name: &str) -> Region {
        Region::new(name, MultiPolygon(vec![]))
    }

    fn row(name: &str, value: f64) -> DerivedRow {
        DerivedRow {
            region: name.into(),
            derived: Derived::Value(value),
        }
    }

    #[test]
    fn joins_on_canonical_name() {
        let regions = vec![region("Andalucía"), region("Madrid")];
        let rows = vec![row("MADRID", 2.0), row("andalucia", 1.0)];
        let joined = join(&regions, &rows);
        assert!(joined.warnings.is_empty());
        assert_eq!(joined.pairs.len(), 2);
        // Sorted by canonical name regardless of input order.
        assert_eq!(joined.pairs[0].0.name.display(), "Andalucía");
        assert_eq!(joined.pairs[0].1.derived, Derived::Value(1.0));
    }

    #[test]
    fn mismatches_surface_in_both_directions() {
        let regions = vec![region("Galicia"), region("Madrid")];
        let rows = vec![row("Madrid", 1.0), row("Condado de Treviño", 9.0)];
        let joined = join(&regions, &rows);
        assert_eq!(joined.pairs.len(), 1);
        assert_eq!(
            joined.warnings,
            vec![
                UnmatchedRegion::RegionWithoutRow {
                    name: "Galicia".to_string()
                },
                UnmatchedRegion::RowWithoutRegion {
                    name: "Condado de Treviño".to_string()
                },
            ]
        );
    }

    #[test]
    fn reordering_rows_does_not_change_the_join() {
        let regions = vec![region("A"), region("B"), region("C")];
        let rows = vec![row("C", 3.0), row("A", 1.0), row("B", 2.0)];
        let forward = join(&regions, &rows);
        let mut reversed = rows.clone();
        reversed.reverse();
        let backward = join(&regions, &reversed);
        assert_eq!(forward.pairs, backward.pairs);
    }

    #[test]
    fn duplicate_rows_keep_first_and_warn() {
        let regions = vec![region("Madrid")];
        let rows = vec![row("Madrid", 1.0), row("MADRID", 2.0)];
        let joined = join(&regions, &rows);
        assert_eq!(joined.pairs[0].1.derived, Derived::Value(1.0));
        assert_eq!(
            joined.warnings,
            vec![UnmatchedRegion::DuplicateRow {
                name: "MADRID".to_string()
            }]
        );
    }
}
