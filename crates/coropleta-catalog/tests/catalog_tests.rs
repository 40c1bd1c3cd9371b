use std::cell::Cell;

use geo::{polygon, MultiPolygon};
use pretty_assertions::assert_eq;

use coropleta_catalog::{
    CatalogCache, LoadFailure, RegionCatalog, RegionSource, SourceError, StaticSource,
    CANARY_DISPLAY_OFFSET,
};
use coropleta_model::CellValue;

fn square_at(x: f64, y: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![polygon![
        (x: x, y: y),
        (x: x + 1.0, y: y),
        (x: x + 1.0, y: y + 1.0),
        (x: x, y: y + 1.0),
    ]])
}

fn peninsula_source() -> StaticSource {
    StaticSource::new(
        "in-memory communities",
        vec![
            ("Andalucía".to_string(), square_at(0.0, 0.0)),
            ("Canarias".to_string(), square_at(-10.0, -10.0)),
            ("Madrid".to_string(), square_at(2.0, 2.0)),
        ],
    )
}

struct FailingSource;

impl RegionSource for FailingSource {
    fn describe(&self) -> String {
        "unreachable url".to_string()
    }

    fn load(&self) -> Result<Vec<(String, MultiPolygon<f64>)>, SourceError> {
        Err(SourceError::Read("connection refused".to_string()))
    }
}

#[test]
fn first_working_strategy_wins() {
    let fallback = peninsula_source();
    let catalog = RegionCatalog::load(&[&FailingSource, &fallback]).unwrap();
    assert_eq!(catalog.len(), 3);
    assert!(catalog.contains("canarias"));
}

#[test]
fn all_failures_are_listed_in_the_cause_chain() {
    let empty = StaticSource::new("empty file", vec![]);
    let err = RegionCatalog::load(&[&FailingSource, &empty]).unwrap_err();
    assert_eq!(err.attempts.len(), 2);
    assert_eq!(err.attempts[0].source, "unreachable url");
    assert!(matches!(err.attempts[1].failure, LoadFailure::Empty));
    let message = err.to_string();
    assert!(message.contains("unreachable url"));
    assert!(message.contains("no regions"));
}

#[test]
fn duplicate_names_reject_the_source() {
    let dup = StaticSource::new(
        "bad source",
        vec![
            ("Murcia".to_string(), square_at(0.0, 0.0)),
            ("MURCIA".to_string(), square_at(1.0, 1.0)),
        ],
    );
    let err = RegionCatalog::load(&[&dup]).unwrap_err();
    assert!(matches!(
        err.attempts[0].failure,
        LoadFailure::DuplicateName(_)
    ));
}

#[test]
fn relocate_shifts_exactly_once_per_call() {
    let source = peninsula_source();
    let mut catalog = RegionCatalog::load(&[&source]).unwrap();
    let (dx, dy) = CANARY_DISPLAY_OFFSET;

    assert!(catalog.relocate("Canarias", dx, dy));
    let canarias = catalog
        .regions()
        .iter()
        .find(|r| r.name.key() == "canarias")
        .unwrap();
    assert_eq!(canarias.geometry, square_at(-10.0 + dx, -10.0 + dy));

    // Other regions untouched.
    let madrid = catalog
        .regions()
        .iter()
        .find(|r| r.name.key() == "madrid")
        .unwrap();
    assert_eq!(madrid.geometry, square_at(2.0, 2.0));

    // A second call compounds: once-per-session is the caller's contract,
    // not the catalog's.
    assert!(catalog.relocate("Canarias", dx, dy));
    let canarias = catalog
        .regions()
        .iter()
        .find(|r| r.name.key() == "canarias")
        .unwrap();
    assert_eq!(canarias.geometry, square_at(-10.0 + 2.0 * dx, -10.0 + 2.0 * dy));
}

#[test]
fn relocating_an_absent_region_is_a_noop() {
    let source = peninsula_source();
    let mut catalog = RegionCatalog::load(&[&source]).unwrap();
    assert!(!catalog.relocate("Atlántida", 1.0, 1.0));
}

#[test]
fn exclusion_filters_the_view_and_row_set() {
    let source = peninsula_source();
    let catalog = RegionCatalog::load(&[&source]).unwrap();

    let view = catalog.view(&["Canarias"]);
    let active: Vec<&str> = view.active().map(|r| r.name.display()).collect();
    assert_eq!(active, vec!["Andalucía", "Madrid"]);
    // The excluded region is flagged, not deleted.
    assert_eq!(view.regions().len(), 3);
    assert!(view
        .regions()
        .iter()
        .find(|r| r.name.key() == "canarias")
        .unwrap()
        .excluded);

    let rows = view.rows();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.a == CellValue::Number(0.0)));

    // Re-inclusion restores the region with a fresh zeroed row.
    let view = catalog.view::<&str>(&[]);
    let rows = view.rows();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().any(|r| r.region.key() == "canarias"));
}

#[test]
fn exclude_returns_the_catalog_minus_the_named_regions() {
    let source = peninsula_source();
    let catalog = RegionCatalog::load(&[&source]).unwrap();
    let remaining = catalog.exclude(&["madrid", "Canarias"]);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name.display(), "Andalucía");
}

#[test]
fn cache_loads_once_per_key_until_invalidated() {
    let loads = Cell::new(0usize);
    let mut cache = CatalogCache::new();
    let source = peninsula_source();
    let mut load = || {
        loads.set(loads.get() + 1);
        RegionCatalog::load(&[&source])
    };

    let first = cache.get_or_load_with("communities-v1", &mut load).unwrap();
    let second = cache.get_or_load_with("communities-v1", &mut load).unwrap();
    assert_eq!(loads.get(), 1);
    assert_eq!(first.len(), second.len());

    assert!(cache.invalidate("communities-v1"));
    cache.get_or_load_with("communities-v1", &mut load).unwrap();
    assert_eq!(loads.get(), 2);
}
