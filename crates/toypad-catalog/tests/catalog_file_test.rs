//! Integration tests for loading catalogs from disk.

use std::path::PathBuf;

use toypad_catalog::{Catalog, CatalogError, CatalogLookup};
use toypad_core::{CatalogId, TagKind};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_catalog() {
    let catalog = Catalog::load(fixture("catalog.json")).unwrap();

    assert_eq!(catalog.len(TagKind::Vehicle), 2);
    assert_eq!(catalog.len(TagKind::Character), 2);

    let buggy = catalog
        .resolve(TagKind::Vehicle, CatalogId::new(300))
        .unwrap();
    assert_eq!(buggy.name, "Fixture Buggy");
    assert_eq!(buggy.world, "Test World");
}

#[test]
fn test_loaded_catalog_keeps_namespaces_apart() {
    let catalog = Catalog::load(fixture("catalog.json")).unwrap();
    assert!(catalog.resolve(TagKind::Character, CatalogId::new(300)).is_none());
    assert!(catalog.resolve(TagKind::Vehicle, CatalogId::new(42)).is_none());
}

#[test]
fn test_load_duplicate_ids() {
    let err = Catalog::load(fixture("duplicate.json")).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DuplicateId {
            kind: TagKind::Character,
            ..
        }
    ));
}

#[test]
fn test_load_missing_file() {
    let err = Catalog::load(fixture("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
    assert!(err.to_string().contains("does-not-exist.json"));
}
