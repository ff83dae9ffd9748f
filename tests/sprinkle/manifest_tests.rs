//! Manifest and discovery tests
//!
//! Tests for sprinkle.toml parsing, validation and directory discovery.

use super::test_utils::*;

use std::path::Path;

use sprinkle_manager::sprinkle::registry::manifest::{ManifestSprinkle, SprinkleManifest};
use sprinkle_manager::sprinkle::{ManifestValidator, SprinkleDiscovery, ValidationResult};
use sprinkle_manager::{RouteSource, ServiceSource, Sprinkle, SprinkleError, SprinkleRegistry};

#[test]
fn test_sprinkle_discovery() {
    let fixture = SprinkleTestFixture::new().unwrap();
    fixture.create_manifest("core", &[], "").unwrap();
    fixture.create_manifest("account", &["core"], "").unwrap();
    std::fs::create_dir_all(fixture.sprinkle_dir("assets")).unwrap();

    let discovery = SprinkleDiscovery::new(&fixture.sprinkles_dir);
    let sprinkles = discovery.discover_sprinkles().unwrap();

    let names: Vec<&str> = sprinkles.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["account", "core"]);
}

#[test]
fn test_discover_single_sprinkle() {
    let fixture = SprinkleTestFixture::new().unwrap();
    fixture.create_manifest("core", &[], "").unwrap();
    let discovery = SprinkleDiscovery::new(&fixture.sprinkles_dir);

    let sprinkle = discovery.discover_sprinkle("core").unwrap();
    assert_eq!(sprinkle.directory(), fixture.sprinkle_dir("core"));

    let err = discovery.discover_sprinkle("missing").unwrap_err();
    assert!(matches!(err, SprinkleError::InvalidSprinkle { .. }));
}

#[test]
fn test_broken_manifest_aborts_discovery() {
    let fixture = SprinkleTestFixture::new().unwrap();
    fixture.create_manifest("core", &[], "").unwrap();
    fixture
        .write_file(Path::new("broken/sprinkle.toml"), "name = \n")
        .unwrap();

    let err = SprinkleDiscovery::new(&fixture.sprinkles_dir)
        .discover_sprinkles()
        .unwrap_err();
    assert!(matches!(err, SprinkleError::InvalidManifest(_)));
}

#[test]
fn test_manifest_paths_resolve_against_directory() {
    let fixture = SprinkleTestFixture::new().unwrap();
    fixture
        .create_manifest(
            "account",
            &["core"],
            concat!(
                "commands = [\"account:create\"]\n",
                "routes = [\"routes/account.toml\"]\n",
                "services = [\"services.json\"]\n",
                "\n",
                "[[resources]]\n",
                "scheme = \"templates\"\n",
                "path = \".\"\n",
            ),
        )
        .unwrap();

    let sprinkle = ManifestSprinkle::from_dir(fixture.sprinkle_dir("account")).unwrap();
    let dir = fixture.sprinkle_dir("account");

    assert_eq!(sprinkle.dependencies(), vec!["core"]);
    assert_eq!(sprinkle.commands(), vec!["account:create"]);
    assert!(matches!(
        &sprinkle.routes()[..],
        [RouteSource::File(path)] if path == &dir.join("routes/account.toml")
    ));
    assert!(matches!(
        &sprinkle.services()[..],
        [ServiceSource::File(path)] if path == &dir.join("services.json")
    ));

    let resources = sprinkle.resources();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].0, "templates");
    assert_eq!(resources[0].1.name(), "account");
}

#[test]
fn test_manifest_validation() {
    let manifest = SprinkleManifest::from_toml(
        "name = \"Bad Name\"\nversion = \"one\"\ndependencies = [\"core\", \"core\"]\n",
    )
    .unwrap();

    match ManifestValidator::new().validate(&manifest) {
        ValidationResult::Invalid(errors) => assert_eq!(errors.len(), 3),
        ValidationResult::Valid => panic!("expected validation errors"),
    }
}

#[test]
fn test_invalid_manifest_is_not_registered() {
    let manifest = SprinkleManifest::from_toml("name = \"core\"\nversion = \"x\"\n").unwrap();
    let mut registry = SprinkleRegistry::new();

    let err = registry
        .register_manifest(ManifestSprinkle::new(manifest, "."))
        .unwrap_err();
    assert!(matches!(err, SprinkleError::InvalidSprinkle { .. }));
    assert!(!registry.contains("core"));
}

#[test]
fn test_unknown_manifest_key_is_rejected() {
    let err = SprinkleManifest::from_toml("name = \"core\"\nentry_point = \"main\"\n").unwrap_err();
    assert!(matches!(err, SprinkleError::InvalidManifest(_)));
}
