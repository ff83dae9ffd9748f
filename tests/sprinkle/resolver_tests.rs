//! Dependency resolution tests
//!
//! Tests for resolve order, deduplication, unknown sprinkles and cycles.

use super::test_utils::*;

use sprinkle_manager::{DependencyResolver, SprinkleError};

#[test]
fn test_depth_first_order_keeps_first_occurrence() {
    let registry = registry_of(vec![
        MockSprinkle::new("A").depends_on(&["B", "C"]),
        MockSprinkle::new("B").depends_on(&["D"]),
        MockSprinkle::new("C").depends_on(&["D"]),
        MockSprinkle::new("D"),
    ]);

    let resolved = DependencyResolver::new(&registry).resolve("A").unwrap();
    assert_eq!(names(&resolved), vec!["A", "B", "D", "C"]);
}

#[test]
fn test_dependency_listed_twice_appears_once() {
    let registry = registry_of(vec![
        MockSprinkle::new("site").depends_on(&["core", "account", "core"]),
        MockSprinkle::new("account").depends_on(&["core"]),
        MockSprinkle::new("core"),
    ]);

    let resolved = DependencyResolver::new(&registry).resolve("site").unwrap();
    assert_eq!(names(&resolved), vec!["site", "core", "account"]);
}

#[test]
fn test_unregistered_dependency_is_invalid() {
    let registry = registry_of(vec![MockSprinkle::new("A").depends_on(&["Missing"])]);

    let err = DependencyResolver::new(&registry).resolve("A").unwrap_err();
    match err {
        SprinkleError::InvalidSprinkle { name, .. } => assert_eq!(name, "Missing"),
        other => panic!("expected InvalidSprinkle, got {:?}", other),
    }
}

#[test]
fn test_unregistered_root_is_invalid() {
    let registry = registry_of(vec![]);

    let err = DependencyResolver::new(&registry).resolve("app").unwrap_err();
    assert!(matches!(err, SprinkleError::InvalidSprinkle { ref name, .. } if name == "app"));
}

#[test]
fn test_self_dependency_is_cyclic() {
    let registry = registry_of(vec![MockSprinkle::new("A").depends_on(&["A"])]);

    let err = DependencyResolver::new(&registry).resolve("A").unwrap_err();
    match err {
        SprinkleError::CyclicDependency { path } => assert_eq!(path, vec!["A", "A"]),
        other => panic!("expected CyclicDependency, got {:?}", other),
    }
}

#[test]
fn test_transitive_cycle_reports_path() {
    let registry = registry_of(vec![
        MockSprinkle::new("app").depends_on(&["A"]),
        MockSprinkle::new("A").depends_on(&["B"]),
        MockSprinkle::new("B").depends_on(&["C"]),
        MockSprinkle::new("C").depends_on(&["A"]),
    ]);

    let err = DependencyResolver::new(&registry).resolve("app").unwrap_err();
    match &err {
        SprinkleError::CyclicDependency { path } => {
            assert_eq!(path, &vec!["A", "B", "C", "A"]);
        }
        other => panic!("expected CyclicDependency, got {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "Circular sprinkle dependency detected: A -> B -> C -> A"
    );
}

#[test]
fn test_shared_dependency_is_not_a_cycle() {
    let registry = registry_of(vec![
        MockSprinkle::new("A").depends_on(&["B", "C"]),
        MockSprinkle::new("B").depends_on(&["C"]),
        MockSprinkle::new("C"),
    ]);

    let resolved = DependencyResolver::new(&registry).resolve("A").unwrap();
    assert_eq!(names(&resolved), vec!["A", "B", "C"]);
}

#[test]
fn test_each_sprinkle_instantiated_once() {
    let (registry, counter) = counting_registry(vec![
        MockSprinkle::new("A").depends_on(&["B", "C"]),
        MockSprinkle::new("B").depends_on(&["C"]),
        MockSprinkle::new("C"),
    ]);

    DependencyResolver::new(&registry).resolve("A").unwrap();
    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 3);
}
