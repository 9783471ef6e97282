// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{InMemoryStore, PrerequisiteClosure, StoreError, resolve_prerequisite_closure};
use acadplan_domain::ModuleCode;

fn codes(values: &[&str]) -> Vec<ModuleCode> {
    values.iter().map(|value| ModuleCode::new(value)).collect()
}

fn create_test_chain_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_simple_prerequisites("CS3230", &["CS2040S", "CS1231S"])
        .with_simple_prerequisites("CS2040S", &["CS1010"])
        .with_simple_prerequisites("CS1231S", &["MA1521"])
}

#[test]
fn test_closure_follows_every_level() {
    let mut store: InMemoryStore = create_test_chain_store();

    let closure: PrerequisiteClosure = resolve_prerequisite_closure(&mut store, &codes(&["CS3230"]));

    assert!(closure.is_complete());
    assert_eq!(
        closure.modules,
        codes(&["CS3230", "CS2040S", "CS1231S", "CS1010", "MA1521"])
    );
    assert_eq!(
        closure.prerequisites,
        codes(&["CS2040S", "CS1231S", "CS1010", "MA1521"])
    );
    assert_eq!(
        closure.direct.get(&ModuleCode::new("CS3230")),
        Some(&codes(&["CS2040S", "CS1231S"]))
    );
}

#[test]
fn test_closure_fetches_one_batch_per_level() {
    let mut store: InMemoryStore = create_test_chain_store();

    let _ = resolve_prerequisite_closure(&mut store, &codes(&["CS3230"]));

    // CS3230, then CS2040S and CS1231S, then CS1010 and MA1521.
    assert_eq!(store.prerequisite_batches(), 3);
}

#[test]
fn test_closure_terminates_on_cycles() {
    let mut store: InMemoryStore = InMemoryStore::new()
        .with_simple_prerequisites("CS2030S", &["CS2040S"])
        .with_simple_prerequisites("CS2040S", &["CS2030S"]);

    let closure: PrerequisiteClosure = resolve_prerequisite_closure(&mut store, &codes(&["CS2030S"]));

    assert!(closure.is_complete());
    assert_eq!(closure.modules, codes(&["CS2030S", "CS2040S"]));
    assert_eq!(closure.prerequisites, codes(&["CS2040S"]));
}

#[test]
fn test_closure_is_idempotent() {
    let mut store: InMemoryStore = create_test_chain_store();

    let first: PrerequisiteClosure = resolve_prerequisite_closure(&mut store, &codes(&["CS3230"]));
    let second: PrerequisiteClosure = resolve_prerequisite_closure(&mut store, &first.modules);

    let mut before: Vec<ModuleCode> = first.modules;
    let mut after: Vec<ModuleCode> = second.modules;
    before.sort();
    after.sort();
    assert_eq!(before, after);
    assert!(second.prerequisites.is_empty());
}

#[test]
fn test_start_modules_are_not_prerequisites() {
    let mut store: InMemoryStore = create_test_chain_store();

    let closure: PrerequisiteClosure =
        resolve_prerequisite_closure(&mut store, &codes(&["CS3230", "CS2040S"]));

    assert!(!closure.prerequisites.contains(&ModuleCode::new("CS2040S")));
    assert!(closure.prerequisites.contains(&ModuleCode::new("CS1010")));
}

#[test]
fn test_failed_batch_stops_traversal() {
    let mut store: InMemoryStore = create_test_chain_store().failing_prerequisite_batch(2);

    let closure: PrerequisiteClosure = resolve_prerequisite_closure(&mut store, &codes(&["CS3230"]));

    assert!(!closure.is_complete());
    assert!(matches!(closure.failure, Some(StoreError::Unavailable(_))));
    assert_eq!(closure.modules, codes(&["CS3230", "CS2040S", "CS1231S"]));
    assert_eq!(store.prerequisite_batches(), 2);
}

#[test]
fn test_empty_start_fetches_nothing() {
    let mut store: InMemoryStore = create_test_chain_store();

    let closure: PrerequisiteClosure = resolve_prerequisite_closure(&mut store, &[]);

    assert!(closure.modules.is_empty());
    assert_eq!(store.prerequisite_batches(), 0);
}
