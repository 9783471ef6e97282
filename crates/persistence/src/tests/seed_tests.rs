// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use acadplan_domain::{Programme, ProgrammePreclusion, ProgrammeType};

use crate::{Persistence, PersistenceError, SeedData, SeedSummary, TableCounts};

use super::{create_test_path, create_test_seed};

#[test]
fn test_seed_reports_row_counts() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let summary: SeedSummary = persistence.seed(&create_test_seed()).unwrap();

    assert_eq!(summary.programmes, 2);
    assert_eq!(summary.modules, 8);
    assert_eq!(summary.requirement_paths, 7);
    assert_eq!(summary.gmc_mappings, 2);
    assert_eq!(summary.prerequisite_rules, 1);
    assert_eq!(summary.preclusion_rules, 1);
    assert_eq!(summary.programme_preclusions, 0);
}

#[test]
fn test_seed_from_json_document() {
    let json: &str = r#"{
        "programmes": [
            {"id": "cs-major", "name": "Computer Science", "type": "major",
             "requiredUnits": 160, "doubleCountCap": 40}
        ],
        "modules": [
            {"code": "cs1010", "title": "Programming Methodology"},
            {"code": "CS2040S", "title": "Data Structures and Algorithms",
             "units": 4, "prereqTree": "CS1010"}
        ],
        "requirementPaths": [
            {"programmeId": "cs-major", "pathKey": "root",
             "groupType": "coreEssentials", "logicType": "AND"},
            {"programmeId": "cs-major", "pathKey": "leaf", "parentPathKey": "root",
             "groupType": "coreEssentials", "logicType": "LEAF", "depth": 1,
             "isLeaf": true, "moduleCodes": ["CS2040S"]}
        ]
    }"#;
    let seed: SeedData = SeedData::from_json_str(json).unwrap();
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    persistence.seed(&seed).unwrap();

    let counts: TableCounts = persistence.table_counts().unwrap();
    assert_eq!(counts.programmes, 1);
    assert_eq!(counts.modules, 2);
    assert_eq!(counts.requirement_paths, 2);
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let result: Result<SeedData, PersistenceError> = SeedData::from_json_str("{\"programmes\": 3}");
    assert!(matches!(result, Err(PersistenceError::SerializationError(_))));
}

#[test]
fn test_orphan_path_is_rejected() {
    let mut seed: SeedData = create_test_seed();
    seed.requirement_paths.push(create_test_path(
        "cs-major",
        "stray",
        Some("missing_parent"),
        "coreElectives",
        "LEAF",
        1,
    ));
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<SeedSummary, PersistenceError> = persistence.seed(&seed);

    assert!(matches!(result, Err(PersistenceError::InvalidSeed(_))));
    assert_eq!(persistence.table_counts().unwrap(), TableCounts::default());
}

#[test]
fn test_path_for_unknown_programme_is_rejected() {
    let mut seed: SeedData = create_test_seed();
    seed.requirement_paths.push(create_test_path(
        "ghost-minor",
        "root",
        None,
        "coreEssentials",
        "AND",
        0,
    ));
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err: PersistenceError = persistence.seed(&seed).unwrap_err();

    assert!(err.to_string().contains("ghost-minor"));
}

#[test]
fn test_preclusion_for_unknown_programme_is_rejected() {
    let mut seed: SeedData = create_test_seed();
    seed.programme_preclusions.push(ProgrammePreclusion {
        programme_id: "cs-major".to_string(),
        precluded_programme_id: "ghost-minor".to_string(),
    });

    assert!(matches!(seed.validate(), Err(PersistenceError::InvalidSeed(_))));
}

#[test]
fn test_failed_insert_rolls_back_whole_seed() {
    let mut seed: SeedData = create_test_seed();
    seed.programmes.push(Programme::new(
        "cs-major",
        "Computer Science Again",
        ProgrammeType::Major,
        160,
        40,
    ));
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<SeedSummary, PersistenceError> = persistence.seed(&seed);

    assert!(result.is_err());
    assert_eq!(persistence.table_counts().unwrap(), TableCounts::default());
}

#[test]
fn test_clear_removes_every_row() {
    let mut persistence: Persistence = super::create_seeded_persistence();

    persistence.clear().unwrap();

    assert_eq!(persistence.table_counts().unwrap(), TableCounts::default());
    assert!(persistence.seed(&create_test_seed()).is_ok());
}
