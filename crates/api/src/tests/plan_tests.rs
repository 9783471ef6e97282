// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use acadplan::InMemoryStore;
use acadplan_domain::{ModuleCode, Programme, ProgrammeType};
use acadplan_persistence::{Persistence, SeedData};
use time::OffsetDateTime;

use super::helpers::{create_test_path, create_test_request, create_test_store};
use crate::{
    AcademicPlanResponse, ApiError, ListProgrammesResponse, generate_plan, list_programmes,
};
use acadplan_domain::LogicType;

#[test]
fn test_generate_plan_wraps_plan_in_envelope() {
    let mut store: InMemoryStore = create_test_store();
    let before: OffsetDateTime = OffsetDateTime::now_utc();

    let response: AcademicPlanResponse =
        generate_plan(&mut store, &create_test_request(&["cs-major", "ai-minor"])).unwrap();

    assert_eq!(response.programme_count, 2);
    assert!(response.generated_at >= before);
    assert_eq!(response.processing_stats.programmes_processed, 2);
    assert!(response.warnings.is_empty());
    assert_eq!(
        response.programmes[0].preselected_modules,
        vec![ModuleCode::new("CS2040S"), ModuleCode::new("CS1010")]
    );
}

#[test]
fn test_ids_are_trimmed() {
    let mut store: InMemoryStore = create_test_store();

    let response: AcademicPlanResponse =
        generate_plan(&mut store, &create_test_request(&[" cs-major "])).unwrap();

    assert_eq!(response.programmes[0].metadata.id, "cs-major");
}

#[test]
fn test_empty_selection_is_invalid_input() {
    let mut store: InMemoryStore = create_test_store();

    let err: ApiError = generate_plan(&mut store, &create_test_request(&[])).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "programmeIds"));
}

#[test]
fn test_more_than_five_programmes_is_invalid_input() {
    let mut store: InMemoryStore = create_test_store();
    let request = create_test_request(&["a", "b", "c", "d", "e", "f"]);

    let err: ApiError = generate_plan(&mut store, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_duplicate_programme_is_invalid_input() {
    let mut store: InMemoryStore = create_test_store();

    let err: ApiError =
        generate_plan(&mut store, &create_test_request(&["cs-major", "cs-major "])).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
    assert!(err.to_string().contains("cs-major"));
}

#[test]
fn test_two_majors_is_invalid_combination() {
    let mut store: InMemoryStore = create_test_store();

    let err: ApiError =
        generate_plan(&mut store, &create_test_request(&["cs-major", "math-major"])).unwrap_err();

    match err {
        ApiError::InvalidCombination { conflicts, .. } => assert_eq!(conflicts.len(), 1),
        other => panic!("expected a combination error, got {other:?}"),
    }
}

#[test]
fn test_programme_preclusion_is_invalid_combination() {
    let mut store: InMemoryStore = create_test_store();

    let err: ApiError =
        generate_plan(&mut store, &create_test_request(&["ai-minor", "ds-minor"])).unwrap_err();

    assert!(matches!(err, ApiError::InvalidCombination { .. }));
}

#[test]
fn test_unknown_programme_is_internal_error() {
    let mut store: InMemoryStore = create_test_store();

    let err: ApiError =
        generate_plan(&mut store, &create_test_request(&["ghost-minor"])).unwrap_err();

    assert!(matches!(err, ApiError::Internal { .. }));
}

#[test]
fn test_malformed_tree_is_internal_error() {
    let mut store: InMemoryStore = create_test_store().with_path(create_test_path(
        "cs-major",
        9,
        "stray",
        Some("missing_parent"),
        LogicType::Leaf,
        &["CS1010"],
    ));

    let err: ApiError =
        generate_plan(&mut store, &create_test_request(&["cs-major"])).unwrap_err();

    assert!(matches!(err, ApiError::Internal { ref message } if message.contains("missing_parent")));
}

#[test]
fn test_response_serializes_camel_case_envelope() {
    let mut store: InMemoryStore = create_test_store();

    let response: AcademicPlanResponse =
        generate_plan(&mut store, &create_test_request(&["cs-major"])).unwrap();
    let json: serde_json::Value = serde_json::to_value(&response).unwrap();

    assert_eq!(json["programmeCount"], 1);
    assert!(json["generatedAt"].as_str().unwrap().contains('T'));
    assert_eq!(json["processingStats"]["programmesProcessed"], 1);
    assert!(json["lookup"].is_object());
}

#[test]
fn test_list_programmes_from_persistence() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let seed: SeedData = SeedData {
        programmes: vec![
            Programme::new("math-minor", "Mathematics", ProgrammeType::Minor, 20, 8),
            Programme::new("cs-major", "Computer Science", ProgrammeType::Major, 160, 40),
        ],
        ..SeedData::default()
    };
    persistence.seed(&seed).unwrap();

    let response: ListProgrammesResponse = list_programmes(&mut persistence).unwrap();

    let ids: Vec<&str> = response.programmes.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["cs-major", "math-minor"]);
}
