// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_cs_major_store, create_test_leaf, create_test_root, ids};
use crate::{
    AcademicPlan, AltPath, AltPathBox, CoreError, CourseBox, DropdownBox, ExactBox,
    InMemoryStore, LookupMaps, PlanOutcome, ProcessingContext, ProgrammePayload,
    ProgrammeSection, SanitizeReport, generate_academic_plan, is_satisfied, prune_boxes,
    sanitize_payloads,
};
use acadplan_domain::{GroupType, LogicType, ModuleCode, PrereqTree};
use std::collections::BTreeSet;

fn tree(json: &str) -> PrereqTree {
    serde_json::from_str(json).unwrap()
}

fn selected(values: &[&str]) -> BTreeSet<ModuleCode> {
    values.iter().map(|value| ModuleCode::new(value)).collect()
}

fn with_electives(store: InMemoryStore, codes: &[&str]) -> InMemoryStore {
    store
        .with_path(create_test_root(
            "cs-major",
            10,
            "electives",
            GroupType::CoreElectives,
            LogicType::And,
        ))
        .with_path(create_test_leaf(
            "cs-major",
            11,
            "pool",
            "electives",
            1,
            GroupType::CoreElectives,
            codes,
        ))
}

fn generate(store: &mut InMemoryStore) -> AcademicPlan {
    match generate_academic_plan(store, &ids(&["cs-major"])) {
        PlanOutcome::Generated(plan) => *plan,
        PlanOutcome::Rejected(context) => panic!("rejected: {:?}", context.errors()),
    }
}

fn section(payload: &ProgrammePayload, group: GroupType) -> &ProgrammeSection {
    payload.section(group).unwrap()
}

fn dropdown(boxes: &[CourseBox], key: &str) -> DropdownBox {
    boxes
        .iter()
        .find_map(|course_box| match course_box {
            CourseBox::Dropdown(dropdown) if dropdown.box_key == key => Some(dropdown.clone()),
            _ => None,
        })
        .unwrap()
}

fn create_test_exact(code: &str) -> CourseBox {
    CourseBox::Exact(ExactBox {
        box_key: format!("pinned-{code}"),
        path_id: None,
        programme_id: String::from("cs-major"),
        module_code: ModuleCode::new(code),
        is_preselected: false,
        readonly: false,
    })
}

#[test]
fn test_is_satisfied_follows_tree_logic() {
    let prerequisites: PrereqTree = tree(
        r#"{"and": ["CS1010:D", {"nOf": [2, ["MA1521", "MA2001", "ST2334"]]}]}"#,
    );

    assert!(!is_satisfied(&prerequisites, &selected(&["CS1010", "MA1521"])));
    assert!(is_satisfied(
        &prerequisites,
        &selected(&["CS1010", "MA1521", "ST2334"])
    ));
    assert!(is_satisfied(
        &tree(r#"{"or": ["CS2040", "CS2040S"]}"#),
        &selected(&["CS2040S"])
    ));
}

#[test]
fn test_precluded_options_are_pruned() {
    let mut store: InMemoryStore =
        with_electives(create_test_cs_major_store(), &["CS2040C", "CS3230"])
            .with_preclusion("CS2040S", "CS2040C");

    let plan: AcademicPlan = generate(&mut store);

    let electives: &ProgrammeSection = section(&plan.programmes[0], GroupType::CoreElectives);
    let pool: DropdownBox = dropdown(&electives.boxes, "pool-dropdown");
    assert_eq!(pool.options, vec![ModuleCode::new("CS3230")]);
    assert_eq!(plan.sanitization.pruned_options, 1);
}

#[test]
fn test_fully_precluded_dropdown_is_dropped() {
    let mut store: InMemoryStore = with_electives(create_test_cs_major_store(), &["CS2040C"])
        .with_preclusion("CS2040S", "CS2040C");

    let plan: AcademicPlan = generate(&mut store);

    let electives: &ProgrammeSection = section(&plan.programmes[0], GroupType::CoreElectives);
    assert!(electives.boxes.is_empty());
    assert_eq!(plan.sanitization.pruned_boxes, 1);
}

#[test]
fn test_alternative_with_precluded_pin_is_dropped() {
    let boxes: Vec<CourseBox> = vec![CourseBox::AltPath(AltPathBox {
        box_key: String::from("track-altpath"),
        path_id: Some(1),
        programme_id: String::from("cs-major"),
        label: String::from("Track"),
        alternatives: vec![
            AltPath {
                id: String::from("c"),
                label: String::from("C"),
                boxes: vec![create_test_exact("CS2040C"), create_test_exact("CS3230")],
            },
            AltPath {
                id: String::from("ai"),
                label: String::from("AI"),
                boxes: vec![create_test_exact("CS3243")],
            },
        ],
    })];
    let mut report: SanitizeReport = SanitizeReport::default();

    let pruned: Vec<CourseBox> = prune_boxes(boxes, &selected(&["CS2040C"]), &mut report);

    let CourseBox::AltPath(alt_path) = &pruned[0] else {
        panic!("expected an alt-path box");
    };
    assert_eq!(alt_path.alternatives.len(), 1);
    assert_eq!(alt_path.alternatives[0].id, "ai");
    assert_eq!(report.pruned_alternatives, 1);
}

#[test]
fn test_preselected_modules_that_preclude_each_other_fail() {
    let mut store: InMemoryStore = InMemoryStore::new().with_preclusion("CS2040S", "CS2040C");
    let mut context: ProcessingContext = ProcessingContext::new();
    context.add_preselected_module(ModuleCode::new("CS2040S"), "cs-major");
    context.add_preselected_module(ModuleCode::new("CS2040C"), "ce-major");
    let mut payloads: Vec<ProgrammePayload> = Vec::new();

    let result = sanitize_payloads(&mut store, &context, &LookupMaps::default(), &mut payloads);

    assert!(matches!(
        result,
        Err(CoreError::PreselectedConflict { .. })
    ));
}

#[test]
fn test_unmet_prerequisites_are_injected() {
    let mut store: InMemoryStore =
        with_electives(create_test_cs_major_store(), &["CS1231S", "CS3230"])
            .with_prerequisite_tree(
                "CS2040S",
                tree(r#"{"and": ["CS1010", "CS1231S:D", {"or": ["MA1521", "MA2001"]}]}"#),
            );

    let plan: AcademicPlan = generate(&mut store);
    let payload: &ProgrammePayload = &plan.programmes[0];

    // A pinned prerequisite goes where the module is listed and leaves its dropdown.
    let electives: &ProgrammeSection = section(payload, GroupType::CoreElectives);
    assert_eq!(
        dropdown(&electives.boxes, "pool-dropdown").options,
        vec![ModuleCode::new("CS3230")]
    );
    let CourseBox::Exact(pinned) = electives.boxes.last().unwrap() else {
        panic!("expected an exact box");
    };
    assert_eq!(
        pinned.box_key,
        "computer_science-major-core_electives-cs2040s_prereq-cs1231s"
    );
    assert!(pinned.readonly);

    // A choice goes next to the module that needs it.
    let essentials: &ProgrammeSection = section(payload, GroupType::CoreEssentials);
    let choice: DropdownBox = dropdown(
        &essentials.boxes,
        "computer_science-major-core_essentials-cs2040s_prereq-dropdown",
    );
    assert_eq!(
        choice.options,
        vec![ModuleCode::new("MA1521"), ModuleCode::new("MA2001")]
    );
    assert!(choice.readonly);
    assert_eq!(plan.sanitization.injected_boxes, 2);
}

#[test]
fn test_unplaced_prerequisite_creates_others_section() {
    let mut store: InMemoryStore = create_test_cs_major_store()
        .with_prerequisite_tree("CS2040S", tree(r#"{"and": ["CS1010", "MA1521"]}"#));

    let plan: AcademicPlan = generate(&mut store);

    let others: &ProgrammeSection = section(&plan.programmes[0], GroupType::CoreOthers);
    assert_eq!(
        others.section_key,
        "computer_science-major-core_others"
    );
    assert_eq!(others.boxes.len(), 1);
}

#[test]
fn test_n_of_prerequisite_becomes_alternatives() {
    let mut store: InMemoryStore = create_test_cs_major_store().with_prerequisite_tree(
        "CS2040S",
        tree(r#"{"nOf": [1, ["MA1521", {"and": ["MA2001", "ST2334"]}]]}"#),
    );

    let plan: AcademicPlan = generate(&mut store);

    let essentials: &ProgrammeSection = section(&plan.programmes[0], GroupType::CoreEssentials);
    let CourseBox::AltPath(alt_path) = essentials.boxes.last().unwrap() else {
        panic!("expected an alt-path box");
    };
    assert_eq!(
        alt_path.box_key,
        "computer_science-major-core_essentials-cs2040s_prereq-nOf-1"
    );
    assert_eq!(alt_path.alternatives.len(), 2);
    assert_eq!(alt_path.alternatives[1].boxes.len(), 2);
    assert_eq!(
        alt_path.alternatives[0].id,
        "computer_science-major-core_essentials-cs2040s_prereq-nOf-1-option-1"
    );
}

#[test]
fn test_satisfied_prerequisites_inject_nothing() {
    let mut store: InMemoryStore = create_test_cs_major_store()
        .with_prerequisite_tree("CS2040S", tree(r#"{"or": ["CS1010", "CS2030S"]}"#));

    let plan: AcademicPlan = generate(&mut store);

    assert_eq!(plan.sanitization.injected_boxes, 0);
}

#[test]
fn test_injected_prerequisite_choice_drops_precluded_options() {
    // CS1010 is preselected as a prerequisite of CS2040S.
    let mut store: InMemoryStore = create_test_cs_major_store()
        .with_preclusion("CS1010", "MA2001")
        .with_prerequisite_tree("CS2040S", tree(r#"{"or": ["MA1521", "MA2001"]}"#));

    let plan: AcademicPlan = generate(&mut store);

    let essentials: &ProgrammeSection = section(&plan.programmes[0], GroupType::CoreEssentials);
    let choice: DropdownBox = dropdown(
        &essentials.boxes,
        "computer_science-major-core_essentials-cs2040s_prereq-dropdown",
    );
    assert_eq!(choice.options, vec![ModuleCode::new("MA1521")]);
    assert_eq!(plan.sanitization.pruned_options, 1);
    assert_eq!(plan.sanitization.injected_boxes, 1);
}

#[test]
fn test_precluded_prerequisite_is_not_pinned() {
    let mut store: InMemoryStore = create_test_cs_major_store()
        .with_preclusion("CS1010", "MA2001")
        .with_prerequisite_tree("CS2040S", tree(r#"{"and": ["MA2001", "ST2334"]}"#));

    let plan: AcademicPlan = generate(&mut store);

    let pinned: Vec<&ModuleCode> = plan.programmes[0]
        .sections
        .iter()
        .flat_map(|section| &section.boxes)
        .filter_map(|course_box| match course_box {
            CourseBox::Exact(exact) if !exact.is_preselected => Some(&exact.module_code),
            _ => None,
        })
        .collect();
    assert_eq!(pinned, vec![&ModuleCode::new("ST2334")]);
    assert_eq!(plan.sanitization.injected_boxes, 1);
    assert_eq!(plan.sanitization.pruned_boxes, 1);
}
