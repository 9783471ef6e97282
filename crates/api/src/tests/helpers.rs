// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use acadplan::InMemoryStore;
use acadplan_domain::{
    GeneralModuleCode, GroupType, LogicType, Programme, ProgrammeType, RequirementPath, RuleType,
};

use crate::AcademicPlanRequest;

pub fn create_test_request(ids: &[&str]) -> AcademicPlanRequest {
    AcademicPlanRequest {
        programme_ids: ids.iter().map(|id| (*id).to_string()).collect(),
    }
}

pub fn create_test_path(
    programme_id: &str,
    path_id: i64,
    key: &str,
    parent: Option<&str>,
    logic: LogicType,
    codes: &[&str],
) -> RequirementPath {
    RequirementPath {
        path_id,
        programme_id: programme_id.to_string(),
        path_key: key.to_string(),
        parent_path_key: parent.map(str::to_string),
        display_label: key.to_string(),
        group_type: GroupType::CoreEssentials,
        logic_type: logic,
        rule_type: Some(RuleType::Min),
        rule_value: Some(4),
        required_units: None,
        depth: i32::from(parent.is_some()),
        is_leaf: logic == LogicType::Leaf,
        is_readonly: logic == LogicType::Leaf,
        is_overall_source: false,
        raw_tag_name: None,
        module_codes: codes.iter().map(|code| GeneralModuleCode::exact(code)).collect(),
        exception_modules: Vec::new(),
    }
}

/// Two majors and two mutually precluded minors.
///
/// `cs-major` preselects CS2040S, which needs CS1010. `ai-minor` and
/// `ds-minor` cannot be combined.
pub fn create_test_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_programme(Programme::new("cs-major", "Computer Science", ProgrammeType::Major, 160, 40))
        .with_programme(Programme::new("math-major", "Mathematics", ProgrammeType::Major, 160, 40))
        .with_programme(Programme::new("ai-minor", "Artificial Intelligence", ProgrammeType::Minor, 20, 8))
        .with_programme(Programme::new("ds-minor", "Data Science", ProgrammeType::Minor, 20, 8))
        .with_programme_preclusion("ai-minor", "ds-minor")
        .with_module("CS1010", "Programming Methodology", 4)
        .with_module("CS2040S", "Data Structures and Algorithms", 4)
        .with_module("CS3243", "Introduction to Artificial Intelligence", 4)
        .with_module("MA1521", "Calculus for Computing", 4)
        .with_path(create_test_path("cs-major", 1, "cs_root", None, LogicType::And, &[]))
        .with_path(create_test_path("cs-major", 2, "cs_core", Some("cs_root"), LogicType::Leaf, &["CS2040S"]))
        .with_path(create_test_path("math-major", 3, "math_root", None, LogicType::And, &[]))
        .with_path(create_test_path("math-major", 4, "math_core", Some("math_root"), LogicType::Leaf, &["MA1521"]))
        .with_path(create_test_path("ai-minor", 5, "ai_root", None, LogicType::And, &[]))
        .with_path(create_test_path("ai-minor", 6, "ai_core", Some("ai_root"), LogicType::Leaf, &["CS3243"]))
        .with_simple_prerequisites("CS2040S", &["CS1010"])
}
