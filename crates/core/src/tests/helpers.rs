// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::InMemoryStore;
use acadplan_domain::{
    GeneralModuleCode, GroupType, LogicType, Programme, ProgrammeType, RequirementPath, RuleType,
};

pub fn create_test_programme(id: &str, name: &str, programme_type: ProgrammeType) -> Programme {
    Programme::new(id, name, programme_type, 160, 40)
}

pub fn create_test_root(
    programme_id: &str,
    path_id: i64,
    key: &str,
    group: GroupType,
    logic: LogicType,
) -> RequirementPath {
    create_test_path(programme_id, path_id, key, None, 0, group, logic)
}

pub fn create_test_group(
    programme_id: &str,
    path_id: i64,
    key: &str,
    parent: &str,
    depth: i32,
    group: GroupType,
    logic: LogicType,
) -> RequirementPath {
    create_test_path(programme_id, path_id, key, Some(parent), depth, group, logic)
}

pub fn create_test_leaf(
    programme_id: &str,
    path_id: i64,
    key: &str,
    parent: &str,
    depth: i32,
    group: GroupType,
    codes: &[&str],
) -> RequirementPath {
    let mut path: RequirementPath = create_test_path(
        programme_id,
        path_id,
        key,
        Some(parent),
        depth,
        group,
        LogicType::Leaf,
    );
    path.module_codes = codes
        .iter()
        .map(|code| GeneralModuleCode::exact(code))
        .collect();
    path
}

/// A readonly `coreEssentials` leaf directly below `parent`.
pub fn create_test_essential(
    programme_id: &str,
    path_id: i64,
    key: &str,
    parent: &str,
    codes: &[&str],
) -> RequirementPath {
    let mut path: RequirementPath = create_test_leaf(
        programme_id,
        path_id,
        key,
        parent,
        1,
        GroupType::CoreEssentials,
        codes,
    );
    path.is_readonly = true;
    path
}

fn create_test_path(
    programme_id: &str,
    path_id: i64,
    key: &str,
    parent: Option<&str>,
    depth: i32,
    group: GroupType,
    logic: LogicType,
) -> RequirementPath {
    RequirementPath {
        path_id,
        programme_id: programme_id.to_string(),
        path_key: key.to_string(),
        parent_path_key: parent.map(str::to_string),
        display_label: key.to_string(),
        group_type: group,
        logic_type: logic,
        rule_type: Some(RuleType::Min),
        rule_value: Some(8),
        required_units: None,
        depth,
        is_leaf: logic == LogicType::Leaf,
        is_readonly: false,
        is_overall_source: false,
        raw_tag_name: None,
        module_codes: Vec::new(),
        exception_modules: Vec::new(),
    }
}

pub fn create_test_catalogue() -> InMemoryStore {
    InMemoryStore::new()
        .with_module("CS1010", "Programming Methodology", 4)
        .with_module("CS1231S", "Discrete Structures", 4)
        .with_module("CS2030S", "Programming Methodology II", 4)
        .with_module("CS2040", "Data Structures and Algorithms", 4)
        .with_module("CS2040C", "Data Structures and Algorithms", 4)
        .with_module("CS2040S", "Data Structures and Algorithms", 4)
        .with_module("CS3230", "Design and Analysis of Algorithms", 4)
        .with_module("CS3243", "Introduction to Artificial Intelligence", 4)
        .with_module("CS3244", "Machine Learning", 4)
        .with_module("CS3263", "Foundations of Artificial Intelligence", 4)
        .with_module("MA1521", "Calculus for Computing", 4)
        .with_module("MA2001", "Linear Algebra I", 4)
        .with_module("ST2334", "Probability and Statistics", 4)
}

/// A CS major whose only mandatory module is CS2040S, which requires CS1010.
pub fn create_test_cs_major_store() -> InMemoryStore {
    create_test_catalogue()
        .with_programme(create_test_programme(
            "cs-major",
            "Computer Science",
            ProgrammeType::Major,
        ))
        .with_path(create_test_root(
            "cs-major",
            1,
            "cs_essentials",
            GroupType::CoreEssentials,
            LogicType::And,
        ))
        .with_path(create_test_essential(
            "cs-major",
            2,
            "cs_foundation",
            "cs_essentials",
            &["CS2040S"],
        ))
        .with_simple_prerequisites("CS2040S", &["CS1010"])
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
