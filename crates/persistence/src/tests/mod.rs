// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod seed_tests;

use acadplan_domain::{
    GmcMapping, GmcType, ModuleCode, ModulePreclusion, PrereqTree, Programme, ProgrammeType,
    SimplePrerequisite,
};

use crate::{Persistence, SeedData, SeedModule, SeedPath};

pub fn create_test_module(code: &str, title: &str) -> SeedModule {
    SeedModule {
        code: code.to_string(),
        title: title.to_string(),
        units: 4,
        prereq_tree: None,
    }
}

/// Creates a path row with no codes, rule or flags.
pub fn create_test_path(
    programme_id: &str,
    path_key: &str,
    parent_path_key: Option<&str>,
    group_type: &str,
    logic_type: &str,
    depth: i32,
) -> SeedPath {
    SeedPath {
        path_id: None,
        programme_id: programme_id.to_string(),
        path_key: path_key.to_string(),
        parent_path_key: parent_path_key.map(str::to_string),
        display_label: path_key.to_string(),
        group_type: group_type.to_string(),
        logic_type: logic_type.to_string(),
        rule_type: None,
        rule_value: None,
        required_units: None,
        depth,
        is_leaf: logic_type == "LEAF",
        is_readonly: false,
        is_overall_source: false,
        raw_tag_name: None,
        module_codes: Vec::new(),
        module_types: Vec::new(),
        exception_modules: Vec::new(),
    }
}

/// A Computer Science major and a Mathematics minor.
///
/// `cs-major` has a readonly essential leaf holding CS2040S (which needs
/// CS1010) and an elective leaf holding the wildcard `CS3xxx`, mapped to
/// CS3230 and CS3243. `math-minor` has a single MA1521/MA2001 leaf.
pub fn create_test_seed() -> SeedData {
    let mut foundation: SeedPath = create_test_path(
        "cs-major",
        "cs_foundation",
        Some("cs_essentials"),
        "coreEssentials",
        "LEAF",
        1,
    );
    foundation.is_readonly = true;
    foundation.module_codes = vec!["CS2040S".to_string()];
    foundation.module_types = vec!["exact".to_string()];

    let mut level3: SeedPath = create_test_path(
        "cs-major",
        "cs_level3",
        Some("cs_electives"),
        "coreElectives",
        "LEAF",
        1,
    );
    level3.rule_type = Some("min".to_string());
    level3.rule_value = Some(8);
    level3.module_codes = vec!["CS3xxx".to_string()];
    level3.module_types = vec!["wildcard".to_string()];
    level3.exception_modules = vec!["CS3263".to_string()];

    let mut maths: SeedPath = create_test_path(
        "math-minor",
        "math_core",
        Some("math_essentials"),
        "coreEssentials",
        "LEAF",
        1,
    );
    maths.module_codes = vec!["MA1521".to_string(), "MA2001".to_string()];

    SeedData {
        programmes: vec![
            Programme::new("cs-major", "Computer Science", ProgrammeType::Major, 160, 40),
            Programme::new("math-minor", "Mathematics", ProgrammeType::Minor, 20, 8),
        ],
        programme_preclusions: Vec::new(),
        modules: vec![
            create_test_module("CS1010", "Programming Methodology"),
            create_test_module("CS1231S", "Discrete Structures"),
            SeedModule {
                prereq_tree: Some(PrereqTree::Module("CS1010".to_string())),
                ..create_test_module("CS2040S", "Data Structures and Algorithms")
            },
            create_test_module("CS3230", "Design and Analysis of Algorithms"),
            create_test_module("CS3243", "Introduction to Artificial Intelligence"),
            create_test_module("CS3263", "Foundations of Artificial Intelligence"),
            create_test_module("MA1521", "Calculus for Computing"),
            create_test_module("MA2001", "Linear Algebra I"),
        ],
        requirement_paths: vec![
            create_test_path("cs-major", "cs_essentials", None, "coreEssentials", "AND", 0),
            foundation,
            create_test_path("cs-major", "cs_electives", None, "coreElectives", "AND", 0),
            level3,
            create_test_path("math-minor", "math_essentials", None, "coreEssentials", "AND", 0),
            maths,
        ],
        gmc_mappings: vec![
            GmcMapping::new("cs-major", "CS3xxx", GmcType::Wildcard, "CS3230"),
            GmcMapping::new("cs-major", "CS3xxx", GmcType::Wildcard, "CS3243"),
        ],
        prerequisites: vec![SimplePrerequisite {
            module_code: ModuleCode::new("CS2040S"),
            prerequisites: vec![ModuleCode::new("CS1010")],
        }],
        preclusions: vec![ModulePreclusion {
            module_code: ModuleCode::new("CS3243"),
            precluded: vec![ModuleCode::new("CS3263")],
        }],
    }
}

/// Opens an in-memory database holding [`create_test_seed`].
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.seed(&create_test_seed()).unwrap();
    persistence
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

pub fn codes(values: &[&str]) -> Vec<ModuleCode> {
    values.iter().map(|value| ModuleCode::new(value)).collect()
}
