// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GeneralModuleCode, GroupType, LogicType, RequirementNode, RequirementPath, RuleType};

/// Creates a root path (depth 0, no parent) of the given logic type.
pub fn create_test_root(path_id: i64, key: &str, group: GroupType, logic: LogicType) -> RequirementPath {
    create_test_path(path_id, key, None, 0, group, logic, &[])
}

/// Creates a LEAF path below `parent` with exact module codes.
pub fn create_test_leaf(
    path_id: i64,
    key: &str,
    parent: &str,
    depth: i32,
    group: GroupType,
    codes: &[&str],
) -> RequirementPath {
    create_test_path(path_id, key, Some(parent), depth, group, LogicType::Leaf, codes)
}

/// Creates an AND/OR group path below `parent`.
pub fn create_test_group(
    path_id: i64,
    key: &str,
    parent: &str,
    depth: i32,
    group: GroupType,
    logic: LogicType,
) -> RequirementPath {
    create_test_path(path_id, key, Some(parent), depth, group, logic, &[])
}

pub fn create_test_path(
    path_id: i64,
    key: &str,
    parent: Option<&str>,
    depth: i32,
    group: GroupType,
    logic: LogicType,
    codes: &[&str],
) -> RequirementPath {
    RequirementPath {
        path_id,
        programme_id: String::from("cs-major"),
        path_key: key.to_string(),
        parent_path_key: parent.map(str::to_string),
        display_label: key.to_string(),
        group_type: group,
        logic_type: logic,
        rule_type: Some(RuleType::Min),
        rule_value: Some(4),
        required_units: None,
        depth,
        is_leaf: logic == LogicType::Leaf,
        is_readonly: false,
        is_overall_source: false,
        raw_tag_name: None,
        module_codes: codes.iter().map(|code| GeneralModuleCode::exact(code)).collect(),
        exception_modules: Vec::new(),
    }
}

/// Returns a node's children; leaves have none.
pub fn children_of(node: &RequirementNode) -> &[RequirementNode] {
    match node {
        RequirementNode::Group { children, .. } => children,
        RequirementNode::Leaf { .. } => &[],
    }
}
