// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Combination-scoped lookup maps and double-count eligibility.

use crate::caps::CapUsage;
use crate::context::MaxRule;
use crate::evaluator::EvaluatedProgramme;
use acadplan_domain::{GroupType, ModuleCode};
use serde::Serialize;
use std::collections::BTreeMap;

/// One leaf path a module appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafPathMapping {
    pub path_key: String,
    pub path_id: i64,
    pub programme_id: String,
    pub display_label: String,
    pub group_type: GroupType,
    pub raw_tag_name: Option<String>,
    pub required_units: u32,
}

impl LeafPathMapping {
    /// Returns the combination-wide key of the leaf: `{programme_id}:{path_key}`.
    #[must_use]
    pub fn leaf_key(&self) -> String {
        format!("{}:{}", self.programme_id, self.path_key)
    }
}

/// Double-count eligibility of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleCountInfo {
    pub cross_programme_eligible: bool,
    pub intra_programme_eligible: bool,
    /// Every programme whose leaf paths list the module.
    pub eligible_programmes: Vec<String>,
    pub cross_programme_paths: Vec<LeafPathMapping>,
    pub intra_programme_paths: Vec<LeafPathMapping>,
    /// Every membership when either kind of eligibility holds.
    pub all_eligible_paths: Vec<LeafPathMapping>,
    /// Upper bound only: one per eligibility kind.
    pub max_possible_double_count: u8,
}

/// Lookup bundle shared by every programme of a combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupMaps {
    pub module_to_leaf_paths: BTreeMap<ModuleCode, Vec<LeafPathMapping>>,
    /// Keyed by `{programme_id}:{path_key}`.
    pub leaf_path_to_modules: BTreeMap<String, Vec<ModuleCode>>,
    pub module_to_max_rules: BTreeMap<ModuleCode, Vec<MaxRule>>,
    pub double_count_eligibility: BTreeMap<ModuleCode, DoubleCountInfo>,
    /// Programme id to parent path id to child path ids.
    pub path_hierarchy: BTreeMap<String, BTreeMap<i64, Vec<i64>>>,
    pub cap_usage: Vec<CapUsage>,
}

impl LookupMaps {
    /// Returns the groups of `programme_id` whose leaves list `code`.
    #[must_use]
    pub fn groups_for(&self, code: &ModuleCode, programme_id: &str) -> Vec<GroupType> {
        let mut groups: Vec<GroupType> = Vec::new();
        for membership in self.module_to_leaf_paths.get(code).into_iter().flatten() {
            if membership.programme_id == programme_id && !groups.contains(&membership.group_type)
            {
                groups.push(membership.group_type);
            }
        }
        groups
    }
}

/// Builds the lookup bundle for every evaluated programme of a combination.
///
/// Leaf memberships cover every leaf with resolved modules except cap-only
/// leaves, which are reported through `module_to_max_rules` instead.
#[must_use]
pub fn build_lookup_maps(evaluated: &[EvaluatedProgramme]) -> LookupMaps {
    let mut maps: LookupMaps = LookupMaps::default();

    for programme in evaluated {
        for processed in &programme.paths {
            let path = &processed.path;
            if !path.is_leaf || path.is_max_rule() || processed.resolved_modules.is_empty() {
                continue;
            }

            let mapping: LeafPathMapping = LeafPathMapping {
                path_key: path.path_key.clone(),
                path_id: path.path_id,
                programme_id: programme.programme_id.clone(),
                display_label: path.display_label.clone(),
                group_type: path.group_type,
                raw_tag_name: path.raw_tag_name.clone(),
                required_units: processed.required_units,
            };

            for code in &processed.resolved_modules {
                maps.module_to_leaf_paths
                    .entry(code.clone())
                    .or_default()
                    .push(mapping.clone());
            }
            maps.leaf_path_to_modules
                .insert(mapping.leaf_key(), processed.resolved_modules.clone());
        }

        for rule in &programme.max_rules {
            for code in &rule.affected_modules {
                maps.module_to_max_rules
                    .entry(code.clone())
                    .or_default()
                    .push(rule.clone());
            }
        }

        maps.path_hierarchy
            .insert(programme.programme_id.clone(), programme.hierarchy.clone());
    }

    maps.double_count_eligibility = analyze_double_count(&maps.module_to_leaf_paths);
    maps
}

/// Computes double-count eligibility for every module with leaf memberships.
///
/// - cross-programme: the module is listed by at least two programmes
/// - intra-programme: within one programme it is listed by at least two
///   leaves, at least one `commonCore` and at least one not
#[must_use]
pub fn analyze_double_count(
    module_to_leaf_paths: &BTreeMap<ModuleCode, Vec<LeafPathMapping>>,
) -> BTreeMap<ModuleCode, DoubleCountInfo> {
    module_to_leaf_paths
        .iter()
        .map(|(code, memberships)| (code.clone(), double_count_for(memberships)))
        .collect()
}

fn double_count_for(memberships: &[LeafPathMapping]) -> DoubleCountInfo {
    let mut eligible_programmes: Vec<String> = Vec::new();
    for membership in memberships {
        if !eligible_programmes.contains(&membership.programme_id) {
            eligible_programmes.push(membership.programme_id.clone());
        }
    }

    let cross: bool = eligible_programmes.len() >= 2;

    let mut intra_programme_paths: Vec<LeafPathMapping> = Vec::new();
    for programme_id in &eligible_programmes {
        let within: Vec<&LeafPathMapping> = memberships
            .iter()
            .filter(|membership| &membership.programme_id == programme_id)
            .collect();
        let has_common_core: bool = within
            .iter()
            .any(|membership| membership.group_type == GroupType::CommonCore);
        let has_other: bool = within
            .iter()
            .any(|membership| membership.group_type != GroupType::CommonCore);
        if within.len() >= 2 && has_common_core && has_other {
            intra_programme_paths.extend(within.into_iter().cloned());
        }
    }
    let intra: bool = !intra_programme_paths.is_empty();

    DoubleCountInfo {
        cross_programme_eligible: cross,
        intra_programme_eligible: intra,
        eligible_programmes,
        cross_programme_paths: if cross { memberships.to_vec() } else { Vec::new() },
        intra_programme_paths,
        all_eligible_paths: if cross || intra {
            memberships.to_vec()
        } else {
            Vec::new()
        },
        max_possible_double_count: u8::from(cross) + u8::from(intra),
    }
}
