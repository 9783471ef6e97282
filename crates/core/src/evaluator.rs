// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requirement tree evaluation.
//!
//! Turns a programme's stored paths into a parsed forest plus a flat list
//! of processed paths with resolved module codes and the programme's cap
//! rules.

use crate::context::{MaxRule, ProcessedPath};
use crate::error::CoreError;
use crate::gmc::{GmcResolution, resolve_path_codes};
use crate::store::{CatalogStore, GmcMappingStore};
use acadplan_domain::{
    GmcMapping, GmcType, GroupType, RequirementNode, RequirementPath, build_requirement_forest,
};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A programme's requirement tree after evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedProgramme {
    pub programme_id: String,
    /// Roots of every rendered group, in stored order.
    pub forest: Vec<RequirementNode>,
    /// Every rendered path, in stored order.
    pub paths: Vec<ProcessedPath>,
    pub max_rules: Vec<MaxRule>,
    pub hierarchy: BTreeMap<i64, Vec<i64>>,
    index: HashMap<i64, usize>,
}

impl EvaluatedProgramme {
    /// Returns the processed form of a path.
    #[must_use]
    pub fn processed(&self, path_id: i64) -> Option<&ProcessedPath> {
        self.index.get(&path_id).map(|&index| &self.paths[index])
    }

    /// Returns the roots belonging to one group.
    #[must_use]
    pub fn roots_in(&self, group: GroupType) -> Vec<&RequirementNode> {
        self.forest
            .iter()
            .filter(|root| root.path().group_type == group)
            .collect()
    }

    /// Returns the number of resolved module references across all paths.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.paths.iter().map(|path| path.resolved_modules.len()).sum()
    }
}

/// Evaluates one programme's requirement paths.
///
/// Paths outside the rendered groups (unrestricted electives and
/// constraints) are ignored. Leaf paths have their general module codes
/// resolved, minus the path's exception modules; leaf paths with a `max`
/// rule also register a cap rule.
///
/// # Arguments
///
/// * `store` - The catalogue and mapping store
/// * `programme_id` - The programme being evaluated
/// * `paths` - The programme's stored paths, depth ascending
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the paths do not form a valid
/// tree, or `CoreError::Store` if a lookup fails.
pub fn evaluate_programme<S>(
    store: &mut S,
    programme_id: &str,
    paths: &[RequirementPath],
) -> Result<EvaluatedProgramme, CoreError>
where
    S: CatalogStore + GmcMappingStore + ?Sized,
{
    let rendered: Vec<RequirementPath> = paths
        .iter()
        .filter(|path| GroupType::PROCESSING_ORDER.contains(&path.group_type))
        .cloned()
        .collect();

    let forest: Vec<RequirementNode> = build_requirement_forest(programme_id, &rendered)?;

    let mut non_exact: Vec<String> = Vec::new();
    for path in &rendered {
        for gmc in &path.module_codes {
            if gmc.gmc_type != GmcType::Exact && !non_exact.contains(&gmc.code) {
                non_exact.push(gmc.code.clone());
            }
        }
    }
    let mappings: Vec<GmcMapping> = if non_exact.is_empty() {
        Vec::new()
    } else {
        store.gmc_mappings(&[programme_id.to_string()], Some(&non_exact))?
    };

    let mut processed: Vec<ProcessedPath> = Vec::with_capacity(rendered.len());
    let mut max_rules: Vec<MaxRule> = Vec::new();

    for path in rendered {
        let mut resolution: GmcResolution = if path.is_leaf && !path.module_codes.is_empty() {
            resolve_path_codes(store, programme_id, &path.module_codes, &mappings)?
        } else {
            GmcResolution::default()
        };
        // Excluded modules are not members of the leaf; mappings keep them for tracing.
        resolution.modules.retain(|code| !path.excludes(code));

        if path.is_leaf && path.is_max_rule() {
            max_rules.push(MaxRule {
                id: MaxRule::rule_id(programme_id, path.path_id),
                programme_id: programme_id.to_string(),
                path_id: path.path_id,
                path_key: path.path_key.clone(),
                display_label: path.display_label.clone(),
                group_type: path.group_type,
                max_units: path.rule_value.unwrap_or(0),
                affected_modules: resolution.modules.clone(),
            });
        }

        processed.push(ProcessedPath {
            required_units: path.effective_required_units(),
            path,
            resolved_modules: resolution.modules,
            gmc_mappings: resolution.mappings,
        });
    }

    let index: HashMap<i64, usize> = processed
        .iter()
        .enumerate()
        .map(|(position, path)| (path.path.path_id, position))
        .collect();

    let hierarchy: BTreeMap<i64, Vec<i64>> = forest
        .iter()
        .flat_map(RequirementNode::hierarchy)
        .collect();

    debug!(
        programme_id,
        paths = processed.len(),
        roots = forest.len(),
        max_rules = max_rules.len(),
        "Evaluated requirement tree"
    );

    Ok(EvaluatedProgramme {
        programme_id: programme_id.to_string(),
        forest,
        paths: processed,
        max_rules,
        hierarchy,
        index,
    })
}
