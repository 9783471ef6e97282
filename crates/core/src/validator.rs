// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Programme combination validation and preselected module extraction.

use crate::context::{ProcessedProgramme, ProcessingContext};
use crate::error::{CoreError, ValidationError};
use crate::prerequisites::{PrerequisiteClosure, resolve_prerequisite_closure};
use crate::store::PlanStore;
use acadplan_domain::{
    ModuleCode, ModulePreclusion, Programme, ProgrammePreclusion, RequirementPath,
    conflicting_majors,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Validates a programme combination and resolves its preselected modules.
///
/// Checks run in order and stop at the first failing class:
///
/// 1. every programme exists
/// 2. at most one major is selected
/// 3. no two selected programmes preclude each other
///
/// Only then is each programme's preselection extracted, followed by one
/// combination-wide module preclusion check. Findings are recorded on
/// `context`.
///
/// # Arguments
///
/// * `store` - The lookup store
/// * `programme_ids` - The requested programmes
/// * `context` - The request's processing context
///
/// # Errors
///
/// Returns `CoreError` if a store lookup fails outside the prerequisite
/// batch loop.
pub fn validate_combination<S>(
    store: &mut S,
    programme_ids: &[String],
    context: &mut ProcessingContext,
) -> Result<(), CoreError>
where
    S: PlanStore + ?Sized,
{
    let found: Vec<Programme> = store.programmes(programme_ids)?;
    let missing: Vec<String> = programme_ids
        .iter()
        .filter(|id| !found.iter().any(|programme| &programme.id == *id))
        .cloned()
        .collect();
    if !missing.is_empty() {
        context.add_error(ValidationError::hard(
            format!("Programmes not found: {}", missing.join(", ")),
            missing,
        ));
        return Ok(());
    }

    // Keep request order regardless of store order.
    let programmes: Vec<Programme> = programme_ids
        .iter()
        .filter_map(|id| found.iter().find(|programme| &programme.id == id).cloned())
        .collect();
    for programme in &programmes {
        context.add_programme(ProcessedProgramme::new(programme.clone()));
    }

    let majors: Vec<String> = conflicting_majors(&programmes);
    if !majors.is_empty() {
        context.add_error(ValidationError::invalid_combination(
            format!(
                "At most one major may be selected, found: {}",
                majors.join(", ")
            ),
            majors,
        ));
        return Ok(());
    }

    let preclusions: Vec<ProgrammePreclusion> = store.programme_preclusions(programme_ids)?;
    let mut reported: BTreeSet<(String, String)> = BTreeSet::new();
    for preclusion in preclusions {
        let first: &String = &preclusion.programme_id;
        let second: &String = &preclusion.precluded_programme_id;
        if first == second || !programme_ids.contains(first) || !programme_ids.contains(second) {
            continue;
        }
        let pair: (String, String) = if first < second {
            (first.clone(), second.clone())
        } else {
            (second.clone(), first.clone())
        };
        if reported.insert(pair) {
            context.add_error(ValidationError::invalid_combination(
                format!("Programmes {first} and {second} cannot be taken together"),
                vec![first.clone(), second.clone()],
            ));
        }
    }
    if context.has_fatal_errors() {
        return Ok(());
    }

    for programme in &programmes {
        let paths: Vec<RequirementPath> = store.requirement_paths(&[programme.id.clone()])?;
        context.record_paths_processed(paths.len());
        extract_preselected_modules(store, context, &programme.id, &paths);
        if context.has_fatal_errors() {
            return Ok(());
        }
    }

    check_preselected_conflicts(store, context)
}

/// Resolves one programme's mandatory modules and registers them.
///
/// Direct modules are the exact codes of leaf, readonly `coreEssentials`
/// paths. Their simple prerequisite closure is added; a failed closure
/// batch is recorded as a `SOFT_ERROR` and the partial closure is kept.
///
/// # Arguments
///
/// * `store` - The lookup store
/// * `context` - The request's processing context
/// * `programme_id` - The programme being processed
/// * `paths` - The programme's requirement paths
pub fn extract_preselected_modules<S>(
    store: &mut S,
    context: &mut ProcessingContext,
    programme_id: &str,
    paths: &[RequirementPath],
) where
    S: PlanStore + ?Sized,
{
    let mut direct: Vec<ModuleCode> = Vec::new();
    for path in paths.iter().filter(|path| path.is_preselection_source()) {
        for code in path.exact_module_codes() {
            if !direct.contains(&code) {
                direct.push(code);
            }
        }
    }

    let closure: PrerequisiteClosure = resolve_prerequisite_closure(store, &direct);
    if let Some(failure) = &closure.failure {
        context.add_error(ValidationError::soft(
            format!("Prerequisite resolution for {programme_id} is incomplete: {failure}"),
            vec![programme_id.to_string()],
        ));
    }

    info!(
        programme_id,
        direct = direct.len(),
        prerequisites = closure.prerequisites.len(),
        "Resolved preselected modules"
    );

    for code in &closure.modules {
        context.add_preselected_module(code.clone(), programme_id);
    }
    context.record_modules_processed(closure.modules.len());

    if let Some(processed) = context.programme_mut(programme_id) {
        processed.preselected_modules = closure.modules;
        processed.prerequisite_modules = closure.prerequisites;
    }
}

/// Rejects combinations whose preselected modules preclude each other.
///
/// Runs once after every programme has been processed. Each unordered
/// conflicting pair yields one `INVALID_PROGRAMME_COMBINATION` error naming
/// every programme that owns either module.
///
/// # Errors
///
/// Returns `CoreError::Store` if the preclusion lookup fails.
pub fn check_preselected_conflicts<S>(
    store: &mut S,
    context: &mut ProcessingContext,
) -> Result<(), CoreError>
where
    S: PlanStore + ?Sized,
{
    let preselected: Vec<ModuleCode> = context.preselected_modules();
    if preselected.is_empty() {
        return Ok(());
    }

    let rows: Vec<ModulePreclusion> = store.preclusions(&preselected)?;
    let mut reported: BTreeSet<(ModuleCode, ModuleCode)> = BTreeSet::new();
    let mut conflicts: Vec<ValidationError> = Vec::new();

    for row in rows {
        if !context.is_preselected(&row.module_code) {
            continue;
        }
        for precluded in &row.precluded {
            if precluded == &row.module_code || !context.is_preselected(precluded) {
                continue;
            }
            let pair: (ModuleCode, ModuleCode) = if row.module_code < *precluded {
                (row.module_code.clone(), precluded.clone())
            } else {
                (precluded.clone(), row.module_code.clone())
            };
            if !reported.insert(pair) {
                continue;
            }

            let mut owners: Vec<String> = context.programmes_for_module(&row.module_code).to_vec();
            for owner in context.programmes_for_module(precluded) {
                if !owners.contains(owner) {
                    owners.push(owner.clone());
                }
            }
            conflicts.push(
                ValidationError::invalid_combination(
                    format!(
                        "Required modules {} and {precluded} preclude each other",
                        row.module_code
                    ),
                    owners,
                )
                .with_module(row.module_code.clone()),
            );
        }
    }

    debug!(
        preselected = preselected.len(),
        conflicts = conflicts.len(),
        "Checked preselected module preclusions"
    );
    for conflict in conflicts {
        context.add_error(conflict);
    }
    Ok(())
}
