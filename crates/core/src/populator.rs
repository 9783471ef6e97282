// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payload construction for a validated combination.

use crate::boxes::build_sections;
use crate::caps::compute_cap_usage;
use crate::context::{ProcessedProgramme, ProcessingContext};
use crate::error::CoreError;
use crate::evaluator::{EvaluatedProgramme, evaluate_programme};
use crate::lookup::{LookupMaps, build_lookup_maps};
use crate::payload::ProgrammePayload;
use crate::sanitize::{SanitizeReport, sanitize_payloads};
use crate::store::PlanStore;
use acadplan_domain::{ModuleCode, ModuleSummary, RequirementPath};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// The payloads and shared lookup bundle of a combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedPlan {
    pub programmes: Vec<ProgrammePayload>,
    pub lookup: LookupMaps,
    pub sanitization: SanitizeReport,
}

/// Builds every programme payload of a validated context.
///
/// Fetches all requirement paths in one batch, evaluates each programme's
/// tree, builds its sections, assembles the lookup bundle with cap usage,
/// then runs the sanitizing post-pass. Evaluated paths, cap rules and path
/// hierarchies are recorded back on the context.
///
/// # Arguments
///
/// * `store` - The lookup store
/// * `context` - A context that passed validation
///
/// # Errors
///
/// Returns `CoreError` if a lookup fails, stored paths do not form a
/// valid tree, or the post-pass finds conflicting preselected modules.
pub fn populate_payloads<S>(
    store: &mut S,
    context: &mut ProcessingContext,
) -> Result<PopulatedPlan, CoreError>
where
    S: PlanStore + ?Sized,
{
    let programme_ids: Vec<String> = context.programme_ids();
    let all_paths: Vec<RequirementPath> = store.requirement_paths(&programme_ids)?;

    let mut evaluated: Vec<EvaluatedProgramme> = Vec::with_capacity(programme_ids.len());
    for programme_id in &programme_ids {
        let paths: Vec<RequirementPath> = all_paths
            .iter()
            .filter(|path| &path.programme_id == programme_id)
            .cloned()
            .collect();
        let programme: EvaluatedProgramme = evaluate_programme(store, programme_id, &paths)?;

        context.record_modules_processed(programme.module_count());
        for rule in &programme.max_rules {
            context.add_max_rule(rule.clone());
        }
        if let Some(processed) = context.programme_mut(programme_id) {
            processed.paths = programme.paths.clone();
            processed.max_rules = programme.max_rules.clone();
            processed.path_hierarchy = programme.hierarchy.clone();
        }
        evaluated.push(programme);
    }

    let mut payloads: Vec<ProgrammePayload> = Vec::with_capacity(evaluated.len());
    for (processed, programme) in context.programmes().iter().zip(&evaluated) {
        payloads.push(build_payload(processed, programme));
    }

    let mut lookup: LookupMaps = build_lookup_maps(&evaluated);
    let selected: Vec<ModuleCode> = context.preselected_modules();
    let units: BTreeMap<ModuleCode, u32> = if context.max_rules().is_empty() {
        BTreeMap::new()
    } else {
        store
            .module_summaries(&selected)?
            .into_iter()
            .map(|summary: ModuleSummary| (summary.code, summary.units))
            .collect()
    };
    lookup.cap_usage = compute_cap_usage(context.max_rules(), &selected, &units);

    let sanitization: SanitizeReport = sanitize_payloads(store, context, &lookup, &mut payloads)?;

    info!(
        programmes = payloads.len(),
        modules = lookup.module_to_leaf_paths.len(),
        max_rules = context.max_rules().len(),
        "Populated programme payloads"
    );

    Ok(PopulatedPlan {
        programmes: payloads,
        lookup,
        sanitization,
    })
}

fn build_payload(processed: &ProcessedProgramme, evaluated: &EvaluatedProgramme) -> ProgrammePayload {
    let payload: ProgrammePayload = ProgrammePayload {
        metadata: processed.programme.clone(),
        sections: build_sections(processed, evaluated),
        preselected_modules: processed.preselected_modules.clone(),
        prerequisite_modules: processed.prerequisite_modules.clone(),
        max_rules: evaluated.max_rules.clone(),
    };
    debug!(
        programme_id = processed.id(),
        sections = payload.sections.len(),
        "Built programme payload"
    );
    payload
}
