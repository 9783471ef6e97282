// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ErrorKind, ValidationError};
use acadplan_domain::{
    GmcMapping, GmcType, GroupType, ModuleCode, Programme, ProgrammeType, RequirementPath,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{error, info, warn};

/// A unit cap over a pool of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxRule {
    /// `{programme_id}_{path_id}`
    pub id: String,
    pub programme_id: String,
    pub path_id: i64,
    pub path_key: String,
    pub display_label: String,
    pub group_type: GroupType,
    pub max_units: u32,
    /// The modules carrying this rule's tag.
    pub affected_modules: Vec<ModuleCode>,
}

impl MaxRule {
    /// Builds the rule identifier for a programme's path.
    #[must_use]
    pub fn rule_id(programme_id: &str, path_id: i64) -> String {
        format!("{programme_id}_{path_id}")
    }
}

/// A requirement path after GMC resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPath {
    #[serde(flatten)]
    pub path: RequirementPath,
    /// Concrete modules, de-duplicated in first-seen order.
    pub resolved_modules: Vec<ModuleCode>,
    pub gmc_mappings: Vec<GmcMapping>,
    pub required_units: u32,
}

impl ProcessedPath {
    /// Returns the modules that came from non-exact codes, minus exceptions.
    #[must_use]
    pub fn non_exact_modules(&self) -> Vec<ModuleCode> {
        let mut modules: Vec<ModuleCode> = Vec::new();
        for mapping in &self.gmc_mappings {
            if mapping.gmc_type != GmcType::Exact
                && !self.path.excludes(&mapping.module_code)
                && !modules.contains(&mapping.module_code)
            {
                modules.push(mapping.module_code.clone());
            }
        }
        modules
    }
}

/// A programme together with everything derived for it during a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedProgramme {
    pub programme: Programme,
    pub paths: Vec<ProcessedPath>,
    pub max_rules: Vec<MaxRule>,
    /// Direct mandatory modules followed by their resolved prerequisites.
    pub preselected_modules: Vec<ModuleCode>,
    /// The subset of `preselected_modules` added by prerequisite resolution.
    pub prerequisite_modules: Vec<ModuleCode>,
    /// Parent path id to child path ids.
    pub path_hierarchy: BTreeMap<i64, Vec<i64>>,
}

impl ProcessedProgramme {
    /// Creates an unprocessed entry for a programme.
    #[must_use]
    pub const fn new(programme: Programme) -> Self {
        Self {
            programme,
            paths: Vec::new(),
            max_rules: Vec::new(),
            preselected_modules: Vec::new(),
            prerequisite_modules: Vec::new(),
            path_hierarchy: BTreeMap::new(),
        }
    }

    /// Returns the programme id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.programme.id
    }

    /// Returns whether `code` was added only as a prerequisite.
    #[must_use]
    pub fn is_prerequisite_module(&self, code: &ModuleCode) -> bool {
        self.prerequisite_modules.contains(code)
    }
}

/// Counters describing one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub programmes_processed: usize,
    pub paths_processed: usize,
    pub modules_processed: usize,
    pub preselected_modules: usize,
    pub max_rules: usize,
    pub errors: usize,
    pub elapsed_ms: u64,
}

/// Name and type of a programme in a context summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammeSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub programme_type: ProgrammeType,
}

/// A compact description of a context, used in responses and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSummary {
    pub programmes: Vec<ProgrammeSummary>,
    pub preselected_modules: usize,
    pub max_rules: usize,
    pub errors: usize,
    pub is_valid: bool,
}

/// Per-request state shared by every engine component.
///
/// Created fresh for each request and discarded afterwards. Components
/// append to it rather than returning domain failures.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    programmes: Vec<ProcessedProgramme>,
    preselected_owners: BTreeMap<ModuleCode, Vec<String>>,
    max_rules: Vec<MaxRule>,
    errors: Vec<ValidationError>,
    paths_processed: usize,
    modules_processed: usize,
    started_at: Instant,
}

impl ProcessingContext {
    /// Creates an empty context and starts its clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            programmes: Vec::new(),
            preselected_owners: BTreeMap::new(),
            max_rules: Vec::new(),
            errors: Vec::new(),
            paths_processed: 0,
            modules_processed: 0,
            started_at: Instant::now(),
        }
    }

    /// Registers a programme. Programmes keep their registration order.
    pub fn add_programme(&mut self, programme: ProcessedProgramme) {
        self.programmes.push(programme);
    }

    /// Returns every registered programme in registration order.
    #[must_use]
    pub fn programmes(&self) -> &[ProcessedProgramme] {
        &self.programmes
    }

    /// Returns the ids of every registered programme.
    #[must_use]
    pub fn programme_ids(&self) -> Vec<String> {
        self.programmes
            .iter()
            .map(|programme| programme.id().to_string())
            .collect()
    }

    /// Looks up a registered programme.
    #[must_use]
    pub fn programme(&self, programme_id: &str) -> Option<&ProcessedProgramme> {
        self.programmes
            .iter()
            .find(|programme| programme.id() == programme_id)
    }

    /// Looks up a registered programme for modification.
    pub fn programme_mut(&mut self, programme_id: &str) -> Option<&mut ProcessedProgramme> {
        self.programmes
            .iter_mut()
            .find(|programme| programme.id() == programme_id)
    }

    /// Records that `programme_id` requires `code`.
    ///
    /// A module required by several programmes accumulates several owners.
    pub fn add_preselected_module(&mut self, code: ModuleCode, programme_id: &str) {
        let owners: &mut Vec<String> = self.preselected_owners.entry(code).or_default();
        if !owners.iter().any(|owner| owner == programme_id) {
            owners.push(programme_id.to_string());
        }
    }

    /// Returns every preselected module across the combination, ordered by code.
    #[must_use]
    pub fn preselected_modules(&self) -> Vec<ModuleCode> {
        self.preselected_owners.keys().cloned().collect()
    }

    /// Returns whether any programme preselected `code`.
    #[must_use]
    pub fn is_preselected(&self, code: &ModuleCode) -> bool {
        self.preselected_owners.contains_key(code)
    }

    /// Returns the programmes that preselected `code`.
    #[must_use]
    pub fn programmes_for_module(&self, code: &ModuleCode) -> &[String] {
        self.preselected_owners
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Registers a cap rule.
    pub fn add_max_rule(&mut self, rule: MaxRule) {
        self.max_rules.push(rule);
    }

    /// Returns every registered cap rule.
    #[must_use]
    pub fn max_rules(&self) -> &[MaxRule] {
        &self.max_rules
    }

    /// Appends an error and logs it at a level matching its kind.
    pub fn add_error(&mut self, err: ValidationError) {
        match err.kind {
            ErrorKind::HardError => {
                error!(programme_ids = ?err.programme_ids, message = %err.message, "Hard error");
            }
            ErrorKind::InvalidProgrammeCombination => {
                info!(programme_ids = ?err.programme_ids, message = %err.message, "Invalid programme combination");
            }
            ErrorKind::SoftError => {
                warn!(programme_ids = ?err.programme_ids, message = %err.message, "Soft error");
            }
        }
        self.errors.push(err);
    }

    /// Returns every recorded error in the order recorded.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns whether any error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns whether an error of the given kind was recorded.
    #[must_use]
    pub fn has_error_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|err| err.kind == kind)
    }

    /// Returns whether any recorded error stops the pipeline.
    #[must_use]
    pub fn has_fatal_errors(&self) -> bool {
        self.errors.iter().any(|err| err.kind.is_fatal())
    }

    /// Returns the recorded errors that do not stop the pipeline.
    #[must_use]
    pub fn non_fatal_errors(&self) -> Vec<ValidationError> {
        self.errors
            .iter()
            .filter(|err| !err.kind.is_fatal())
            .cloned()
            .collect()
    }

    /// Adds to the processed path counter.
    pub const fn record_paths_processed(&mut self, count: usize) {
        self.paths_processed += count;
    }

    /// Adds to the processed module counter.
    pub const fn record_modules_processed(&mut self, count: usize) {
        self.modules_processed += count;
    }

    /// Returns the run's counters.
    #[must_use]
    pub fn stats(&self) -> ProcessingStats {
        ProcessingStats {
            programmes_processed: self.programmes.len(),
            paths_processed: self.paths_processed,
            modules_processed: self.modules_processed,
            preselected_modules: self.preselected_owners.len(),
            max_rules: self.max_rules.len(),
            errors: self.errors.len(),
            elapsed_ms: u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns a compact description of the context.
    #[must_use]
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            programmes: self
                .programmes
                .iter()
                .map(|processed| ProgrammeSummary {
                    id: processed.programme.id.clone(),
                    name: processed.programme.name.clone(),
                    programme_type: processed.programme.programme_type,
                })
                .collect(),
            preselected_modules: self.preselected_owners.len(),
            max_rules: self.max_rules.len(),
            errors: self.errors.len(),
            is_valid: !self.has_fatal_errors(),
        }
    }
}

impl Default for ProcessingContext {
    fn default() -> Self {
        Self::new()
    }
}
