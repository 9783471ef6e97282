// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod boxes;
mod caps;
mod context;
mod error;
mod evaluator;
mod gmc;
mod lookup;
mod memory;
mod payload;
mod pipeline;
mod populator;
mod prerequisites;
mod sanitize;
mod store;
mod validator;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use boxes::{BoxBuilder, build_sections, preselected_boxes, section_key};
pub use caps::{CapUsage, compute_cap_usage, enforce_cap};
pub use context::{
    ContextSummary, MaxRule, ProcessedPath, ProcessedProgramme, ProcessingContext,
    ProcessingStats, ProgrammeSummary,
};
pub use error::{CoreError, ErrorKind, ValidationError};
pub use evaluator::{EvaluatedProgramme, evaluate_programme};
pub use gmc::{GmcResolution, match_catalogue, resolve_path_codes};
pub use lookup::{
    DoubleCountInfo, LeafPathMapping, LookupMaps, analyze_double_count, build_lookup_maps,
};
pub use memory::InMemoryStore;
pub use payload::{
    AltPath, AltPathBox, CourseBox, DropdownBox, ExactBox, ProgrammePayload, ProgrammeSection,
};
pub use pipeline::{AcademicPlan, PlanOutcome, generate_academic_plan};
pub use populator::{PopulatedPlan, populate_payloads};
pub use prerequisites::{PrerequisiteClosure, resolve_prerequisite_closure};
pub use sanitize::{SanitizeReport, is_satisfied, prune_boxes, sanitize_payloads};
pub use store::{
    CatalogStore, GmcMappingStore, PlanStore, PreclusionStore, PrerequisiteStore, ProgrammeStore,
    RequirementPathStore, StoreError,
};
pub use validator::{check_preselected_conflicts, extract_preselected_modules, validate_combination};
