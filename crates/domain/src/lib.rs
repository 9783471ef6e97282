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

mod error;
mod keys;
mod prereq_tree;
mod requirement_tree;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use keys::{convert_to_id, prettify};
pub use prereq_tree::PrereqTree;
pub use requirement_tree::{RequirementNode, build_requirement_forest};
pub use types::{
    GeneralModuleCode, GmcMapping, GmcType, GroupType, LogicType, ModuleCode, ModulePreclusion,
    ModuleSummary, Programme, ProgrammePreclusion, ProgrammeType, RequirementPath, RuleType,
    SimplePrerequisite,
};
pub use validation::{MAX_PROGRAMMES, conflicting_majors, validate_programme_selection};
