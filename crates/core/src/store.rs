// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lookup contracts the engine consumes.
//!
//! Every method is a batched, idempotent read. Implementations hold a
//! single connection per request, so methods take `&mut self`.

use acadplan_domain::{
    GmcMapping, ModuleCode, ModulePreclusion, ModuleSummary, PrereqTree, Programme,
    ProgrammePreclusion, RequirementPath, SimplePrerequisite,
};
use thiserror::Error;

/// Failures reported by a store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A query was rejected or failed mid-flight.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored data could not be interpreted.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// Module catalogue lookups.
pub trait CatalogStore {
    /// Returns which of `codes` exist in the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn existing_modules(&mut self, codes: &[ModuleCode]) -> Result<Vec<ModuleCode>, StoreError>;

    /// Returns every module whose code starts with `prefix`, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn modules_by_prefix(&mut self, prefix: &str) -> Result<Vec<ModuleSummary>, StoreError>;

    /// Returns the module with exactly this code, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn find_module(&mut self, code: &ModuleCode) -> Result<Option<ModuleSummary>, StoreError>;

    /// Returns summaries for whichever of `codes` exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn module_summaries(&mut self, codes: &[ModuleCode])
    -> Result<Vec<ModuleSummary>, StoreError>;
}

/// Requirement path lookups.
pub trait RequirementPathStore {
    /// Returns every requirement path of the given programmes, depth ascending.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn requirement_paths(
        &mut self,
        programme_ids: &[String],
    ) -> Result<Vec<RequirementPath>, StoreError>;
}

/// Programme metadata lookups.
pub trait ProgrammeStore {
    /// Returns metadata for whichever of `programme_ids` exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn programmes(&mut self, programme_ids: &[String]) -> Result<Vec<Programme>, StoreError>;

    /// Returns preclusion rows whose both ends are among `programme_ids`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn programme_preclusions(
        &mut self,
        programme_ids: &[String],
    ) -> Result<Vec<ProgrammePreclusion>, StoreError>;
}

/// General module code mapping lookups.
pub trait GmcMappingStore {
    /// Returns resolved mappings of non-exact codes for the given programmes.
    ///
    /// When `gmc_codes` is given only mappings of those codes are returned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn gmc_mappings(
        &mut self,
        programme_ids: &[String],
        gmc_codes: Option<&[String]>,
    ) -> Result<Vec<GmcMapping>, StoreError>;
}

/// Prerequisite lookups.
pub trait PrerequisiteStore {
    /// Returns the single-module prerequisite lists of `codes`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn simple_prerequisites(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<SimplePrerequisite>, StoreError>;

    /// Returns the full prerequisite trees of whichever of `codes` have one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn prerequisite_trees(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<(ModuleCode, PrereqTree)>, StoreError>;
}

/// Module preclusion lookups.
pub trait PreclusionStore {
    /// Returns the precluded modules of each of `codes`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    fn preclusions(&mut self, codes: &[ModuleCode]) -> Result<Vec<ModulePreclusion>, StoreError>;
}

/// Everything the full pipeline needs.
pub trait PlanStore:
    CatalogStore
    + RequirementPathStore
    + ProgrammeStore
    + GmcMappingStore
    + PrerequisiteStore
    + PreclusionStore
{
}

impl<T> PlanStore for T where
    T: CatalogStore
        + RequirementPathStore
        + ProgrammeStore
        + GmcMappingStore
        + PrerequisiteStore
        + PreclusionStore
{
}
