// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-memory [`PlanStore`](crate::PlanStore) for tests and embedding.

use crate::store::{
    CatalogStore, GmcMappingStore, PreclusionStore, PrerequisiteStore, ProgrammeStore,
    RequirementPathStore, StoreError,
};
use acadplan_domain::{
    GmcMapping, ModuleCode, ModulePreclusion, ModuleSummary, PrereqTree, Programme,
    ProgrammePreclusion, RequirementPath, SimplePrerequisite,
};
use std::collections::BTreeMap;

/// A store holding every table in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    programmes: Vec<Programme>,
    programme_preclusions: Vec<ProgrammePreclusion>,
    modules: BTreeMap<ModuleCode, ModuleSummary>,
    paths: Vec<RequirementPath>,
    gmc_mappings: Vec<GmcMapping>,
    simple_prerequisites: BTreeMap<ModuleCode, Vec<ModuleCode>>,
    prerequisite_trees: BTreeMap<ModuleCode, PrereqTree>,
    preclusions: BTreeMap<ModuleCode, Vec<ModuleCode>>,
    fail_prerequisite_batch: Option<usize>,
    prerequisite_batches: usize,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_programme(mut self, programme: Programme) -> Self {
        self.programmes.push(programme);
        self
    }

    /// Declares that two programmes cannot be combined.
    #[must_use]
    pub fn with_programme_preclusion(mut self, first: &str, second: &str) -> Self {
        self.programme_preclusions.push(ProgrammePreclusion {
            programme_id: first.to_string(),
            precluded_programme_id: second.to_string(),
        });
        self
    }

    #[must_use]
    pub fn with_module(mut self, code: &str, title: &str, units: u32) -> Self {
        let summary: ModuleSummary = ModuleSummary::new(code, title, units);
        self.modules.insert(summary.code.clone(), summary);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: RequirementPath) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_gmc_mapping(mut self, mapping: GmcMapping) -> Self {
        self.gmc_mappings.push(mapping);
        self
    }

    /// Sets the simple prerequisites of a module.
    #[must_use]
    pub fn with_simple_prerequisites(mut self, code: &str, prerequisites: &[&str]) -> Self {
        self.simple_prerequisites.insert(
            ModuleCode::new(code),
            prerequisites.iter().map(|p| ModuleCode::new(p)).collect(),
        );
        self
    }

    #[must_use]
    pub fn with_prerequisite_tree(mut self, code: &str, tree: PrereqTree) -> Self {
        self.prerequisite_trees.insert(ModuleCode::new(code), tree);
        self
    }

    /// Records that `code` precludes `precluded`. Only this direction is stored.
    #[must_use]
    pub fn with_preclusion(mut self, code: &str, precluded: &str) -> Self {
        self.preclusions
            .entry(ModuleCode::new(code))
            .or_default()
            .push(ModuleCode::new(precluded));
        self
    }

    /// Makes the n-th (1-based) simple prerequisite batch, and every later one, fail.
    #[must_use]
    pub fn failing_prerequisite_batch(mut self, batch: usize) -> Self {
        self.fail_prerequisite_batch = Some(batch);
        self
    }

    /// Returns the number of simple prerequisite batches requested so far.
    #[must_use]
    pub const fn prerequisite_batches(&self) -> usize {
        self.prerequisite_batches
    }
}

impl CatalogStore for InMemoryStore {
    fn existing_modules(&mut self, codes: &[ModuleCode]) -> Result<Vec<ModuleCode>, StoreError> {
        Ok(codes
            .iter()
            .filter(|code| self.modules.contains_key(*code))
            .cloned()
            .collect())
    }

    fn modules_by_prefix(&mut self, prefix: &str) -> Result<Vec<ModuleSummary>, StoreError> {
        Ok(self
            .modules
            .values()
            .filter(|summary| summary.code.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn find_module(&mut self, code: &ModuleCode) -> Result<Option<ModuleSummary>, StoreError> {
        Ok(self.modules.get(code).cloned())
    }

    fn module_summaries(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<ModuleSummary>, StoreError> {
        Ok(codes
            .iter()
            .filter_map(|code| self.modules.get(code).cloned())
            .collect())
    }
}

impl RequirementPathStore for InMemoryStore {
    fn requirement_paths(
        &mut self,
        programme_ids: &[String],
    ) -> Result<Vec<RequirementPath>, StoreError> {
        let mut paths: Vec<RequirementPath> = self
            .paths
            .iter()
            .filter(|path| programme_ids.contains(&path.programme_id))
            .cloned()
            .collect();
        paths.sort_by_key(|path| path.depth);
        Ok(paths)
    }
}

impl ProgrammeStore for InMemoryStore {
    fn programmes(&mut self, programme_ids: &[String]) -> Result<Vec<Programme>, StoreError> {
        Ok(self
            .programmes
            .iter()
            .filter(|programme| programme_ids.contains(&programme.id))
            .cloned()
            .collect())
    }

    fn programme_preclusions(
        &mut self,
        programme_ids: &[String],
    ) -> Result<Vec<ProgrammePreclusion>, StoreError> {
        Ok(self
            .programme_preclusions
            .iter()
            .filter(|row| {
                programme_ids.contains(&row.programme_id)
                    && programme_ids.contains(&row.precluded_programme_id)
            })
            .cloned()
            .collect())
    }
}

impl GmcMappingStore for InMemoryStore {
    fn gmc_mappings(
        &mut self,
        programme_ids: &[String],
        gmc_codes: Option<&[String]>,
    ) -> Result<Vec<GmcMapping>, StoreError> {
        Ok(self
            .gmc_mappings
            .iter()
            .filter(|mapping| programme_ids.contains(&mapping.programme_id))
            .filter(|mapping| gmc_codes.is_none_or(|codes| codes.contains(&mapping.gmc_code)))
            .cloned()
            .collect())
    }
}

impl PrerequisiteStore for InMemoryStore {
    fn simple_prerequisites(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<SimplePrerequisite>, StoreError> {
        self.prerequisite_batches += 1;
        if self
            .fail_prerequisite_batch
            .is_some_and(|batch| self.prerequisite_batches >= batch)
        {
            return Err(StoreError::Unavailable(format!(
                "prerequisite batch {} rejected",
                self.prerequisite_batches
            )));
        }

        Ok(codes
            .iter()
            .filter_map(|code| {
                self.simple_prerequisites
                    .get(code)
                    .map(|prerequisites| SimplePrerequisite {
                        module_code: code.clone(),
                        prerequisites: prerequisites.clone(),
                    })
            })
            .collect())
    }

    fn prerequisite_trees(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<(ModuleCode, PrereqTree)>, StoreError> {
        Ok(codes
            .iter()
            .filter_map(|code| {
                self.prerequisite_trees
                    .get(code)
                    .map(|tree| (code.clone(), tree.clone()))
            })
            .collect())
    }
}

impl PreclusionStore for InMemoryStore {
    fn preclusions(&mut self, codes: &[ModuleCode]) -> Result<Vec<ModulePreclusion>, StoreError> {
        Ok(codes
            .iter()
            .filter_map(|code| {
                self.preclusions.get(code).map(|precluded| ModulePreclusion {
                    module_code: code.clone(),
                    precluded: precluded.clone(),
                })
            })
            .collect())
    }
}
