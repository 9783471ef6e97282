// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine lookup contracts backed by `SQLite`.

use acadplan::{
    CatalogStore, GmcMappingStore, PreclusionStore, PrerequisiteStore, ProgrammeStore,
    RequirementPathStore, StoreError,
};
use acadplan_domain::{
    GmcMapping, ModuleCode, ModulePreclusion, ModuleSummary, PrereqTree, Programme,
    ProgrammePreclusion, RequirementPath, SimplePrerequisite,
};

use crate::Persistence;
use crate::queries;

impl CatalogStore for Persistence {
    fn existing_modules(&mut self, codes: &[ModuleCode]) -> Result<Vec<ModuleCode>, StoreError> {
        Ok(queries::catalogue::existing_module_codes(&mut self.conn, codes)?)
    }

    fn modules_by_prefix(&mut self, prefix: &str) -> Result<Vec<ModuleSummary>, StoreError> {
        Ok(queries::catalogue::modules_with_prefix(&mut self.conn, prefix)?)
    }

    fn find_module(&mut self, code: &ModuleCode) -> Result<Option<ModuleSummary>, StoreError> {
        Ok(queries::catalogue::find_module(&mut self.conn, code)?)
    }

    fn module_summaries(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<ModuleSummary>, StoreError> {
        Ok(queries::catalogue::module_summaries(&mut self.conn, codes)?)
    }
}

impl RequirementPathStore for Persistence {
    fn requirement_paths(
        &mut self,
        programme_ids: &[String],
    ) -> Result<Vec<RequirementPath>, StoreError> {
        Ok(queries::paths::requirement_paths_for(&mut self.conn, programme_ids)?)
    }
}

impl ProgrammeStore for Persistence {
    fn programmes(&mut self, programme_ids: &[String]) -> Result<Vec<Programme>, StoreError> {
        Ok(queries::programmes::find_programmes(&mut self.conn, programme_ids)?)
    }

    fn programme_preclusions(
        &mut self,
        programme_ids: &[String],
    ) -> Result<Vec<ProgrammePreclusion>, StoreError> {
        Ok(queries::programmes::preclusions_among(&mut self.conn, programme_ids)?)
    }
}

impl GmcMappingStore for Persistence {
    fn gmc_mappings(
        &mut self,
        programme_ids: &[String],
        gmc_codes: Option<&[String]>,
    ) -> Result<Vec<GmcMapping>, StoreError> {
        Ok(queries::rules::gmc_mappings_for(
            &mut self.conn,
            programme_ids,
            gmc_codes,
        )?)
    }
}

impl PrerequisiteStore for Persistence {
    fn simple_prerequisites(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<SimplePrerequisite>, StoreError> {
        Ok(queries::rules::simple_prerequisites_for(&mut self.conn, codes)?)
    }

    fn prerequisite_trees(
        &mut self,
        codes: &[ModuleCode],
    ) -> Result<Vec<(ModuleCode, PrereqTree)>, StoreError> {
        Ok(queries::catalogue::prerequisite_trees(&mut self.conn, codes)?)
    }
}

impl PreclusionStore for Persistence {
    fn preclusions(&mut self, codes: &[ModuleCode]) -> Result<Vec<ModulePreclusion>, StoreError> {
        Ok(queries::rules::preclusions_for(&mut self.conn, codes)?)
    }
}
