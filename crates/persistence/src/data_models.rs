// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row types and their conversion into domain values.
//!
//! List-valued columns are JSON arrays stored as text.

use acadplan_domain::{
    GeneralModuleCode, GmcMapping, GmcType, GroupType, LogicType, ModuleCode, ModulePreclusion,
    ModuleSummary, PrereqTree, Programme, ProgrammePreclusion, ProgrammeType, RequirementPath,
    RuleType, SimplePrerequisite,
};
use diesel::prelude::*;

use crate::diesel_schema::{
    gmc_mappings, modules, preclusion_rules, prerequisite_rules, programme_preclusions,
    programmes, requirement_paths,
};
use crate::error::PersistenceError;

fn units(table: &'static str, value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|e| PersistenceError::invalid_row(table, e))
}

fn optional_units(table: &'static str, value: Option<i32>) -> Result<Option<u32>, PersistenceError> {
    value.map(|v| units(table, v)).transpose()
}

fn codes_from_json(table: &'static str, raw: &str) -> Result<Vec<ModuleCode>, PersistenceError> {
    let values: Vec<String> =
        serde_json::from_str(raw).map_err(|e| PersistenceError::invalid_row(table, e))?;
    Ok(values.iter().map(|value| ModuleCode::new(value)).collect())
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = programmes)]
pub struct ProgrammeRow {
    pub programme_id: String,
    pub name: String,
    pub programme_type: String,
    pub required_units: i32,
    pub double_count_cap: i32,
}

impl TryFrom<ProgrammeRow> for Programme {
    type Error = PersistenceError;

    fn try_from(row: ProgrammeRow) -> Result<Self, Self::Error> {
        let programme_type: ProgrammeType = row
            .programme_type
            .parse()
            .map_err(|e| PersistenceError::invalid_row("programmes", e))?;
        Ok(Self::new(
            &row.programme_id,
            &row.name,
            programme_type,
            units("programmes", row.required_units)?,
            units("programmes", row.double_count_cap)?,
        ))
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = programme_preclusions)]
pub struct ProgrammePreclusionRow {
    pub programme_id: String,
    pub precluded_programme_id: String,
}

impl From<ProgrammePreclusionRow> for ProgrammePreclusion {
    fn from(row: ProgrammePreclusionRow) -> Self {
        Self {
            programme_id: row.programme_id,
            precluded_programme_id: row.precluded_programme_id,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = modules)]
pub struct ModuleRow {
    pub module_code: String,
    pub title: String,
    pub module_credit: i32,
    pub prereq_tree: Option<String>,
}

impl ModuleRow {
    pub fn summary(&self) -> Result<ModuleSummary, PersistenceError> {
        Ok(ModuleSummary::new(
            &self.module_code,
            &self.title,
            units("modules", self.module_credit)?,
        ))
    }

    /// Parses the stored prerequisite tree, if any.
    pub fn prerequisite_tree(&self) -> Result<Option<PrereqTree>, PersistenceError> {
        self.prereq_tree
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                serde_json::from_str::<PrereqTree>(raw)
                    .map_err(|e| PersistenceError::invalid_row("modules", e))
            })
            .transpose()
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = requirement_paths)]
pub struct RequirementPathRow {
    pub path_id: i64,
    pub programme_id: String,
    pub path_key: String,
    pub parent_path_key: Option<String>,
    pub display_label: String,
    pub group_type: String,
    pub logic_type: String,
    pub rule_type: Option<String>,
    pub rule_value: Option<i32>,
    pub required_units: Option<i32>,
    pub depth: i32,
    pub is_leaf: i32,
    pub is_readonly: i32,
    pub is_overall_source: i32,
    pub raw_tag_name: Option<String>,
    pub module_codes: String,
    pub module_types: String,
    pub exception_modules: String,
}

impl TryFrom<RequirementPathRow> for RequirementPath {
    type Error = PersistenceError;

    fn try_from(row: RequirementPathRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "requirement_paths";
        let invalid = |e: acadplan_domain::DomainError| PersistenceError::invalid_row(TABLE, e);

        let group_type: GroupType = row.group_type.parse().map_err(invalid)?;
        let logic_type: LogicType = row.logic_type.parse().map_err(invalid)?;
        let rule_type: Option<RuleType> = row
            .rule_type
            .as_deref()
            .map(str::parse::<RuleType>)
            .transpose()
            .map_err(invalid)?;

        let codes: Vec<String> = serde_json::from_str(&row.module_codes)
            .map_err(|e| PersistenceError::invalid_row(TABLE, e))?;
        let types: Vec<String> = serde_json::from_str(&row.module_types)
            .map_err(|e| PersistenceError::invalid_row(TABLE, e))?;
        let module_codes: Vec<GeneralModuleCode> =
            GeneralModuleCode::zip(&codes, &types).map_err(invalid)?;

        Ok(Self {
            path_id: row.path_id,
            programme_id: row.programme_id,
            path_key: row.path_key,
            parent_path_key: row.parent_path_key,
            display_label: row.display_label,
            group_type,
            logic_type,
            rule_type,
            rule_value: optional_units(TABLE, row.rule_value)?,
            required_units: optional_units(TABLE, row.required_units)?,
            depth: row.depth,
            is_leaf: row.is_leaf != 0,
            is_readonly: row.is_readonly != 0,
            is_overall_source: row.is_overall_source != 0,
            raw_tag_name: row.raw_tag_name,
            module_codes,
            exception_modules: codes_from_json(TABLE, &row.exception_modules)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = gmc_mappings)]
pub struct GmcMappingRow {
    pub programme_id: String,
    pub gmc_code: String,
    pub gmc_type: String,
    pub module_code: String,
    pub requires_approval: i32,
}

impl TryFrom<GmcMappingRow> for GmcMapping {
    type Error = PersistenceError;

    fn try_from(row: GmcMappingRow) -> Result<Self, Self::Error> {
        let gmc_type: GmcType = row
            .gmc_type
            .parse()
            .map_err(|e| PersistenceError::invalid_row("gmc_mappings", e))?;
        let mut mapping: Self =
            Self::new(&row.programme_id, &row.gmc_code, gmc_type, &row.module_code);
        mapping.requires_approval = mapping.requires_approval || row.requires_approval != 0;
        Ok(mapping)
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = prerequisite_rules)]
pub struct PrerequisiteRuleRow {
    pub module_code: String,
    pub prerequisites: String,
}

impl TryFrom<PrerequisiteRuleRow> for SimplePrerequisite {
    type Error = PersistenceError;

    fn try_from(row: PrerequisiteRuleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            module_code: ModuleCode::new(&row.module_code),
            prerequisites: codes_from_json("prerequisite_rules", &row.prerequisites)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = preclusion_rules)]
pub struct PreclusionRuleRow {
    pub module_code: String,
    pub precluded: String,
}

impl TryFrom<PreclusionRuleRow> for ModulePreclusion {
    type Error = PersistenceError;

    fn try_from(row: PreclusionRuleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            module_code: ModuleCode::new(&row.module_code),
            precluded: codes_from_json("preclusion_rules", &row.precluded)?,
        })
    }
}
