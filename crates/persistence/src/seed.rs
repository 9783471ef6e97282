// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON seed documents.
//!
//! A seed lists the rows of every table. Requirement paths keep the stored
//! shape, with module codes and their types as parallel lists.

use acadplan_domain::{
    GeneralModuleCode, GmcMapping, ModulePreclusion, PrereqTree, Programme, ProgrammePreclusion,
    RequirementPath, RuleType, SimplePrerequisite, build_requirement_forest,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::PersistenceError;

/// A catalogue entry in a seed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedModule {
    pub code: String,
    pub title: String,
    #[serde(default = "default_units")]
    pub units: u32,
    #[serde(default)]
    pub prereq_tree: Option<PrereqTree>,
}

const fn default_units() -> u32 {
    4
}

/// A requirement path row in a seed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPath {
    /// Assigned by the database when absent.
    #[serde(default)]
    pub path_id: Option<i64>,
    pub programme_id: String,
    pub path_key: String,
    #[serde(default)]
    pub parent_path_key: Option<String>,
    #[serde(default)]
    pub display_label: String,
    pub group_type: String,
    pub logic_type: String,
    #[serde(default)]
    pub rule_type: Option<String>,
    #[serde(default)]
    pub rule_value: Option<u32>,
    #[serde(default)]
    pub required_units: Option<u32>,
    #[serde(default)]
    pub depth: i32,
    #[serde(default)]
    pub is_leaf: bool,
    #[serde(default)]
    pub is_readonly: bool,
    #[serde(default)]
    pub is_overall_source: bool,
    #[serde(default)]
    pub raw_tag_name: Option<String>,
    #[serde(default)]
    pub module_codes: Vec<String>,
    #[serde(default)]
    pub module_types: Vec<String>,
    #[serde(default)]
    pub exception_modules: Vec<String>,
}

impl SeedPath {
    /// Converts this row into a domain path, using `path_id` when none is set.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidSeed` if an enum column is unknown.
    pub fn to_requirement_path(&self, path_id: i64) -> Result<RequirementPath, PersistenceError> {
        Ok(RequirementPath {
            path_id: self.path_id.unwrap_or(path_id),
            programme_id: self.programme_id.clone(),
            path_key: self.path_key.clone(),
            parent_path_key: self.parent_path_key.clone(),
            display_label: self.display_label.clone(),
            group_type: self.group_type.parse()?,
            logic_type: self.logic_type.parse()?,
            rule_type: self
                .rule_type
                .as_deref()
                .map(str::parse::<RuleType>)
                .transpose()?,
            rule_value: self.rule_value,
            required_units: self.required_units,
            depth: self.depth,
            is_leaf: self.is_leaf,
            is_readonly: self.is_readonly,
            is_overall_source: self.is_overall_source,
            raw_tag_name: self.raw_tag_name.clone(),
            module_codes: GeneralModuleCode::zip(&self.module_codes, &self.module_types)?,
            exception_modules: self
                .exception_modules
                .iter()
                .map(|code| code.as_str().into())
                .collect(),
        })
    }
}

/// Every row needed to serve plans, as loaded from a seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub programmes: Vec<Programme>,
    pub programme_preclusions: Vec<ProgrammePreclusion>,
    pub modules: Vec<SeedModule>,
    pub requirement_paths: Vec<SeedPath>,
    pub gmc_mappings: Vec<GmcMapping>,
    pub prerequisites: Vec<SimplePrerequisite>,
    pub preclusions: Vec<ModulePreclusion>,
}

impl SeedData {
    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SerializationError` if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let json: String = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PersistenceError::InvalidSeed(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Checks the document before anything is written.
    ///
    /// Every path must belong to a seeded programme and each programme's
    /// paths must form a valid tree. Prerequisite trees must be well formed
    /// and preclusions must reference seeded programmes.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidSeed` describing the first problem.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let programme_ids: BTreeSet<&str> = self
            .programmes
            .iter()
            .map(|programme| programme.id.as_str())
            .collect();

        for preclusion in &self.programme_preclusions {
            for id in [&preclusion.programme_id, &preclusion.precluded_programme_id] {
                if !programme_ids.contains(id.as_str()) {
                    return Err(PersistenceError::InvalidSeed(format!(
                        "Programme preclusion references unknown programme {id}"
                    )));
                }
            }
        }

        for path in &self.requirement_paths {
            if !programme_ids.contains(path.programme_id.as_str()) {
                return Err(PersistenceError::InvalidSeed(format!(
                    "Requirement path {} references unknown programme {}",
                    path.path_key, path.programme_id
                )));
            }
        }

        for programme_id in &programme_ids {
            let paths: Vec<RequirementPath> = self
                .requirement_paths
                .iter()
                .filter(|path| path.programme_id == *programme_id)
                .enumerate()
                .map(|(index, path)| {
                    path.to_requirement_path(i64::try_from(index).unwrap_or(i64::MAX))
                })
                .collect::<Result<_, _>>()?;
            build_requirement_forest(programme_id, &paths)?;
        }

        for module in &self.modules {
            if let Some(tree) = &module.prereq_tree {
                tree.validate()?;
            }
        }

        Ok(())
    }
}
