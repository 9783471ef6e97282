// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use acadplan_domain::{GmcMapping, ModuleCode, ModulePreclusion, SimplePrerequisite};
use diesel::prelude::*;
use diesel::SqliteConnection;
use serde::Serialize;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{
    gmc_mappings, modules, preclusion_rules, prerequisite_rules, programme_preclusions,
    programmes, requirement_paths,
};
use crate::error::PersistenceError;
use crate::seed::{SeedData, SeedModule, SeedPath};

/// Row counts written by one seed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub programmes: usize,
    pub programme_preclusions: usize,
    pub modules: usize,
    pub requirement_paths: usize,
    pub gmc_mappings: usize,
    pub prerequisite_rules: usize,
    pub preclusion_rules: usize,
}

fn to_sql_units(value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|e| PersistenceError::InvalidSeed(format!("Unit value {value} is too large: {e}")))
}

fn codes_json(codes: &[ModuleCode]) -> Result<String, PersistenceError> {
    let values: Vec<&str> = codes.iter().map(ModuleCode::value).collect();
    Ok(serde_json::to_string(&values)?)
}

fn flag(value: bool) -> i32 {
    i32::from(value)
}

/// Writes a seed document in one transaction.
///
/// The document is validated first; nothing is written if it is rejected.
///
/// # Errors
///
/// Returns `PersistenceError::InvalidSeed` for a rejected document, or a
/// database error if an insert fails (for example a duplicate key).
pub fn insert_seed(
    conn: &mut SqliteConnection,
    seed: &SeedData,
) -> Result<SeedSummary, PersistenceError> {
    seed.validate()?;

    let summary: SeedSummary = conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut summary: SeedSummary = SeedSummary::default();

        for programme in &seed.programmes {
            diesel::insert_into(programmes::table)
                .values((
                    programmes::programme_id.eq(&programme.id),
                    programmes::name.eq(&programme.name),
                    programmes::programme_type.eq(programme.programme_type.as_str()),
                    programmes::required_units.eq(to_sql_units(programme.required_units)?),
                    programmes::double_count_cap.eq(to_sql_units(programme.double_count_cap)?),
                ))
                .execute(conn)?;
            summary.programmes += 1;
        }

        for preclusion in &seed.programme_preclusions {
            diesel::insert_into(programme_preclusions::table)
                .values((
                    programme_preclusions::programme_id.eq(&preclusion.programme_id),
                    programme_preclusions::precluded_programme_id
                        .eq(&preclusion.precluded_programme_id),
                ))
                .execute(conn)?;
            summary.programme_preclusions += 1;
        }

        for module in &seed.modules {
            insert_module(conn, module)?;
            summary.modules += 1;
        }

        for path in &seed.requirement_paths {
            let path_id: i64 = insert_path(conn, path)?;
            debug!(path_id, path_key = %path.path_key, "Inserted requirement path");
            summary.requirement_paths += 1;
        }

        for mapping in &seed.gmc_mappings {
            insert_gmc_mapping(conn, mapping)?;
            summary.gmc_mappings += 1;
        }

        for rule in &seed.prerequisites {
            insert_prerequisite_rule(conn, rule)?;
            summary.prerequisite_rules += 1;
        }

        for rule in &seed.preclusions {
            insert_preclusion_rule(conn, rule)?;
            summary.preclusion_rules += 1;
        }

        Ok(summary)
    })?;

    info!(
        programmes = summary.programmes,
        modules = summary.modules,
        requirement_paths = summary.requirement_paths,
        gmc_mappings = summary.gmc_mappings,
        "Loaded seed data"
    );
    Ok(summary)
}

fn insert_module(conn: &mut SqliteConnection, module: &SeedModule) -> Result<(), PersistenceError> {
    let prereq_tree: Option<String> = module
        .prereq_tree
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    diesel::insert_into(modules::table)
        .values((
            modules::module_code.eq(ModuleCode::new(&module.code).value()),
            modules::title.eq(&module.title),
            modules::module_credit.eq(to_sql_units(module.units)?),
            modules::prereq_tree.eq(prereq_tree),
        ))
        .execute(conn)?;
    Ok(())
}

/// Inserts one requirement path and returns its id.
fn insert_path(conn: &mut SqliteConnection, path: &SeedPath) -> Result<i64, PersistenceError> {
    let exceptions: Vec<ModuleCode> = path
        .exception_modules
        .iter()
        .map(|code| ModuleCode::new(code))
        .collect();
    let rule_value: Option<i32> = path.rule_value.map(to_sql_units).transpose()?;
    let required_units: Option<i32> = path.required_units.map(to_sql_units).transpose()?;

    let values = (
        requirement_paths::programme_id.eq(&path.programme_id),
        requirement_paths::path_key.eq(&path.path_key),
        requirement_paths::parent_path_key.eq(path.parent_path_key.as_deref()),
        requirement_paths::display_label.eq(&path.display_label),
        requirement_paths::group_type.eq(&path.group_type),
        requirement_paths::logic_type.eq(&path.logic_type),
        requirement_paths::rule_type.eq(path.rule_type.as_deref()),
        requirement_paths::rule_value.eq(rule_value),
        requirement_paths::required_units.eq(required_units),
        requirement_paths::depth.eq(path.depth),
        requirement_paths::is_leaf.eq(flag(path.is_leaf)),
        requirement_paths::is_readonly.eq(flag(path.is_readonly)),
        requirement_paths::is_overall_source.eq(flag(path.is_overall_source)),
        requirement_paths::raw_tag_name.eq(path.raw_tag_name.as_deref()),
        requirement_paths::module_codes.eq(serde_json::to_string(&path.module_codes)?),
        requirement_paths::module_types.eq(serde_json::to_string(&path.module_types)?),
        requirement_paths::exception_modules.eq(codes_json(&exceptions)?),
    );

    match path.path_id {
        Some(path_id) => {
            diesel::insert_into(requirement_paths::table)
                .values((requirement_paths::path_id.eq(path_id), values))
                .execute(conn)?;
            Ok(path_id)
        }
        None => {
            diesel::insert_into(requirement_paths::table)
                .values(values)
                .execute(conn)?;
            conn.get_last_insert_rowid()
        }
    }
}

fn insert_gmc_mapping(conn: &mut SqliteConnection, mapping: &GmcMapping) -> Result<(), PersistenceError> {
    diesel::insert_into(gmc_mappings::table)
        .values((
            gmc_mappings::programme_id.eq(&mapping.programme_id),
            gmc_mappings::gmc_code.eq(&mapping.gmc_code),
            gmc_mappings::gmc_type.eq(mapping.gmc_type.as_str()),
            gmc_mappings::module_code.eq(mapping.module_code.value()),
            gmc_mappings::requires_approval.eq(flag(mapping.requires_approval)),
        ))
        .execute(conn)?;
    Ok(())
}

fn insert_prerequisite_rule(
    conn: &mut SqliteConnection,
    rule: &SimplePrerequisite,
) -> Result<(), PersistenceError> {
    diesel::insert_into(prerequisite_rules::table)
        .values((
            prerequisite_rules::module_code.eq(rule.module_code.value()),
            prerequisite_rules::prerequisites.eq(codes_json(&rule.prerequisites)?),
        ))
        .execute(conn)?;
    Ok(())
}

fn insert_preclusion_rule(
    conn: &mut SqliteConnection,
    rule: &ModulePreclusion,
) -> Result<(), PersistenceError> {
    diesel::insert_into(preclusion_rules::table)
        .values((
            preclusion_rules::module_code.eq(rule.module_code.value()),
            preclusion_rules::precluded.eq(codes_json(&rule.precluded)?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Deletes every row, children first.
///
/// # Errors
///
/// Returns an error if a delete fails.
pub fn clear_all(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(preclusion_rules::table).execute(conn)?;
        diesel::delete(prerequisite_rules::table).execute(conn)?;
        diesel::delete(gmc_mappings::table).execute(conn)?;
        diesel::delete(requirement_paths::table).execute(conn)?;
        diesel::delete(modules::table).execute(conn)?;
        diesel::delete(programme_preclusions::table).execute(conn)?;
        diesel::delete(programmes::table).execute(conn)?;
        Ok(())
    })?;
    info!("Cleared all stored data");
    Ok(())
}
