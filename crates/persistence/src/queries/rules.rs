// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! GMC mapping, prerequisite and preclusion lookups.

use acadplan_domain::{GmcMapping, ModuleCode, ModulePreclusion, SimplePrerequisite};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::MAX_BATCH;
use crate::data_models::{GmcMappingRow, PreclusionRuleRow, PrerequisiteRuleRow};
use crate::diesel_schema::{gmc_mappings, preclusion_rules, prerequisite_rules};
use crate::error::PersistenceError;

/// Retrieves the stored GMC mappings of the given programmes.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `programme_ids` - The programmes to load mappings for
/// * `gmc_codes` - When set, only mappings for these codes are returned
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn gmc_mappings_for(
    conn: &mut SqliteConnection,
    programme_ids: &[String],
    gmc_codes: Option<&[String]>,
) -> Result<Vec<GmcMapping>, PersistenceError> {
    let mut rows: Vec<GmcMappingRow> = Vec::new();
    for programme_batch in programme_ids.chunks(MAX_BATCH) {
        match gmc_codes {
            Some(codes) => {
                for code_batch in codes.chunks(MAX_BATCH) {
                    rows.extend(
                        gmc_mappings::table
                            .filter(gmc_mappings::programme_id.eq_any(programme_batch))
                            .filter(gmc_mappings::gmc_code.eq_any(code_batch))
                            .order(gmc_mappings::mapping_id.asc())
                            .select(GmcMappingRow::as_select())
                            .load(conn)?,
                    );
                }
            }
            None => rows.extend(
                gmc_mappings::table
                    .filter(gmc_mappings::programme_id.eq_any(programme_batch))
                    .order(gmc_mappings::mapping_id.asc())
                    .select(GmcMappingRow::as_select())
                    .load(conn)?,
            ),
        }
    }

    debug!(mappings = rows.len(), "Loaded GMC mappings");
    rows.into_iter().map(GmcMapping::try_from).collect()
}

/// Retrieves the simple prerequisite rows of the given modules.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn simple_prerequisites_for(
    conn: &mut SqliteConnection,
    codes: &[ModuleCode],
) -> Result<Vec<SimplePrerequisite>, PersistenceError> {
    let keys: Vec<String> = codes.iter().map(|code| code.value().to_string()).collect();
    let mut prerequisites: Vec<SimplePrerequisite> = Vec::new();
    for batch in keys.chunks(MAX_BATCH) {
        let rows: Vec<PrerequisiteRuleRow> = prerequisite_rules::table
            .filter(prerequisite_rules::module_code.eq_any(batch))
            .select(PrerequisiteRuleRow::as_select())
            .load(conn)?;
        for row in rows {
            prerequisites.push(SimplePrerequisite::try_from(row)?);
        }
    }
    Ok(prerequisites)
}

/// Retrieves the preclusion rows of the given modules.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn preclusions_for(
    conn: &mut SqliteConnection,
    codes: &[ModuleCode],
) -> Result<Vec<ModulePreclusion>, PersistenceError> {
    let keys: Vec<String> = codes.iter().map(|code| code.value().to_string()).collect();
    let mut preclusions: Vec<ModulePreclusion> = Vec::new();
    for batch in keys.chunks(MAX_BATCH) {
        let rows: Vec<PreclusionRuleRow> = preclusion_rules::table
            .filter(preclusion_rules::module_code.eq_any(batch))
            .select(PreclusionRuleRow::as_select())
            .load(conn)?;
        for row in rows {
            preclusions.push(ModulePreclusion::try_from(row)?);
        }
    }
    Ok(preclusions)
}
