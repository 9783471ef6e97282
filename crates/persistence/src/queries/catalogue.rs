// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use acadplan_domain::{ModuleCode, ModuleSummary, PrereqTree};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::MAX_BATCH;
use crate::data_models::ModuleRow;
use crate::diesel_schema::modules;
use crate::error::PersistenceError;

fn code_strings(codes: &[ModuleCode]) -> Vec<String> {
    codes.iter().map(|code| code.value().to_string()).collect()
}

/// Escapes `LIKE` metacharacters so a prefix matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern: String = String::with_capacity(prefix.len() + 1);
    for ch in prefix.trim().to_uppercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn load_modules(
    conn: &mut SqliteConnection,
    codes: &[ModuleCode],
) -> Result<Vec<ModuleRow>, PersistenceError> {
    let mut rows: Vec<ModuleRow> = Vec::with_capacity(codes.len());
    for batch in code_strings(codes).chunks(MAX_BATCH) {
        rows.extend(
            modules::table
                .filter(modules::module_code.eq_any(batch))
                .select(ModuleRow::as_select())
                .load(conn)?,
        );
    }
    Ok(rows)
}

/// Returns the subset of `codes` present in the catalogue, in input order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn existing_module_codes(
    conn: &mut SqliteConnection,
    codes: &[ModuleCode],
) -> Result<Vec<ModuleCode>, PersistenceError> {
    let mut found: Vec<String> = Vec::with_capacity(codes.len());
    for batch in code_strings(codes).chunks(MAX_BATCH) {
        found.extend(
            modules::table
                .filter(modules::module_code.eq_any(batch))
                .select(modules::module_code)
                .load::<String>(conn)?,
        );
    }
    Ok(codes
        .iter()
        .filter(|code| found.iter().any(|stored| stored == code.value()))
        .cloned()
        .collect())
}

/// Returns every module whose code starts with `prefix`, ordered by code.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn modules_with_prefix(
    conn: &mut SqliteConnection,
    prefix: &str,
) -> Result<Vec<ModuleSummary>, PersistenceError> {
    let rows: Vec<ModuleRow> = modules::table
        .filter(modules::module_code.like(like_prefix(prefix)).escape('\\'))
        .order(modules::module_code.asc())
        .select(ModuleRow::as_select())
        .load(conn)?;
    debug!(prefix, matches = rows.len(), "Matched catalogue prefix");
    rows.iter().map(ModuleRow::summary).collect()
}

/// Returns one module's summary, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
pub fn find_module(
    conn: &mut SqliteConnection,
    code: &ModuleCode,
) -> Result<Option<ModuleSummary>, PersistenceError> {
    let row: Option<ModuleRow> = modules::table
        .filter(modules::module_code.eq(code.value()))
        .select(ModuleRow::as_select())
        .first(conn)
        .optional()?;
    row.as_ref().map(ModuleRow::summary).transpose()
}

/// Returns the summaries of the catalogued modules among `codes`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn module_summaries(
    conn: &mut SqliteConnection,
    codes: &[ModuleCode],
) -> Result<Vec<ModuleSummary>, PersistenceError> {
    load_modules(conn, codes)?
        .iter()
        .map(ModuleRow::summary)
        .collect()
}

/// Returns the prerequisite trees of the given modules.
///
/// Modules without a tree are omitted.
///
/// # Errors
///
/// Returns an error if the query fails or a stored tree is not valid JSON.
pub fn prerequisite_trees(
    conn: &mut SqliteConnection,
    codes: &[ModuleCode],
) -> Result<Vec<(ModuleCode, PrereqTree)>, PersistenceError> {
    let mut trees: Vec<(ModuleCode, PrereqTree)> = Vec::new();
    for row in load_modules(conn, codes)? {
        if let Some(tree) = row.prerequisite_tree()? {
            trees.push((ModuleCode::new(&row.module_code), tree));
        }
    }
    Ok(trees)
}

/// Counts catalogued modules.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_modules(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(modules::table.count().get_result(conn)?)
}
