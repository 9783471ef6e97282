// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use acadplan_domain::{Programme, ProgrammePreclusion};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::MAX_BATCH;
use crate::data_models::{ProgrammePreclusionRow, ProgrammeRow};
use crate::diesel_schema::{programme_preclusions, programmes};
use crate::error::PersistenceError;

/// Retrieves the programmes with the given ids, in no particular order.
///
/// Unknown ids are ignored.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn find_programmes(
    conn: &mut SqliteConnection,
    programme_ids: &[String],
) -> Result<Vec<Programme>, PersistenceError> {
    let mut found: Vec<Programme> = Vec::with_capacity(programme_ids.len());
    for batch in programme_ids.chunks(MAX_BATCH) {
        let rows: Vec<ProgrammeRow> = programmes::table
            .filter(programmes::programme_id.eq_any(batch))
            .select(ProgrammeRow::as_select())
            .load(conn)?;
        for row in rows {
            found.push(Programme::try_from(row)?);
        }
    }
    debug!(requested = programme_ids.len(), found = found.len(), "Loaded programmes");
    Ok(found)
}

/// Retrieves every programme, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_programmes(conn: &mut SqliteConnection) -> Result<Vec<Programme>, PersistenceError> {
    programmes::table
        .order(programmes::programme_id.asc())
        .select(ProgrammeRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Programme::try_from)
        .collect()
}

/// Retrieves the preclusions whose two programmes are both in `programme_ids`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn preclusions_among(
    conn: &mut SqliteConnection,
    programme_ids: &[String],
) -> Result<Vec<ProgrammePreclusion>, PersistenceError> {
    if programme_ids.len() > MAX_BATCH {
        return Err(PersistenceError::QueryFailed(format!(
            "Too many programmes for a preclusion lookup: {}",
            programme_ids.len()
        )));
    }

    let rows: Vec<ProgrammePreclusionRow> = programme_preclusions::table
        .filter(programme_preclusions::programme_id.eq_any(programme_ids))
        .filter(programme_preclusions::precluded_programme_id.eq_any(programme_ids))
        .select(ProgrammePreclusionRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(ProgrammePreclusion::from).collect())
}

/// Counts stored programmes.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_programmes(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(programmes::table.count().get_result(conn)?)
}
