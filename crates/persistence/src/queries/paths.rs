// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use acadplan_domain::RequirementPath;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use super::MAX_BATCH;
use crate::data_models::RequirementPathRow;
use crate::diesel_schema::requirement_paths;
use crate::error::PersistenceError;

/// Retrieves every requirement path of the given programmes.
///
/// Rows are ordered by depth, then by insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn requirement_paths_for(
    conn: &mut SqliteConnection,
    programme_ids: &[String],
) -> Result<Vec<RequirementPath>, PersistenceError> {
    let mut paths: Vec<RequirementPath> = Vec::new();
    for batch in programme_ids.chunks(MAX_BATCH) {
        let rows: Vec<RequirementPathRow> = requirement_paths::table
            .filter(requirement_paths::programme_id.eq_any(batch))
            .order((requirement_paths::depth.asc(), requirement_paths::path_id.asc()))
            .select(RequirementPathRow::as_select())
            .load(conn)?;
        for row in rows {
            paths.push(RequirementPath::try_from(row)?);
        }
    }

    // Batches are each sorted; keep the combined list ordered too.
    paths.sort_by_key(|path| (path.depth, path.path_id));
    debug!(
        programmes = programme_ids.len(),
        paths = paths.len(),
        "Loaded requirement paths"
    );
    Ok(paths)
}

/// Counts stored requirement paths.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_requirement_paths(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(requirement_paths::table.count().get_result(conn)?)
}
