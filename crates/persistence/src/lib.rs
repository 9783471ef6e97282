// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the academic plan engine.
//!
//! This crate stores programmes, the module catalogue, requirement paths,
//! GMC mappings and module rules, and serves them to the engine through
//! its lookup traits. It is built on Diesel.
//!
//! ## Schema
//!
//! Migrations are embedded at compile time and applied whenever a
//! connection is opened. List-valued columns (module codes, their GMC
//! types, exceptions, prerequisites, preclusions) are JSON arrays stored
//! as text. Prerequisite trees are stored as JSON.
//!
//! ## Connections
//!
//! - [`Persistence::new_in_memory`] opens an isolated shared-cache
//!   in-memory database, used by tests
//! - [`Persistence::new_with_file`] opens a file database in WAL mode
//!
//! Foreign key enforcement is switched on and verified for every
//! connection.
//!
//! ## Loading data
//!
//! Data is loaded from JSON seed documents ([`SeedData`]). A seed is
//! validated before anything is written and is applied in one transaction.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod seed;
mod store;

#[cfg(test)]
mod tests;

use acadplan_domain::Programme;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use backend::PersistenceBackend;

pub use error::PersistenceError;
pub use mutations::SeedSummary;
pub use queries::MAX_BATCH;
pub use seed::{SeedData, SeedModule, SeedPath};

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Row counts of every stored table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub programmes: i64,
    pub modules: i64,
    pub requirement_paths: i64,
}

/// A `SQLite`-backed store.
///
/// Implements every engine lookup trait, so a `Persistence` can be handed
/// directly to `acadplan::generate_academic_plan`.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence instance backed by an in-memory database.
    ///
    /// Each call gets its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence instance backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The database file, created if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database
    /// cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        info!(path = path_str, "Opened database file");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled on this connection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` if it is off.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Validates and writes a seed document.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidSeed` if the document is rejected, or
    /// a database error if a row cannot be written. Nothing is written on error.
    pub fn seed(&mut self, seed: &SeedData) -> Result<SeedSummary, PersistenceError> {
        mutations::insert_seed(&mut self.conn, seed)
    }

    /// Deletes every stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete fails.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        mutations::clear_all(&mut self.conn)
    }

    /// Lists every stored programme, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_programmes(&mut self) -> Result<Vec<Programme>, PersistenceError> {
        queries::programmes::list_programmes(&mut self.conn)
    }

    /// Counts the rows of the main tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn table_counts(&mut self) -> Result<TableCounts, PersistenceError> {
        Ok(TableCounts {
            programmes: queries::programmes::count_programmes(&mut self.conn)?,
            modules: queries::catalogue::count_modules(&mut self.conn)?,
            requirement_paths: queries::paths::count_requirement_paths(&mut self.conn)?,
        })
    }
}
