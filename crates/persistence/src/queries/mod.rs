// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `programmes`: programme metadata and programme preclusions
//! - `paths`: requirement paths
//! - `catalogue`: module summaries and prerequisite trees
//! - `rules`: GMC mappings, simple prerequisites and module preclusions
//!
//! Queries taking a list of keys split it into batches of [`MAX_BATCH`] so
//! no statement exceeds `SQLite`'s bound parameter limit.

pub mod catalogue;
pub mod paths;
pub mod programmes;
pub mod rules;

/// Largest number of keys bound into one `IN` list.
pub const MAX_BATCH: usize = 500;
