// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! The engine only reads; writes exist to load catalogue and requirement
//! data from seed documents.

pub mod seed;

pub use seed::{SeedSummary, clear_all, insert_seed};
