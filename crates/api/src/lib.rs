// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the academic plan engine.
//!
//! Validates plan requests, runs the engine and classifies the outcome
//! into a response envelope or an [`ApiError`].

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_rejection,
};
pub use handlers::{generate_plan, list_programmes};
pub use request_response::{AcademicPlanRequest, AcademicPlanResponse, ListProgrammesResponse};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
