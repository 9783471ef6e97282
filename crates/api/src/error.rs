// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use acadplan::{ErrorKind, ProcessingContext, ValidationError};
use acadplan_domain::DomainError;
use acadplan_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from engine errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requested programmes cannot be combined.
    ///
    /// The caller can fix this by changing the selection.
    InvalidCombination {
        /// A human-readable description of the first conflict.
        message: String,
        /// Every conflict that was found.
        conflicts: Vec<ValidationError>,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidCombination { message, conflicts } => {
                write!(
                    f,
                    "Invalid programme combination: {message} ({} conflict(s))",
                    conflicts.len()
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Selection errors are the caller's to fix; anything else means stored
/// data is broken.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyProgrammeSelection
        | DomainError::TooManyProgrammes { .. }
        | DomainError::DuplicateProgramme(_)
        | DomainError::InvalidProgrammeId(_) => ApiError::InvalidInput {
            field: String::from("programmeIds"),
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a rejecting processing context into an API error.
///
/// A `HARD_ERROR` wins over combination conflicts: if anything fatal went
/// wrong on the server side the conflicts are not trustworthy.
#[must_use]
pub fn translate_rejection(context: &ProcessingContext) -> ApiError {
    let errors: &[ValidationError] = context.errors();

    if let Some(hard) = errors.iter().find(|err| err.kind == ErrorKind::HardError) {
        return ApiError::Internal {
            message: hard.message.clone(),
        };
    }

    let conflicts: Vec<ValidationError> = errors
        .iter()
        .filter(|err| err.kind == ErrorKind::InvalidProgrammeCombination)
        .cloned()
        .collect();

    match conflicts.first() {
        Some(first) => ApiError::InvalidCombination {
            message: first.message.clone(),
            conflicts,
        },
        None => ApiError::Internal {
            message: String::from("Plan generation was rejected without a fatal error"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    ApiError::Internal {
        message: format!("Persistence error: {err}"),
    }
}
