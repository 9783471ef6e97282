// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use acadplan_domain::{DomainError, ModuleCode};
use serde::Serialize;

/// Errors that abort the engine.
///
/// These never reach callers directly: the pipeline converts them into a
/// single `HARD_ERROR` record on the processing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A store lookup failed.
    Store(StoreError),
    /// Stored requirement data violated a structural rule.
    DomainViolation(DomainError),
    /// Two preselected modules preclude each other.
    PreselectedConflict {
        /// The preselected module carrying the preclusion.
        module_code: ModuleCode,
        /// The preselected module it precludes.
        precluded: ModuleCode,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "Store error: {err}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PreselectedConflict {
                module_code,
                precluded,
            } => write!(
                f,
                "Preselected module {module_code} precludes preselected module {precluded}"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// The class of a recorded validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Fatal and not caused by the user's selection.
    HardError,
    /// Fatal for this request, fixable by choosing other programmes.
    InvalidProgrammeCombination,
    /// Degraded but usable result.
    SoftError,
}

impl ErrorKind {
    /// Converts this kind to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HardError => "HARD_ERROR",
            Self::InvalidProgrammeCombination => "INVALID_PROGRAMME_COMBINATION",
            Self::SoftError => "SOFT_ERROR",
        }
    }

    /// Returns whether this kind stops the pipeline.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::HardError | Self::InvalidProgrammeCombination)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error recorded on the processing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub programme_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_code: Option<ModuleCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_id: Option<i64>,
}

impl ValidationError {
    /// Creates an error of the given kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The error class
    /// * `message` - A human readable description
    /// * `programme_ids` - The programmes involved
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, programme_ids: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            programme_ids,
            module_code: None,
            path_id: None,
        }
    }

    /// Creates a `HARD_ERROR`.
    #[must_use]
    pub fn hard(message: impl Into<String>, programme_ids: Vec<String>) -> Self {
        Self::new(ErrorKind::HardError, message, programme_ids)
    }

    /// Creates an `INVALID_PROGRAMME_COMBINATION` error.
    #[must_use]
    pub fn invalid_combination(message: impl Into<String>, programme_ids: Vec<String>) -> Self {
        Self::new(ErrorKind::InvalidProgrammeCombination, message, programme_ids)
    }

    /// Creates a `SOFT_ERROR`.
    #[must_use]
    pub fn soft(message: impl Into<String>, programme_ids: Vec<String>) -> Self {
        Self::new(ErrorKind::SoftError, message, programme_ids)
    }

    /// Attaches the module the error is about.
    #[must_use]
    pub fn with_module(mut self, module_code: ModuleCode) -> Self {
        self.module_code = Some(module_code);
        self
    }

    /// Attaches the requirement path the error is about.
    #[must_use]
    pub fn with_path(mut self, path_id: i64) -> Self {
        self.path_id = Some(path_id);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
