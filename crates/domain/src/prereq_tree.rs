// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalogue prerequisite trees.
//!
//! The catalogue encodes prerequisites as nested JSON:
//!
//! - `"CS1010"` or `"CS1010:D"` (a module, optionally with a minimum grade)
//! - `{"and": [...]}`
//! - `{"or": [...]}`
//! - `{"nOf": [2, [...]]}`

use crate::error::DomainError;
use crate::types::ModuleCode;
use serde::{Deserialize, Serialize};

/// A module's full prerequisite expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrereqTree {
    /// A single module, possibly carrying a `:grade` suffix.
    Module(String),
    /// All children are required.
    And {
        and: Vec<Self>,
    },
    /// Any one child is sufficient.
    Or {
        or: Vec<Self>,
    },
    /// At least `n` of the children are required.
    NOf {
        #[serde(rename = "nOf")]
        n_of: (u32, Vec<Self>),
    },
}

impl PrereqTree {
    /// Strips a grade suffix from a raw prerequisite token.
    ///
    /// `CS1010:D` becomes `CS1010`.
    #[must_use]
    pub fn strip_grade(raw: &str) -> ModuleCode {
        let code: &str = raw.split(':').next().unwrap_or(raw);
        ModuleCode::new(code)
    }

    /// Returns the module code if this tree is a single module.
    #[must_use]
    pub fn leaf_code(&self) -> Option<ModuleCode> {
        match self {
            Self::Module(raw) => Some(Self::strip_grade(raw)),
            _ => None,
        }
    }

    /// Returns whether this tree is a single module.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Module(_))
    }

    /// Returns every module code mentioned anywhere in the tree, in order.
    #[must_use]
    pub fn module_codes(&self) -> Vec<ModuleCode> {
        let mut codes: Vec<ModuleCode> = Vec::new();
        self.collect_codes(&mut codes);
        codes
    }

    fn collect_codes(&self, codes: &mut Vec<ModuleCode>) {
        match self {
            Self::Module(raw) => {
                let code: ModuleCode = Self::strip_grade(raw);
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
            Self::And { and: children } | Self::Or { or: children } => {
                for child in children {
                    child.collect_codes(codes);
                }
            }
            Self::NOf {
                n_of: (_, children),
            } => {
                for child in children {
                    child.collect_codes(codes);
                }
            }
        }
    }

    /// Checks structural sanity of the tree.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrerequisiteTree` when a module token is
    /// empty, an `and`/`or` list is empty, or an `nOf` count is zero or
    /// larger than its option list.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Module(raw) => {
                if Self::strip_grade(raw).value().is_empty() {
                    return Err(DomainError::InvalidPrerequisiteTree(String::from(
                        "empty module token",
                    )));
                }
                Ok(())
            }
            Self::And { and: children } | Self::Or { or: children } => {
                if children.is_empty() {
                    return Err(DomainError::InvalidPrerequisiteTree(String::from(
                        "empty and/or list",
                    )));
                }
                children.iter().try_for_each(Self::validate)
            }
            Self::NOf {
                n_of: (n, children),
            } => {
                let count: usize = children.len();
                let required: usize = usize::try_from(*n).unwrap_or(usize::MAX);
                if required == 0 || required > count {
                    return Err(DomainError::InvalidPrerequisiteTree(format!(
                        "nOf requires {n} of {count} options"
                    )));
                }
                children.iter().try_for_each(Self::validate)
            }
        }
    }
}
