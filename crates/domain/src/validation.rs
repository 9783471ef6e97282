// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Programme;
use std::collections::HashSet;

/// The most programmes a single plan may combine.
pub const MAX_PROGRAMMES: usize = 5;

/// Validates a requested programme selection before any lookups happen.
///
/// # Arguments
///
/// * `programme_ids` - The requested programme ids, in request order
///
/// # Errors
///
/// Returns an error if the list is empty, longer than [`MAX_PROGRAMMES`],
/// contains a blank id, or contains the same id twice.
pub fn validate_programme_selection(programme_ids: &[String]) -> Result<(), DomainError> {
    if programme_ids.is_empty() {
        return Err(DomainError::EmptyProgrammeSelection);
    }
    if programme_ids.len() > MAX_PROGRAMMES {
        return Err(DomainError::TooManyProgrammes {
            count: programme_ids.len(),
            max: MAX_PROGRAMMES,
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for id in programme_ids {
        if id.trim().is_empty() {
            return Err(DomainError::InvalidProgrammeId(id.clone()));
        }
        if !seen.insert(id.as_str()) {
            return Err(DomainError::DuplicateProgramme(id.clone()));
        }
    }

    Ok(())
}

/// Returns the ids of every major when more than one major is present.
///
/// An empty result means the combination has at most one major.
#[must_use]
pub fn conflicting_majors(programmes: &[Programme]) -> Vec<String> {
    let majors: Vec<String> = programmes
        .iter()
        .filter(|programme| programme.is_major())
        .map(|programme| programme.id.clone())
        .collect();

    if majors.len() > 1 { majors } else { Vec::new() }
}
