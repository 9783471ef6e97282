// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unit cap accounting.
//!
//! Caps are reported, not applied: the consumer enforces them as the user
//! makes choices.

use crate::context::MaxRule;
use acadplan_domain::ModuleCode;
use serde::Serialize;
use std::collections::BTreeMap;

/// The current state of one cap rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapUsage {
    pub rule_id: String,
    pub programme_id: String,
    pub max_units: u32,
    pub used_units: u32,
    pub affected_modules: Vec<ModuleCode>,
    /// Selected modules counted against the cap.
    pub counted_modules: Vec<ModuleCode>,
    pub exhausted: bool,
    /// Unselected modules of the pool once the cap is exhausted.
    pub suppressed_modules: Vec<ModuleCode>,
}

/// Applies one cap rule to its pool.
///
/// # Arguments
///
/// * `rule` - The cap rule
/// * `selected` - Modules already selected across the combination
/// * `units` - Credit units per module; unknown modules count zero
#[must_use]
pub fn enforce_cap(
    rule: &MaxRule,
    selected: &[ModuleCode],
    units: &BTreeMap<ModuleCode, u32>,
) -> CapUsage {
    let counted_modules: Vec<ModuleCode> = rule
        .affected_modules
        .iter()
        .filter(|code| selected.contains(code))
        .cloned()
        .collect();
    let used_units: u32 = counted_modules
        .iter()
        .map(|code| units.get(code).copied().unwrap_or(0))
        .sum();
    let exhausted: bool = used_units >= rule.max_units;

    let suppressed_modules: Vec<ModuleCode> = if exhausted {
        rule.affected_modules
            .iter()
            .filter(|code| !counted_modules.contains(code))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    CapUsage {
        rule_id: rule.id.clone(),
        programme_id: rule.programme_id.clone(),
        max_units: rule.max_units,
        used_units,
        affected_modules: rule.affected_modules.clone(),
        counted_modules,
        exhausted,
        suppressed_modules,
    }
}

/// Applies every cap rule of a combination.
#[must_use]
pub fn compute_cap_usage(
    rules: &[MaxRule],
    selected: &[ModuleCode],
    units: &BTreeMap<ModuleCode, u32>,
) -> Vec<CapUsage> {
    rules
        .iter()
        .map(|rule| enforce_cap(rule, selected, units))
        .collect()
}
