// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CapUsage, MaxRule, compute_cap_usage, enforce_cap};
use acadplan_domain::{GroupType, ModuleCode};
use std::collections::BTreeMap;

fn codes(values: &[&str]) -> Vec<ModuleCode> {
    values.iter().map(|value| ModuleCode::new(value)).collect()
}

fn create_test_rule(max_units: u32) -> MaxRule {
    MaxRule {
        id: MaxRule::rule_id("cs-major", 7),
        programme_id: String::from("cs-major"),
        path_id: 7,
        path_key: String::from("level_1000_cap"),
        display_label: String::from("Level 1000 cap"),
        group_type: GroupType::CoreElectives,
        max_units,
        affected_modules: codes(&["CS1010", "CS1231S", "MA1521"]),
    }
}

fn units() -> BTreeMap<ModuleCode, u32> {
    codes(&["CS1010", "CS1231S", "MA1521"])
        .into_iter()
        .map(|code| (code, 4))
        .collect()
}

#[test]
fn test_cap_below_limit_suppresses_nothing() {
    let usage: CapUsage = enforce_cap(&create_test_rule(12), &codes(&["CS1010"]), &units());

    assert_eq!(usage.rule_id, "cs-major_7");
    assert_eq!(usage.used_units, 4);
    assert!(!usage.exhausted);
    assert!(usage.suppressed_modules.is_empty());
}

#[test]
fn test_exhausted_cap_suppresses_uncounted_modules() {
    let usage: CapUsage = enforce_cap(
        &create_test_rule(8),
        &codes(&["CS1010", "CS1231S", "CS2040S"]),
        &units(),
    );

    assert_eq!(usage.counted_modules, codes(&["CS1010", "CS1231S"]));
    assert_eq!(usage.used_units, 8);
    assert!(usage.exhausted);
    assert_eq!(usage.suppressed_modules, codes(&["MA1521"]));
}

#[test]
fn test_unknown_units_count_as_zero() {
    let usage: CapUsage = enforce_cap(
        &create_test_rule(4),
        &codes(&["CS1010"]),
        &BTreeMap::new(),
    );

    assert_eq!(usage.used_units, 0);
    assert!(!usage.exhausted);
}

#[test]
fn test_compute_cap_usage_covers_every_rule() {
    let rules: Vec<MaxRule> = vec![create_test_rule(4), create_test_rule(40)];

    let usage: Vec<CapUsage> = compute_cap_usage(&rules, &codes(&["MA1521"]), &units());

    assert_eq!(usage.len(), 2);
    assert!(usage[0].exhausted);
    assert!(!usage[1].exhausted);
}
