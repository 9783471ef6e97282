// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_catalogue;
use crate::{GmcResolution, InMemoryStore, match_catalogue, resolve_path_codes};
use acadplan_domain::{GeneralModuleCode, GmcMapping, GmcType, ModuleCode, ModuleSummary};

fn codes(values: &[&str]) -> Vec<ModuleCode> {
    values.iter().map(|value| ModuleCode::new(value)).collect()
}

#[test]
fn test_wildcard_matches_base_modules_only() {
    let mut store: InMemoryStore = create_test_catalogue();

    let matches: Vec<ModuleSummary> =
        match_catalogue(&mut store, &GeneralModuleCode::new("CS2040", GmcType::Wildcard)).unwrap();

    let matched: Vec<ModuleCode> = matches.into_iter().map(|summary| summary.code).collect();
    assert_eq!(matched, codes(&["CS2040"]));
}

#[test]
fn test_variant_matches_suffixed_modules() {
    let mut store: InMemoryStore = create_test_catalogue();

    let matches: Vec<ModuleSummary> =
        match_catalogue(&mut store, &GeneralModuleCode::new("CS2040", GmcType::Variant)).unwrap();

    let matched: Vec<ModuleCode> = matches.into_iter().map(|summary| summary.code).collect();
    assert_eq!(matched, codes(&["CS2040", "CS2040C", "CS2040S"]));
}

#[test]
fn test_other_code_resolves_to_placeholder() {
    let mut store: InMemoryStore = create_test_catalogue();

    let matches: Vec<ModuleSummary> =
        match_catalogue(&mut store, &GeneralModuleCode::new("UTC2xxx", GmcType::Other)).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, ModuleSummary::PLACEHOLDER_TITLE);
    assert_eq!(matches[0].units, ModuleSummary::PLACEHOLDER_UNITS);
}

#[test]
fn test_missing_exact_code_is_skipped() {
    let mut store: InMemoryStore = create_test_catalogue();
    let gmcs: Vec<GeneralModuleCode> = vec![
        GeneralModuleCode::exact("CS3230"),
        GeneralModuleCode::exact("CS9999"),
    ];

    let resolution: GmcResolution = resolve_path_codes(&mut store, "cs-major", &gmcs, &[]).unwrap();

    assert_eq!(resolution.modules, codes(&["CS3230"]));
    assert!(
        resolution
            .mappings
            .iter()
            .all(|mapping| mapping.gmc_type == GmcType::Exact)
    );
}

#[test]
fn test_stored_mappings_take_precedence_over_catalogue() {
    let mut store: InMemoryStore = create_test_catalogue();
    let gmcs: Vec<GeneralModuleCode> = vec![GeneralModuleCode::new("CS2040", GmcType::Variant)];
    let mappings: Vec<GmcMapping> = vec![
        GmcMapping::new("cs-major", "CS2040", GmcType::Variant, "CS2040S"),
        GmcMapping::new("other-major", "CS2040", GmcType::Variant, "CS2040C"),
    ];

    let resolution: GmcResolution =
        resolve_path_codes(&mut store, "cs-major", &gmcs, &mappings).unwrap();

    assert_eq!(resolution.modules, codes(&["CS2040S"]));
    assert_eq!(resolution.mappings.len(), 1);
}

#[test]
fn test_resolution_removes_duplicates() {
    let mut store: InMemoryStore = create_test_catalogue();
    let gmcs: Vec<GeneralModuleCode> = vec![
        GeneralModuleCode::exact("CS2040S"),
        GeneralModuleCode::new("CS2040", GmcType::Variant),
    ];

    let resolution: GmcResolution = resolve_path_codes(&mut store, "cs-major", &gmcs, &[]).unwrap();

    assert_eq!(resolution.modules, codes(&["CS2040S", "CS2040", "CS2040C"]));
    let variant_modules: Vec<ModuleCode> = resolution
        .mappings
        .iter()
        .filter(|mapping| mapping.gmc_type == GmcType::Variant)
        .map(|mapping| mapping.module_code.clone())
        .collect();
    assert_eq!(variant_modules, codes(&["CS2040", "CS2040C", "CS2040S"]));
}

#[test]
fn test_other_mappings_require_approval() {
    let mut store: InMemoryStore = create_test_catalogue();
    let gmcs: Vec<GeneralModuleCode> = vec![GeneralModuleCode::new("UTC2xxx", GmcType::Other)];

    let resolution: GmcResolution = resolve_path_codes(&mut store, "cs-major", &gmcs, &[]).unwrap();

    assert_eq!(resolution.mappings.len(), 1);
    assert!(resolution.mappings[0].requires_approval);
}
