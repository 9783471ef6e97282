// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! General module code resolution.

use crate::error::CoreError;
use crate::store::CatalogStore;
use acadplan_domain::{GeneralModuleCode, GmcMapping, GmcType, ModuleCode, ModuleSummary};
use tracing::debug;

/// The concrete modules behind a list of general module codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GmcResolution {
    /// Resolved codes, de-duplicated in first-seen order.
    pub modules: Vec<ModuleCode>,
    /// One mapping per resolved (code, module) pair.
    pub mappings: Vec<GmcMapping>,
}

impl GmcResolution {
    fn push(&mut self, mapping: GmcMapping) {
        if !self.modules.contains(&mapping.module_code) {
            self.modules.push(mapping.module_code.clone());
        }
        if !self.mappings.contains(&mapping) {
            self.mappings.push(mapping);
        }
    }
}

/// Matches one general module code against the catalogue.
///
/// - exact: the module itself, if it exists
/// - wildcard: every base module (no variant suffix) sharing the prefix
/// - variant: every module sharing the prefix
/// - other: a placeholder summary for the token
///
/// # Errors
///
/// Returns `CoreError::Store` if a catalogue lookup fails.
pub fn match_catalogue<S>(
    store: &mut S,
    gmc: &GeneralModuleCode,
) -> Result<Vec<ModuleSummary>, CoreError>
where
    S: CatalogStore + ?Sized,
{
    let matches: Vec<ModuleSummary> = match gmc.gmc_type {
        GmcType::Exact => store
            .find_module(&ModuleCode::new(&gmc.code))?
            .into_iter()
            .collect(),
        GmcType::Wildcard => store
            .modules_by_prefix(&gmc.code)?
            .into_iter()
            .filter(|summary| !summary.code.has_variant_suffix())
            .collect(),
        GmcType::Variant => store.modules_by_prefix(&gmc.code)?,
        GmcType::Other => vec![ModuleSummary::placeholder(&gmc.code)],
    };

    debug!(
        code = %gmc.code,
        gmc_type = gmc.gmc_type.as_str(),
        matches = matches.len(),
        "Matched general module code against catalogue"
    );
    Ok(matches)
}

/// Resolves every general module code of one path.
///
/// Exact codes are validated against the catalogue in one batch. Non-exact
/// codes use the programme's stored mappings and fall back to catalogue
/// pattern matching when no mapping exists.
///
/// # Arguments
///
/// * `store` - The catalogue
/// * `programme_id` - The programme owning the path
/// * `codes` - The path's general module codes
/// * `mappings` - Stored mappings for the programme's non-exact codes
///
/// # Errors
///
/// Returns `CoreError::Store` if a catalogue lookup fails.
pub fn resolve_path_codes<S>(
    store: &mut S,
    programme_id: &str,
    codes: &[GeneralModuleCode],
    mappings: &[GmcMapping],
) -> Result<GmcResolution, CoreError>
where
    S: CatalogStore + ?Sized,
{
    let exact: Vec<ModuleCode> = codes
        .iter()
        .filter(|gmc| gmc.gmc_type == GmcType::Exact)
        .map(|gmc| ModuleCode::new(&gmc.code))
        .collect();
    let existing: Vec<ModuleCode> = if exact.is_empty() {
        Vec::new()
    } else {
        store.existing_modules(&exact)?
    };

    let mut resolution: GmcResolution = GmcResolution::default();

    for gmc in codes {
        if gmc.gmc_type == GmcType::Exact {
            let code: ModuleCode = ModuleCode::new(&gmc.code);
            if existing.contains(&code) {
                resolution.push(GmcMapping::new(
                    programme_id,
                    &gmc.code,
                    GmcType::Exact,
                    code.value(),
                ));
            } else {
                debug!(programme_id, code = %code, "Exact module code not in catalogue");
            }
            continue;
        }

        let stored: Vec<&GmcMapping> = mappings
            .iter()
            .filter(|mapping| mapping.programme_id == programme_id && mapping.gmc_code == gmc.code)
            .collect();

        if stored.is_empty() {
            for summary in match_catalogue(store, gmc)? {
                resolution.push(GmcMapping::new(
                    programme_id,
                    &gmc.code,
                    gmc.gmc_type,
                    summary.code.value(),
                ));
            }
        } else {
            for mapping in stored {
                resolution.push(mapping.clone());
            }
        }
    }

    Ok(resolution)
}
