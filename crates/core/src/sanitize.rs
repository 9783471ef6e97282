// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Post-pass over built payloads.
//!
//! Removes options precluded by preselected modules and injects read-only
//! boxes for the prerequisites of preselected modules.

use crate::boxes::section_key;
use crate::context::ProcessingContext;
use crate::error::CoreError;
use crate::lookup::LookupMaps;
use crate::payload::{
    AltPath, AltPathBox, CourseBox, DropdownBox, ExactBox, ProgrammePayload, ProgrammeSection,
};
use crate::store::{PreclusionStore, PrerequisiteStore};
use acadplan_domain::{GroupType, ModuleCode, ModulePreclusion, PrereqTree, convert_to_id};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Counts of changes made by the post-pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeReport {
    pub pruned_options: usize,
    pub pruned_alternatives: usize,
    pub pruned_boxes: usize,
    pub injected_boxes: usize,
}

/// Runs preclusion pruning, then prerequisite injection, over every payload.
///
/// Injected boxes are pruned against the same precluded set, and a
/// precluded prerequisite is never pinned.
///
/// # Arguments
///
/// * `store` - The preclusion and prerequisite store
/// * `context` - The validated processing context
/// * `lookup` - The combination's lookup maps, used to place injected boxes
/// * `payloads` - The programme payloads to rewrite
///
/// # Errors
///
/// Returns `CoreError::PreselectedConflict` if two preselected modules
/// preclude each other, or `CoreError::Store` if a lookup fails.
pub fn sanitize_payloads<S>(
    store: &mut S,
    context: &ProcessingContext,
    lookup: &LookupMaps,
    payloads: &mut [ProgrammePayload],
) -> Result<SanitizeReport, CoreError>
where
    S: PreclusionStore + PrerequisiteStore + ?Sized,
{
    let mut report: SanitizeReport = SanitizeReport::default();
    let preselected: Vec<ModuleCode> = context.preselected_modules();
    if preselected.is_empty() {
        return Ok(report);
    }

    let precluded: BTreeSet<ModuleCode> = precluded_by_preselected(store, context, &preselected)?;
    if !precluded.is_empty() {
        for payload in payloads.iter_mut() {
            for section in &mut payload.sections {
                let boxes: Vec<CourseBox> = std::mem::take(&mut section.boxes);
                section.boxes = prune_boxes(boxes, &precluded, &mut report);
            }
        }
    }

    let trees: BTreeMap<ModuleCode, PrereqTree> = store
        .prerequisite_trees(&preselected)?
        .into_iter()
        .collect();
    if !trees.is_empty() {
        let mut selected: BTreeSet<ModuleCode> = preselected.into_iter().collect();
        let mut injection: Injection<'_> = Injection {
            lookup,
            precluded: &precluded,
            selected: &mut selected,
            report: &mut report,
        };
        for payload in payloads.iter_mut() {
            let parents: Vec<ModuleCode> = payload.preselected_modules.clone();
            for parent in &parents {
                if let Some(tree) = trees.get(parent) {
                    injection.inject(payload, parent, tree);
                }
            }
        }
    }

    debug!(
        pruned_options = report.pruned_options,
        pruned_alternatives = report.pruned_alternatives,
        injected_boxes = report.injected_boxes,
        "Sanitized payloads"
    );
    Ok(report)
}

/// Returns every module precluded by a preselected module.
///
/// # Errors
///
/// Returns `CoreError::PreselectedConflict` if a preselected module
/// precludes another preselected module.
fn precluded_by_preselected<S>(
    store: &mut S,
    context: &ProcessingContext,
    preselected: &[ModuleCode],
) -> Result<BTreeSet<ModuleCode>, CoreError>
where
    S: PreclusionStore + ?Sized,
{
    let rows: Vec<ModulePreclusion> = store.preclusions(preselected)?;
    let mut precluded: BTreeSet<ModuleCode> = BTreeSet::new();

    for row in rows {
        if !context.is_preselected(&row.module_code) {
            continue;
        }
        for code in row.precluded {
            if code == row.module_code {
                continue;
            }
            if context.is_preselected(&code) {
                return Err(CoreError::PreselectedConflict {
                    module_code: row.module_code,
                    precluded: code,
                });
            }
            precluded.insert(code);
        }
    }
    Ok(precluded)
}

/// Removes precluded modules from a box sequence.
///
/// Boxes that can no longer be satisfied are dropped.
#[must_use]
pub fn prune_boxes(
    boxes: Vec<CourseBox>,
    precluded: &BTreeSet<ModuleCode>,
    report: &mut SanitizeReport,
) -> Vec<CourseBox> {
    boxes
        .into_iter()
        .filter_map(|course_box| {
            let pruned: Option<CourseBox> = prune_box(course_box, precluded, report);
            if pruned.is_none() {
                report.pruned_boxes += 1;
            }
            pruned
        })
        .collect()
}

/// Returns `None` when nothing of the box survives.
fn prune_box(
    course_box: CourseBox,
    precluded: &BTreeSet<ModuleCode>,
    report: &mut SanitizeReport,
) -> Option<CourseBox> {
    match course_box {
        CourseBox::Exact(exact) => {
            if precluded.contains(&exact.module_code) {
                None
            } else {
                Some(CourseBox::Exact(exact))
            }
        }
        CourseBox::Dropdown(mut dropdown) => {
            let before: usize = dropdown.options.len();
            dropdown.options.retain(|code| !precluded.contains(code));
            let removed: usize = before - dropdown.options.len();
            if removed > 0 {
                info!(box_key = %dropdown.box_key, removed, "Pruned precluded dropdown options");
                report.pruned_options += removed;
            }
            if dropdown.options.is_empty() {
                None
            } else {
                Some(CourseBox::Dropdown(dropdown))
            }
        }
        CourseBox::AltPath(mut alt_path) => {
            let before: usize = alt_path.alternatives.len();
            alt_path.alternatives = alt_path
                .alternatives
                .into_iter()
                .filter_map(|alternative| prune_alternative(alternative, precluded, report))
                .collect();
            let removed: usize = before - alt_path.alternatives.len();
            if removed > 0 {
                info!(box_key = %alt_path.box_key, removed, "Pruned precluded alternatives");
                report.pruned_alternatives += removed;
            }
            if alt_path.alternatives.is_empty() {
                None
            } else {
                Some(CourseBox::AltPath(alt_path))
            }
        }
    }
}

/// An alternative is dropped when any of its boxes can no longer be satisfied.
fn prune_alternative(
    alternative: AltPath,
    precluded: &BTreeSet<ModuleCode>,
    report: &mut SanitizeReport,
) -> Option<AltPath> {
    let AltPath { id, label, boxes } = alternative;
    let boxes: Vec<CourseBox> = boxes
        .into_iter()
        .map(|course_box| prune_box(course_box, precluded, report))
        .collect::<Option<Vec<CourseBox>>>()?;
    Some(AltPath { id, label, boxes })
}

/// Returns whether `tree` is already met by the selected modules.
#[must_use]
pub fn is_satisfied(tree: &PrereqTree, selected: &BTreeSet<ModuleCode>) -> bool {
    match tree {
        PrereqTree::Module(raw) => selected.contains(&PrereqTree::strip_grade(raw)),
        PrereqTree::And { and } => and.iter().all(|child| is_satisfied(child, selected)),
        PrereqTree::Or { or } => or.iter().any(|child| is_satisfied(child, selected)),
        PrereqTree::NOf {
            n_of: (n, children),
        } => {
            let met: usize = children
                .iter()
                .filter(|child| is_satisfied(child, selected))
                .count();
            met >= usize::try_from(*n).unwrap_or(usize::MAX)
        }
    }
}

struct Injection<'a> {
    lookup: &'a LookupMaps,
    /// Modules no injected box may offer.
    precluded: &'a BTreeSet<ModuleCode>,
    selected: &'a mut BTreeSet<ModuleCode>,
    report: &'a mut SanitizeReport,
}

impl Injection<'_> {
    fn inject(&mut self, payload: &mut ProgrammePayload, parent: &ModuleCode, tree: &PrereqTree) {
        if is_satisfied(tree, self.selected) {
            return;
        }

        match tree {
            PrereqTree::Module(raw) => {
                self.inject_module(payload, parent, &PrereqTree::strip_grade(raw));
            }
            PrereqTree::And { and } => {
                for child in and {
                    self.inject(payload, parent, child);
                }
            }
            PrereqTree::Or { .. } | PrereqTree::NOf { .. } => {
                let groups: Vec<GroupType> = self.lookup.groups_for(parent, &payload.metadata.id);
                let index: usize = section_for(payload, &groups);
                let base: String = format!(
                    "{}-{}",
                    payload.sections[index].section_key,
                    convert_to_id(parent.value())
                );
                let boxes: Vec<CourseBox> = prune_boxes(
                    prerequisite_boxes(&payload.metadata.id, &base, tree),
                    self.precluded,
                    self.report,
                );
                debug!(
                    programme_id = %payload.metadata.id,
                    parent = %parent,
                    boxes = boxes.len(),
                    "Injected prerequisite choice"
                );
                self.report.injected_boxes += boxes.len();
                payload.sections[index].boxes.extend(boxes);
            }
        }
    }

    fn inject_module(&mut self, payload: &mut ProgrammePayload, parent: &ModuleCode, code: &ModuleCode) {
        if self.selected.contains(code) {
            return;
        }
        if self.precluded.contains(code) {
            info!(
                programme_id = %payload.metadata.id,
                parent = %parent,
                module = %code,
                "Skipped precluded prerequisite module"
            );
            self.report.pruned_boxes += 1;
            return;
        }

        for section in &mut payload.sections {
            section.boxes.retain_mut(|course_box| match course_box {
                CourseBox::Dropdown(dropdown) => {
                    dropdown.options.retain(|option| option != code);
                    !dropdown.options.is_empty()
                }
                CourseBox::Exact(_) | CourseBox::AltPath(_) => true,
            });
        }

        let groups: Vec<GroupType> = self.lookup.groups_for(code, &payload.metadata.id);
        let index: usize = section_for(payload, &groups);
        let section: &mut ProgrammeSection = &mut payload.sections[index];
        section.boxes.push(CourseBox::Exact(ExactBox {
            box_key: format!(
                "{}-{}_prereq-{}",
                section.section_key,
                convert_to_id(parent.value()),
                convert_to_id(code.value())
            ),
            path_id: None,
            programme_id: payload.metadata.id.clone(),
            module_code: code.clone(),
            is_preselected: false,
            readonly: true,
        }));

        debug!(
            programme_id = %payload.metadata.id,
            parent = %parent,
            module = %code,
            "Injected prerequisite module"
        );
        self.selected.insert(code.clone());
        self.report.injected_boxes += 1;
    }
}

/// Picks the section for an injected box, creating `coreOthers` if needed.
fn section_for(payload: &mut ProgrammePayload, groups: &[GroupType]) -> usize {
    for group in GroupType::PREREQUISITE_PRIORITY {
        if !groups.contains(&group) {
            continue;
        }
        if let Some(index) = payload
            .sections
            .iter()
            .position(|section| section.group_type == group)
        {
            return index;
        }
    }

    if let Some(index) = payload
        .sections
        .iter()
        .position(|section| section.group_type == GroupType::CoreOthers)
    {
        return index;
    }

    payload.sections.push(ProgrammeSection {
        group_type: GroupType::CoreOthers,
        section_key: section_key(&payload.metadata, GroupType::CoreOthers),
        display_label: GroupType::CoreOthers.display_label().to_string(),
        required_units: 0,
        boxes: Vec::new(),
    });
    payload.sections.len() - 1
}

/// Builds the read-only boxes for a prerequisite tree.
///
/// - module: a pinned box
/// - and: its children's boxes, flattened
/// - or of modules: one dropdown
/// - any other or, and every nOf: one alt-path box, an alternative per child
fn prerequisite_boxes(programme_id: &str, base: &str, tree: &PrereqTree) -> Vec<CourseBox> {
    match tree {
        PrereqTree::Module(raw) => {
            let code: ModuleCode = PrereqTree::strip_grade(raw);
            vec![CourseBox::Exact(ExactBox {
                box_key: format!("{base}_prereq-{}", convert_to_id(code.value())),
                path_id: None,
                programme_id: programme_id.to_string(),
                module_code: code,
                is_preselected: false,
                readonly: true,
            })]
        }
        PrereqTree::And { and } => and
            .iter()
            .flat_map(|child| prerequisite_boxes(programme_id, base, child))
            .collect(),
        PrereqTree::Or { or } => {
            if or.iter().all(PrereqTree::is_leaf) {
                let mut options: Vec<ModuleCode> = Vec::new();
                for code in or.iter().filter_map(PrereqTree::leaf_code) {
                    if !options.contains(&code) {
                        options.push(code);
                    }
                }
                return vec![CourseBox::Dropdown(DropdownBox {
                    box_key: format!("{base}_prereq-dropdown"),
                    path_id: None,
                    programme_id: programme_id.to_string(),
                    label: String::from("Prerequisite (choose one)"),
                    options,
                    required_units: 0,
                    readonly: true,
                })];
            }
            vec![alt_path_box(
                programme_id,
                format!("{base}_prereq-pathways"),
                String::from("Prerequisite pathways"),
                or,
            )]
        }
        PrereqTree::NOf {
            n_of: (n, children),
        } => vec![alt_path_box(
            programme_id,
            format!("{base}_prereq-nOf-{n}"),
            format!("Prerequisite (choose {n} of {})", children.len()),
            children,
        )],
    }
}

fn alt_path_box(
    programme_id: &str,
    box_key: String,
    label: String,
    children: &[PrereqTree],
) -> CourseBox {
    let alternatives: Vec<AltPath> = children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let id: String = format!("{box_key}-option-{}", index + 1);
            AltPath {
                label: describe(child),
                boxes: prerequisite_boxes(programme_id, &id, child),
                id,
            }
        })
        .collect();

    CourseBox::AltPath(AltPathBox {
        box_key,
        path_id: None,
        programme_id: programme_id.to_string(),
        label,
        alternatives,
    })
}

fn describe(tree: &PrereqTree) -> String {
    tree.module_codes()
        .iter()
        .map(ModuleCode::value)
        .collect::<Vec<&str>>()
        .join(", ")
}
