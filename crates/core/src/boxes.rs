// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Box construction from evaluated requirement trees.
//!
//! - LEAF: one dropdown over its pool, minus exception modules
//! - AND: its children's boxes, flattened into one sequence
//! - OR: one alt-path box with an alternative per child

use crate::context::{ProcessedPath, ProcessedProgramme};
use crate::evaluator::EvaluatedProgramme;
use crate::payload::{AltPath, AltPathBox, CourseBox, DropdownBox, ExactBox, ProgrammeSection};
use acadplan_domain::{
    GroupType, LogicType, ModuleCode, Programme, RequirementNode, RequirementPath,
    convert_to_id, prettify,
};

/// Builds boxes for one programme's requirement nodes.
#[derive(Debug, Clone, Copy)]
pub struct BoxBuilder<'a> {
    programme_id: &'a str,
    evaluated: &'a EvaluatedProgramme,
}

impl<'a> BoxBuilder<'a> {
    /// Creates a builder over an evaluated programme.
    #[must_use]
    pub const fn new(programme_id: &'a str, evaluated: &'a EvaluatedProgramme) -> Self {
        Self {
            programme_id,
            evaluated,
        }
    }

    /// Returns the boxes for a node and everything below it.
    ///
    /// Hidden nodes and cap-only leaves produce nothing.
    #[must_use]
    pub fn build_node(&self, node: &RequirementNode) -> Vec<CourseBox> {
        match node {
            RequirementNode::Leaf { path } => self.leaf_box(path).into_iter().collect(),
            RequirementNode::Group { path, children } => {
                if path.is_overall_source {
                    return Vec::new();
                }
                match path.logic_type {
                    LogicType::Or => self.alt_path_box(path, children).into_iter().collect(),
                    LogicType::And | LogicType::Leaf => children
                        .iter()
                        .flat_map(|child| self.build_node(child))
                        .collect(),
                }
            }
        }
    }

    fn alt_path_box(&self, path: &RequirementPath, children: &[RequirementNode]) -> Option<CourseBox> {
        let alternatives: Vec<AltPath> = children
            .iter()
            .filter(|child| !child.path().is_overall_source)
            .map(|child| AltPath {
                id: child.path().path_key.clone(),
                label: label_for(child.path()),
                boxes: self.build_node(child),
            })
            .collect();

        if alternatives.is_empty() {
            return None;
        }

        Some(CourseBox::AltPath(AltPathBox {
            box_key: format!("{}-altpath", path.path_key),
            path_id: Some(path.path_id),
            programme_id: self.programme_id.to_string(),
            label: label_for(path),
            alternatives,
        }))
    }

    fn leaf_box(&self, path: &RequirementPath) -> Option<CourseBox> {
        if path.is_overall_source || path.is_max_rule() {
            return None;
        }
        let processed: &ProcessedPath = self.evaluated.processed(path.path_id)?;

        // Exact codes of mandatory leaves are rendered as pinned boxes instead.
        let (options, readonly): (Vec<ModuleCode>, bool) = if path.is_preselection_source() {
            if !path.has_non_exact_codes() {
                return None;
            }
            (processed.non_exact_modules(), true)
        } else {
            (processed.resolved_modules.clone(), path.is_readonly)
        };
        if options.is_empty() {
            return None;
        }

        Some(CourseBox::Dropdown(DropdownBox {
            box_key: format!("{}-dropdown", path.path_key),
            path_id: Some(path.path_id),
            programme_id: self.programme_id.to_string(),
            label: label_for(path),
            options,
            required_units: processed.required_units,
            readonly,
        }))
    }
}

fn label_for(path: &RequirementPath) -> String {
    if path.display_label.trim().is_empty() {
        prettify(&path.path_key)
    } else {
        path.display_label.clone()
    }
}

/// Returns the key of a programme's section for a group.
#[must_use]
pub fn section_key(programme: &Programme, group: GroupType) -> String {
    format!(
        "{}-{}-{}",
        convert_to_id(&programme.name),
        convert_to_id(programme.programme_type.as_str()),
        convert_to_id(group.as_str())
    )
}

/// Builds the pinned boxes for a programme's preselected modules.
///
/// Directly required modules are keyed by their declaring path; modules
/// added only as prerequisites are keyed `prereq-{code}` and carry no path.
#[must_use]
pub fn preselected_boxes(
    processed: &ProcessedProgramme,
    evaluated: &EvaluatedProgramme,
) -> Vec<CourseBox> {
    let programme_id: &str = processed.id();

    processed
        .preselected_modules
        .iter()
        .map(|code| {
            let (box_key, path_id): (String, Option<i64>) = if processed.is_prerequisite_module(code)
            {
                (format!("prereq-{code}"), None)
            } else {
                evaluated
                    .paths
                    .iter()
                    .map(|candidate| &candidate.path)
                    .find(|candidate| {
                        candidate.is_preselection_source()
                            && candidate.exact_module_codes().contains(code)
                    })
                    .map_or_else(
                        || (format!("{}-{code}", GroupType::CoreEssentials.as_str()), None),
                        |source| (format!("{}-{code}", source.path_key), Some(source.path_id)),
                    )
            };

            CourseBox::Exact(ExactBox {
                box_key,
                path_id,
                programme_id: programme_id.to_string(),
                module_code: code.clone(),
                is_preselected: true,
                readonly: true,
            })
        })
        .collect()
}

/// Builds every section of one programme in canonical group order.
///
/// The `coreEssentials` section starts with the programme's preselected
/// modules. Groups with no roots and no boxes are omitted.
#[must_use]
pub fn build_sections(
    processed: &ProcessedProgramme,
    evaluated: &EvaluatedProgramme,
) -> Vec<ProgrammeSection> {
    let builder: BoxBuilder<'_> = BoxBuilder::new(processed.id(), evaluated);
    let mut sections: Vec<ProgrammeSection> = Vec::new();

    for group in GroupType::PROCESSING_ORDER {
        let roots: Vec<&RequirementNode> = evaluated.roots_in(group);
        let mut boxes: Vec<CourseBox> = Vec::new();

        if group == GroupType::CoreEssentials {
            boxes.extend(preselected_boxes(processed, evaluated));
        }
        for root in &roots {
            boxes.extend(builder.build_node(root));
        }

        if roots.is_empty() && boxes.is_empty() {
            continue;
        }

        sections.push(ProgrammeSection {
            group_type: group,
            section_key: section_key(&processed.programme, group),
            display_label: group.display_label().to_string(),
            required_units: roots
                .iter()
                .map(|root| root.path().effective_required_units())
                .sum(),
            boxes,
        });
    }

    sections
}
