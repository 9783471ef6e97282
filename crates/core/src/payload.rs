// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::context::MaxRule;
use acadplan_domain::{GroupType, ModuleCode, Programme};
use serde::Serialize;

/// A renderable selection box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CourseBox {
    /// Pins a single module.
    Exact(ExactBox),
    /// Offers interchangeable options.
    Dropdown(DropdownBox),
    /// Offers mutually exclusive box sequences.
    AltPath(AltPathBox),
}

impl CourseBox {
    /// Returns the box's stable key.
    #[must_use]
    pub fn box_key(&self) -> &str {
        match self {
            Self::Exact(exact) => &exact.box_key,
            Self::Dropdown(dropdown) => &dropdown.box_key,
            Self::AltPath(alt_path) => &alt_path.box_key,
        }
    }

    /// Returns whether this box, or any box nested in it, offers or pins `code`.
    #[must_use]
    pub fn mentions(&self, code: &ModuleCode) -> bool {
        match self {
            Self::Exact(exact) => &exact.module_code == code,
            Self::Dropdown(dropdown) => dropdown.options.contains(code),
            Self::AltPath(alt_path) => alt_path
                .alternatives
                .iter()
                .any(|alternative| alternative.boxes.iter().any(|inner| inner.mentions(code))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactBox {
    pub box_key: String,
    pub path_id: Option<i64>,
    pub programme_id: String,
    pub module_code: ModuleCode,
    pub is_preselected: bool,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownBox {
    pub box_key: String,
    pub path_id: Option<i64>,
    pub programme_id: String,
    pub label: String,
    pub options: Vec<ModuleCode>,
    pub required_units: u32,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AltPathBox {
    pub box_key: String,
    pub path_id: Option<i64>,
    pub programme_id: String,
    pub label: String,
    pub alternatives: Vec<AltPath>,
}

/// One branch of an [`AltPathBox`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AltPath {
    pub id: String,
    pub label: String,
    pub boxes: Vec<CourseBox>,
}

/// The boxes of one requirement group of a programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammeSection {
    pub group_type: GroupType,
    pub section_key: String,
    pub display_label: String,
    pub required_units: u32,
    pub boxes: Vec<CourseBox>,
}

/// Everything rendered for one programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammePayload {
    #[serde(flatten)]
    pub metadata: Programme,
    pub sections: Vec<ProgrammeSection>,
    pub preselected_modules: Vec<ModuleCode>,
    pub prerequisite_modules: Vec<ModuleCode>,
    pub max_rules: Vec<MaxRule>,
}

impl ProgrammePayload {
    /// Returns the section for a group, if rendered.
    #[must_use]
    pub fn section(&self, group: GroupType) -> Option<&ProgrammeSection> {
        self.sections
            .iter()
            .find(|section| section.group_type == group)
    }
}
