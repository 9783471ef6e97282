// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A concrete catalogue module code, e.g. `CS2040S`.
///
/// Codes are normalized to uppercase with surrounding whitespace removed,
/// so `cs1010 ` and `CS1010` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ModuleCode(String);

impl ModuleCode {
    /// Creates a new normalized `ModuleCode`.
    ///
    /// # Arguments
    ///
    /// * `value` - The raw code
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns whether this code carries a variant suffix letter (`CS2040S`).
    #[must_use]
    pub fn has_variant_suffix(&self) -> bool {
        self.0.chars().last().is_some_and(char::is_alphabetic)
    }

    /// Returns whether this code begins with the given prefix.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.trim().to_uppercase())
    }
}

impl From<String> for ModuleCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for ModuleCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<ModuleCode> for String {
    fn from(value: ModuleCode) -> Self {
        value.0
    }
}

impl std::fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of an academic programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgrammeType {
    Major,
    SecondMajor,
    Minor,
}

impl ProgrammeType {
    /// Converts this programme type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::SecondMajor => "secondMajor",
            Self::Minor => "minor",
        }
    }
}

impl FromStr for ProgrammeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "secondMajor" => Ok(Self::SecondMajor),
            "minor" => Ok(Self::Minor),
            _ => Err(DomainError::InvalidProgrammeType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProgrammeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Programme metadata. Immutable for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    /// Stable programme identifier.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Major, second major or minor.
    #[serde(rename = "type")]
    pub programme_type: ProgrammeType,
    /// Units required to complete the programme.
    pub required_units: u32,
    /// Maximum units that may be double counted with other programmes.
    pub double_count_cap: u32,
}

impl Programme {
    /// Creates a new `Programme`.
    ///
    /// # Arguments
    ///
    /// * `id` - The programme identifier
    /// * `name` - The display name
    /// * `programme_type` - The programme type
    /// * `required_units` - Units required for completion
    /// * `double_count_cap` - Units eligible for double counting
    #[must_use]
    pub fn new(
        id: &str,
        name: &str,
        programme_type: ProgrammeType,
        required_units: u32,
        double_count_cap: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            programme_type,
            required_units,
            double_count_cap,
        }
    }

    /// Returns whether this programme is a major.
    #[must_use]
    pub fn is_major(&self) -> bool {
        self.programme_type == ProgrammeType::Major
    }
}

/// A pairwise programme preclusion: the two programmes may not be combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammePreclusion {
    pub programme_id: String,
    pub precluded_programme_id: String,
}

/// The requirement category a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupType {
    CommonCore,
    CoreEssentials,
    CoreElectives,
    CoreSpecials,
    CoreOthers,
    UnrestrictedElectives,
    Constraints,
}

impl GroupType {
    /// Groups rendered into sections, in rendering order.
    ///
    /// Unrestricted electives are chosen freely by the student and never
    /// produce catalogue-driven boxes.
    pub const PROCESSING_ORDER: [Self; 5] = [
        Self::CommonCore,
        Self::CoreEssentials,
        Self::CoreElectives,
        Self::CoreSpecials,
        Self::CoreOthers,
    ];

    /// Section priority used when placing injected prerequisite boxes.
    pub const PREREQUISITE_PRIORITY: [Self; 5] = [
        Self::CommonCore,
        Self::CoreEssentials,
        Self::CoreElectives,
        Self::CoreSpecials,
        Self::CoreOthers,
    ];

    /// Converts this group type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CommonCore => "commonCore",
            Self::CoreEssentials => "coreEssentials",
            Self::CoreElectives => "coreElectives",
            Self::CoreSpecials => "coreSpecials",
            Self::CoreOthers => "coreOthers",
            Self::UnrestrictedElectives => "unrestrictedElectives",
            Self::Constraints => "constraints",
        }
    }

    /// Returns the section heading shown to the user.
    #[must_use]
    pub const fn display_label(&self) -> &'static str {
        match self {
            Self::CommonCore => "Common Curriculum",
            Self::CoreEssentials => "Core Essentials",
            Self::CoreElectives => "Core Electives",
            Self::CoreSpecials => "Specialisations",
            Self::CoreOthers => "Others",
            Self::UnrestrictedElectives => "Unrestricted Electives",
            Self::Constraints => "Constraints",
        }
    }
}

impl FromStr for GroupType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commonCore" => Ok(Self::CommonCore),
            "coreEssentials" => Ok(Self::CoreEssentials),
            "coreElectives" => Ok(Self::CoreElectives),
            "coreSpecials" => Ok(Self::CoreSpecials),
            "coreOthers" => Ok(Self::CoreOthers),
            "unrestrictedElectives" => Ok(Self::UnrestrictedElectives),
            "constraints" => Ok(Self::Constraints),
            _ => Err(DomainError::InvalidGroupType(s.to_string())),
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a requirement node combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicType {
    And,
    Or,
    Leaf,
}

impl LogicType {
    /// Converts this logic type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Leaf => "LEAF",
        }
    }
}

impl FromStr for LogicType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "LEAF" => Ok(Self::Leaf),
            _ => Err(DomainError::InvalidLogicType(s.to_string())),
        }
    }
}

/// Unit rule attached to a leaf path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Min,
    Max,
}

impl RuleType {
    /// Converts this rule type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl FromStr for RuleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(DomainError::InvalidRuleType(s.to_string())),
        }
    }
}

/// The pattern kind of a general module code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GmcType {
    /// A single catalogue code.
    #[default]
    Exact,
    /// Every base module sharing a prefix (`CS3xxx`).
    Wildcard,
    /// A base code and its lettered variants (`CS2040` covers `CS2040S`).
    Variant,
    /// A free-text token with no catalogue counterpart.
    Other,
}

impl GmcType {
    /// Converts this GMC type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Wildcard => "wildcard",
            Self::Variant => "variant",
            Self::Other => "other",
        }
    }
}

impl FromStr for GmcType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "wildcard" => Ok(Self::Wildcard),
            "variant" => Ok(Self::Variant),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidGmcType(s.to_string())),
        }
    }
}

/// A general module code as written in a requirement path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralModuleCode {
    pub code: String,
    #[serde(default)]
    pub gmc_type: GmcType,
}

impl GeneralModuleCode {
    /// Creates a new `GeneralModuleCode`.
    #[must_use]
    pub fn new(code: &str, gmc_type: GmcType) -> Self {
        Self {
            code: code.trim().to_string(),
            gmc_type,
        }
    }

    /// Creates an exact general module code.
    #[must_use]
    pub fn exact(code: &str) -> Self {
        Self::new(code, GmcType::Exact)
    }

    /// Pairs parallel code and type lists. Missing types default to exact.
    ///
    /// # Arguments
    ///
    /// * `codes` - The raw codes
    /// * `types` - The raw type names, possibly shorter than `codes`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGmcType` if a type name is unknown.
    pub fn zip(codes: &[String], types: &[String]) -> Result<Vec<Self>, DomainError> {
        codes
            .iter()
            .enumerate()
            .map(|(index, code)| {
                let gmc_type: GmcType = match types.get(index) {
                    Some(raw) => raw.parse()?,
                    None => GmcType::Exact,
                };
                Ok(Self::new(code, gmc_type))
            })
            .collect()
    }
}

/// A node of a programme's requirement tree, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementPath {
    pub path_id: i64,
    pub programme_id: String,
    pub path_key: String,
    #[serde(default)]
    pub parent_path_key: Option<String>,
    #[serde(default)]
    pub display_label: String,
    pub group_type: GroupType,
    pub logic_type: LogicType,
    #[serde(default)]
    pub rule_type: Option<RuleType>,
    #[serde(default)]
    pub rule_value: Option<u32>,
    #[serde(default)]
    pub required_units: Option<u32>,
    pub depth: i32,
    pub is_leaf: bool,
    #[serde(default)]
    pub is_readonly: bool,
    /// Bookkeeping-only path that never renders.
    #[serde(default)]
    pub is_overall_source: bool,
    #[serde(default)]
    pub raw_tag_name: Option<String>,
    #[serde(default)]
    pub module_codes: Vec<GeneralModuleCode>,
    #[serde(default)]
    pub exception_modules: Vec<ModuleCode>,
}

impl RequirementPath {
    /// Returns the exact-typed module codes of this path.
    #[must_use]
    pub fn exact_module_codes(&self) -> Vec<ModuleCode> {
        self.module_codes
            .iter()
            .filter(|gmc| gmc.gmc_type == GmcType::Exact)
            .map(|gmc| ModuleCode::new(&gmc.code))
            .collect()
    }

    /// Returns whether any module code on this path is non-exact.
    #[must_use]
    pub fn has_non_exact_codes(&self) -> bool {
        self.module_codes
            .iter()
            .any(|gmc| gmc.gmc_type != GmcType::Exact)
    }

    /// Returns whether this path declares a unit cap.
    #[must_use]
    pub fn is_max_rule(&self) -> bool {
        self.rule_type == Some(RuleType::Max)
    }

    /// Returns whether this path's exact modules are mandatory for its programme.
    #[must_use]
    pub fn is_preselection_source(&self) -> bool {
        self.is_leaf && self.is_readonly && self.group_type == GroupType::CoreEssentials
    }

    /// Returns whether the given module is excluded from this path's pool.
    #[must_use]
    pub fn excludes(&self, code: &ModuleCode) -> bool {
        self.exception_modules.contains(code)
    }

    /// Units this path requires, falling back to its rule value.
    #[must_use]
    pub fn effective_required_units(&self) -> u32 {
        self.required_units.or(self.rule_value).unwrap_or(0)
    }
}

/// Catalogue information for a single module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub code: ModuleCode,
    pub title: String,
    pub units: u32,
}

impl ModuleSummary {
    /// Title shown for general module codes with no catalogue entry.
    pub const PLACEHOLDER_TITLE: &'static str = "Undefined - Please check relevant website";

    /// Units assumed for general module codes with no catalogue entry.
    pub const PLACEHOLDER_UNITS: u32 = 4;

    /// Creates a new `ModuleSummary`.
    #[must_use]
    pub fn new(code: &str, title: &str, units: u32) -> Self {
        Self {
            code: ModuleCode::new(code),
            title: title.to_string(),
            units,
        }
    }

    /// Creates the placeholder summary for an unresolvable token.
    #[must_use]
    pub fn placeholder(token: &str) -> Self {
        Self::new(token, Self::PLACEHOLDER_TITLE, Self::PLACEHOLDER_UNITS)
    }
}

/// A resolved general module code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmcMapping {
    pub programme_id: String,
    pub gmc_code: String,
    pub gmc_type: GmcType,
    pub module_code: ModuleCode,
    /// Only set for `other` tokens, which need manual approval.
    #[serde(default)]
    pub requires_approval: bool,
}

impl GmcMapping {
    /// Creates a new `GmcMapping`, deriving the approval flag from the type.
    #[must_use]
    pub fn new(programme_id: &str, gmc_code: &str, gmc_type: GmcType, module_code: &str) -> Self {
        Self {
            programme_id: programme_id.to_string(),
            gmc_code: gmc_code.to_string(),
            gmc_type,
            module_code: ModuleCode::new(module_code),
            requires_approval: gmc_type == GmcType::Other,
        }
    }
}

/// The single-module prerequisites of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePrerequisite {
    pub module_code: ModuleCode,
    pub prerequisites: Vec<ModuleCode>,
}

/// The modules precluded by one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePreclusion {
    pub module_code: ModuleCode,
    pub precluded: Vec<ModuleCode>,
}
