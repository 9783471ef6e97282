// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while parsing or validating requirement data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Programme type string is not one of the known types.
    InvalidProgrammeType(String),
    /// Group type string is not one of the known groups.
    InvalidGroupType(String),
    /// Logic type string is not AND, OR or LEAF.
    InvalidLogicType(String),
    /// Rule type string is not min or max.
    InvalidRuleType(String),
    /// GMC type string is not one of exact, wildcard, variant or other.
    InvalidGmcType(String),
    /// Two requirement paths of one programme share a key.
    DuplicatePathKey {
        /// The programme owning the paths.
        programme_id: String,
        /// The duplicated key.
        path_key: String,
    },
    /// A requirement path names a parent that does not exist.
    OrphanPath {
        /// The programme owning the path.
        programme_id: String,
        /// The key of the orphaned path.
        path_key: String,
        /// The parent key that could not be resolved.
        parent_key: String,
    },
    /// A child path's depth is not exactly one below its parent's.
    DepthMismatch {
        /// The key of the offending child.
        path_key: String,
        /// Depth of the parent.
        parent_depth: i32,
        /// Depth recorded on the child.
        depth: i32,
    },
    /// A LEAF path has children.
    LeafWithChildren {
        /// The key of the leaf.
        path_key: String,
    },
    /// A group (AND/OR) path carries module codes.
    ModulesOnGroupPath {
        /// The key of the group path.
        path_key: String,
    },
    /// A prerequisite tree could not be interpreted.
    InvalidPrerequisiteTree(String),
    /// No programmes were requested.
    EmptyProgrammeSelection,
    /// More programmes were requested than a single plan supports.
    TooManyProgrammes {
        /// The number requested.
        count: usize,
        /// The permitted maximum.
        max: usize,
    },
    /// The same programme was requested twice.
    DuplicateProgramme(String),
    /// A programme id is empty.
    InvalidProgrammeId(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProgrammeType(value) => write!(f, "Invalid programme type: {value}"),
            Self::InvalidGroupType(value) => write!(f, "Invalid group type: {value}"),
            Self::InvalidLogicType(value) => write!(f, "Invalid logic type: {value}"),
            Self::InvalidRuleType(value) => write!(f, "Invalid rule type: {value}"),
            Self::InvalidGmcType(value) => write!(f, "Invalid general module code type: {value}"),
            Self::DuplicatePathKey {
                programme_id,
                path_key,
            } => write!(
                f,
                "Programme {programme_id} has more than one requirement path with key {path_key}"
            ),
            Self::OrphanPath {
                programme_id,
                path_key,
                parent_key,
            } => write!(
                f,
                "Requirement path {path_key} of programme {programme_id} references unknown parent {parent_key}"
            ),
            Self::DepthMismatch {
                path_key,
                parent_depth,
                depth,
            } => write!(
                f,
                "Requirement path {path_key} has depth {depth} but its parent has depth {parent_depth}"
            ),
            Self::LeafWithChildren { path_key } => {
                write!(f, "Leaf requirement path {path_key} has children")
            }
            Self::ModulesOnGroupPath { path_key } => {
                write!(f, "Group requirement path {path_key} carries module codes")
            }
            Self::InvalidPrerequisiteTree(msg) => write!(f, "Invalid prerequisite tree: {msg}"),
            Self::EmptyProgrammeSelection => write!(f, "At least one programme must be selected"),
            Self::TooManyProgrammes { count, max } => write!(
                f,
                "Too many programmes selected: {count} (at most {max} are allowed)"
            ),
            Self::DuplicateProgramme(id) => write!(f, "Programme {id} was selected more than once"),
            Self::InvalidProgrammeId(id) => write!(f, "Invalid programme id: '{id}'"),
        }
    }
}

impl std::error::Error for DomainError {}
