// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parse-time construction of a programme's requirement tree.
//!
//! Stored requirement paths are flat rows linked by `parent_path_key`.
//! They are parsed once into a closed [`RequirementNode`] forest so that
//! later tree walks match on node kind instead of probing row fields.

use crate::error::DomainError;
use crate::types::{LogicType, RequirementPath};
use std::collections::HashMap;

/// A requirement tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementNode {
    /// An AND/OR node combining its children.
    Group {
        path: RequirementPath,
        children: Vec<Self>,
    },
    /// A LEAF node carrying a module pool.
    Leaf { path: RequirementPath },
}

impl RequirementNode {
    /// Returns the stored path backing this node.
    #[must_use]
    pub const fn path(&self) -> &RequirementPath {
        match self {
            Self::Group { path, .. } | Self::Leaf { path } => path,
        }
    }

    /// Returns `(parent path id, child path ids)` for every group below (or at) this node.
    #[must_use]
    pub fn hierarchy(&self) -> Vec<(i64, Vec<i64>)> {
        let mut edges: Vec<(i64, Vec<i64>)> = Vec::new();
        self.collect_hierarchy(&mut edges);
        edges
    }

    fn collect_hierarchy(&self, edges: &mut Vec<(i64, Vec<i64>)>) {
        if let Self::Group { path, children } = self {
            edges.push((
                path.path_id,
                children.iter().map(|child| child.path().path_id).collect(),
            ));
            for child in children {
                child.collect_hierarchy(edges);
            }
        }
    }
}

/// Builds the requirement forest of a single programme.
///
/// Roots are returned in input order, as are each node's children.
///
/// # Arguments
///
/// * `programme_id` - The programme the paths belong to
/// * `paths` - The programme's requirement paths
///
/// # Errors
///
/// Returns an error if two paths share a key, a parent key does not
/// resolve, a child's depth is not one below its parent's, a LEAF path has
/// children, or an AND/OR path carries module codes.
pub fn build_requirement_forest(
    programme_id: &str,
    paths: &[RequirementPath],
) -> Result<Vec<RequirementNode>, DomainError> {
    let mut index_by_key: HashMap<&str, usize> = HashMap::new();
    for (index, path) in paths.iter().enumerate() {
        if index_by_key.insert(&path.path_key, index).is_some() {
            return Err(DomainError::DuplicatePathKey {
                programme_id: programme_id.to_string(),
                path_key: path.path_key.clone(),
            });
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); paths.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        let Some(parent_key) = path.parent_path_key.as_deref() else {
            roots.push(index);
            continue;
        };

        let parent_index: usize =
            *index_by_key
                .get(parent_key)
                .ok_or_else(|| DomainError::OrphanPath {
                    programme_id: programme_id.to_string(),
                    path_key: path.path_key.clone(),
                    parent_key: parent_key.to_string(),
                })?;

        let parent_depth: i32 = paths[parent_index].depth;
        if path.depth != parent_depth + 1 {
            return Err(DomainError::DepthMismatch {
                path_key: path.path_key.clone(),
                parent_depth,
                depth: path.depth,
            });
        }

        children[parent_index].push(index);
    }

    // Depth strictly increases along every edge, so the recursion terminates.
    roots
        .into_iter()
        .map(|root| build_node(paths, &children, root))
        .collect()
}

fn build_node(
    paths: &[RequirementPath],
    children: &[Vec<usize>],
    index: usize,
) -> Result<RequirementNode, DomainError> {
    let path: &RequirementPath = &paths[index];

    match path.logic_type {
        LogicType::Leaf => {
            if !children[index].is_empty() {
                return Err(DomainError::LeafWithChildren {
                    path_key: path.path_key.clone(),
                });
            }
            Ok(RequirementNode::Leaf { path: path.clone() })
        }
        LogicType::And | LogicType::Or => {
            if !path.module_codes.is_empty() {
                return Err(DomainError::ModulesOnGroupPath {
                    path_key: path.path_key.clone(),
                });
            }
            let nodes: Vec<RequirementNode> = children[index]
                .iter()
                .map(|&child| build_node(paths, children, child))
                .collect::<Result<_, _>>()?;
            Ok(RequirementNode::Group {
                path: path.clone(),
                children: nodes,
            })
        }
    }
}
