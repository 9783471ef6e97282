// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transitive closure of simple prerequisites.
//!
//! The closure is a breadth-first traversal over an index-addressed module
//! graph. A module is interned exactly once and enters the frontier only
//! when it is interned, so every module is fetched at most once and cycles
//! in the prerequisite relation cannot cause repeated work.

use crate::store::{PrerequisiteStore, StoreError};
use acadplan_domain::{ModuleCode, SimplePrerequisite};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Arena of modules with prerequisite edges stored by index.
#[derive(Debug, Default)]
struct ModuleGraph {
    nodes: Vec<ModuleCode>,
    index: HashMap<ModuleCode, usize>,
    prerequisites: Vec<Vec<usize>>,
}

impl ModuleGraph {
    /// Returns the node index for `code` and whether it was newly added.
    fn intern(&mut self, code: &ModuleCode) -> (usize, bool) {
        if let Some(&existing) = self.index.get(code) {
            return (existing, false);
        }
        let id: usize = self.nodes.len();
        self.nodes.push(code.clone());
        self.prerequisites.push(Vec::new());
        self.index.insert(code.clone(), id);
        (id, true)
    }

    fn add_edge(&mut self, module: usize, prerequisite: usize) {
        let edges: &mut Vec<usize> = &mut self.prerequisites[module];
        if !edges.contains(&prerequisite) {
            edges.push(prerequisite);
        }
    }
}

/// The result of a prerequisite closure run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteClosure {
    /// Starting modules followed by discovered prerequisites, in discovery order.
    pub modules: Vec<ModuleCode>,
    /// Discovered prerequisites that were not starting modules.
    pub prerequisites: Vec<ModuleCode>,
    /// Direct prerequisite edges of every fetched module.
    pub direct: BTreeMap<ModuleCode, Vec<ModuleCode>>,
    /// Set when a batch fetch failed and the closure is partial.
    pub failure: Option<StoreError>,
}

impl PrerequisiteClosure {
    /// Returns whether every batch was fetched.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Computes the transitive closure of simple prerequisites of `start`.
///
/// Each frontier is fetched in one batch. A failed batch stops the
/// traversal and is reported on the returned closure; nothing is retried.
///
/// # Arguments
///
/// * `store` - The prerequisite store
/// * `start` - The modules whose prerequisites are resolved
pub fn resolve_prerequisite_closure<S>(store: &mut S, start: &[ModuleCode]) -> PrerequisiteClosure
where
    S: PrerequisiteStore + ?Sized,
{
    let mut graph: ModuleGraph = ModuleGraph::default();
    let mut frontier: Vec<usize> = Vec::new();

    for code in start {
        let (id, is_new) = graph.intern(code);
        if is_new {
            frontier.push(id);
        }
    }
    let start_count: usize = graph.nodes.len();

    let mut fetched: Vec<bool> = Vec::new();
    let mut failure: Option<StoreError> = None;
    let mut batch: usize = 0;

    while !frontier.is_empty() {
        batch += 1;
        let codes: Vec<ModuleCode> = frontier.iter().map(|&id| graph.nodes[id].clone()).collect();

        let rows: Vec<SimplePrerequisite> = match store.simple_prerequisites(&codes) {
            Ok(rows) => rows,
            Err(err) => {
                debug!(batch, error = %err, "Prerequisite batch failed");
                failure = Some(err);
                break;
            }
        };

        let mut next: Vec<usize> = Vec::new();
        for row in rows {
            let Some(&module) = graph.index.get(&row.module_code) else {
                continue;
            };
            if !frontier.contains(&module) {
                continue;
            }
            for prerequisite in &row.prerequisites {
                let (prerequisite_id, is_new) = graph.intern(prerequisite);
                graph.add_edge(module, prerequisite_id);
                if is_new {
                    next.push(prerequisite_id);
                }
            }
        }

        fetched.resize(graph.nodes.len(), false);
        for &id in &frontier {
            fetched[id] = true;
        }
        debug!(
            batch,
            fetched = frontier.len(),
            discovered = next.len(),
            "Resolved prerequisite batch"
        );
        frontier = next;
    }

    fetched.resize(graph.nodes.len(), false);
    let direct: BTreeMap<ModuleCode, Vec<ModuleCode>> = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(id, _)| fetched[*id])
        .map(|(id, code)| {
            let edges: Vec<ModuleCode> = graph.prerequisites[id]
                .iter()
                .map(|&edge| graph.nodes[edge].clone())
                .collect();
            (code.clone(), edges)
        })
        .collect();

    PrerequisiteClosure {
        prerequisites: graph.nodes[start_count..].to_vec(),
        modules: graph.nodes,
        direct,
        failure,
    }
}
