// SPDX-License-Identifier: Apache-2.0

//! Module hierarchy indexing: a topological order over the instantiation
//! hierarchy and a child-to-parent map.
//!
//! Instantiation is treated as a directed edge from the instantiated module
//! to its instantiator, so the order places every instantiated module before
//! every module that instantiates it. Recursive instantiation is a fatal
//! configuration error.

use crate::error::TraceError;
use crate::netlist::Design;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Hierarchy facts for one design, rebuilt per tracer invocation.
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    /// Module names, instantiated modules strictly before their
    /// instantiators.
    pub order: Vec<String>,
    /// Instantiated module name to the module that instantiates it.
    ///
    /// Known limitation: when a module is instantiated from more than one
    /// selected parent, only the last observed relationship is retained and
    /// a warning names the conflict. Upward hierarchy crossing follows this
    /// single recorded parent.
    pub parent: HashMap<String, String>,
}

impl HierarchyIndex {
    /// Build the index over the selected modules of `design`.
    ///
    /// The node set is the selected modules plus any module they
    /// (transitively) instantiate, so hierarchy crossing stays coherent even
    /// when the selection omits an inner module.
    pub fn build(design: &Design) -> Result<HierarchyIndex, TraceError> {
        // Discover the node set from the selected modules outward.
        let mut nodes: BTreeSet<String> = BTreeSet::new();
        let mut worklist: Vec<&str> = design
            .selected_modules()
            .map(|m| m.name.as_str())
            .collect();
        while let Some(name) = worklist.pop() {
            if !nodes.insert(name.to_string()) {
                continue;
            }
            let module = match design.module(name) {
                Some(m) => m,
                None => continue,
            };
            for cell in module.cells.values() {
                if design.module(&cell.ty).is_some() {
                    worklist.push(&cell.ty);
                }
            }
        }

        // Edges: instantiated module -> instantiator.
        let mut successors: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut indegree: BTreeMap<String, usize> = BTreeMap::new();
        for name in &nodes {
            successors.entry(name.clone()).or_default();
            indegree.entry(name.clone()).or_insert(0);
        }
        for name in &nodes {
            let module = match design.module(name) {
                Some(m) => m,
                None => continue,
            };
            for cell in module.cells.values() {
                if !nodes.contains(&cell.ty) {
                    continue;
                }
                let out = successors.entry(cell.ty.clone()).or_default();
                if out.insert(name.clone()) {
                    *indegree.entry(name.clone()).or_insert(0) += 1;
                }
            }
        }

        // Kahn's algorithm; the ready set is ordered for determinism.
        let mut ready: BTreeSet<String> = indegree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(n, _)| n.clone())
            .collect();
        let mut order: Vec<String> = Vec::with_capacity(nodes.len());
        while let Some(name) = ready.iter().next().cloned() {
            ready.remove(&name);
            order.push(name.clone());
            if let Some(succ) = successors.get(&name) {
                for s in succ.clone() {
                    let d = indegree.entry(s.clone()).or_insert(0);
                    *d -= 1;
                    if *d == 0 {
                        ready.insert(s);
                    }
                }
            }
        }
        if order.len() != nodes.len() {
            return Err(TraceError::RecursiveModules);
        }

        // Child-to-parent map over selected instantiators; last write wins.
        let mut parent: HashMap<String, String> = HashMap::new();
        for module in design.selected_modules() {
            for cell in module.cells.values() {
                if design.module(&cell.ty).is_none() {
                    continue;
                }
                if let Some(prev) = parent.get(&cell.ty) {
                    if prev != &module.name {
                        log::warn!(
                            "module {} is instantiated by both {} and {}; keeping {}",
                            cell.ty,
                            prev,
                            module.name,
                            module.name
                        );
                    }
                }
                parent.insert(cell.ty.clone(), module.name.clone());
            }
        }

        Ok(HierarchyIndex { order, parent })
    }
}
