// SPDX-License-Identifier: Apache-2.0

//! The signal frontier search: starting from a (module, wire) pair, find the
//! nearest multiplexer whose select input is a genuine decision point and
//! report the select wire's name and owning module.
//!
//! The search runs a priority-BFS over several edge types. Free structural
//! hops (direct aliasing, hierarchy crossings) go to the *front* of the work
//! queue so they are resolved before any newly discovered logic fan-out,
//! which goes to the *back*. A structural visited set makes the traversal
//! cycle-safe at the wire level; the first genuine match wins.

use crate::error::TraceError;
use crate::hierarchy::HierarchyIndex;
use crate::mux::{classify_select, is_mux, SelectClass, OUTPUT_PORT, SELECT_PORT};
use crate::netlist::{Design, Module, SigChunk, SigSpec};
use crate::wire_name::find_better_wirename;
use std::collections::{BTreeSet, VecDeque};

/// A (module, signal expression) pair awaiting exploration. Identity is
/// structural: same module name, bit-for-bit identical expression.
pub type FrontierItem = (String, SigSpec);

/// Result of one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The nearest genuine controlling multiplexer: its select wire's
    /// presentable name and the module that owns the mux.
    Found { selector: String, module: String },
    /// The frontier was exhausted without a terminal match. Not an error.
    NotFound,
}

/// One search invocation's state. Constructed fresh per call and discarded on
/// return; the design is never mutated.
pub struct MuxSearch<'a> {
    design: &'a Design,
    hierarchy: &'a HierarchyIndex,
    queue: VecDeque<FrontierItem>,
    visited: BTreeSet<FrontierItem>,
}

impl<'a> MuxSearch<'a> {
    pub fn new(design: &'a Design, hierarchy: &'a HierarchyIndex) -> Self {
        MuxSearch {
            design,
            hierarchy,
            queue: VecDeque::new(),
            visited: BTreeSet::new(),
        }
    }

    /// Run the search from `start_wire` (full name, marker included) in
    /// `start_module`.
    pub fn run(mut self, start_module: &str, start_wire: &str) -> Result<SearchOutcome, TraceError> {
        let design = self.design;
        let width = design
            .module(start_module)
            .and_then(|m| m.wire(start_wire))
            .map(|w| w.width)
            .unwrap_or(1);
        self.queue
            .push_back((start_module.to_string(), SigSpec::whole_wire(start_wire, width)));

        while let Some(item) = self.queue.pop_front() {
            if self.visited.contains(&item) {
                log::debug!("converging path at {} in module {}", describe(&item.1), item.0);
                continue;
            }
            self.visited.insert(item.clone());
            let (module_name, sig) = item;

            let module = match design.module(&module_name) {
                Some(m) => m,
                None => {
                    log::warn!("frontier names unknown module {}", module_name);
                    continue;
                }
            };
            if !module.processes.is_empty() {
                return Err(TraceError::UnresolvedProcesses {
                    module: module.name.clone(),
                });
            }

            for chunk in &sig.chunks {
                let wire_name = match chunk {
                    SigChunk::Const(_) => {
                        log::debug!("constant chunk in module {} is a dead end", module_name);
                        continue;
                    }
                    SigChunk::Slice { wire, .. } => wire.as_str(),
                };
                log::debug!("intermediate wire {} (module {})", wire_name, module_name);

                if let Some(found) = self.check_muxes(module, wire_name) {
                    return Ok(found);
                }
                self.expand_fanout(module, wire_name);
                self.expand_aliases(module, wire_name);
                self.expand_downward(module, wire_name);
                self.expand_upward(module, wire_name);
            }
        }

        Ok(SearchOutcome::NotFound)
    }

    /// Step (a): mux check. Terminal when the traced wire is bound to a
    /// genuine select port; otherwise the mux output joins the back of the
    /// queue and the search continues past the mux.
    fn check_muxes(&mut self, module: &Module, wire_name: &str) -> Option<SearchOutcome> {
        for cell in module.cells.values() {
            if !is_mux(cell) {
                continue;
            }
            for (port, bound) in &cell.connections {
                if module.sig_as_whole_wire(bound) != Some(wire_name)
                    || !self.design.cell_port_is_input(cell, port)
                {
                    continue;
                }
                if port == SELECT_PORT {
                    match classify_select(cell) {
                        Some(SelectClass::Genuine) => {
                            log::debug!(
                                "genuine select {} on mux {} in module {}",
                                wire_name,
                                cell.name,
                                module.name
                            );
                            return Some(SearchOutcome::Found {
                                selector: find_better_wirename(module, wire_name),
                                module: module.name.clone(),
                            });
                        }
                        Some(SelectClass::Reset) => {
                            log::debug!(
                                "select of mux {} in module {} is a reset; continuing",
                                cell.name,
                                module.name
                            );
                            self.enqueue_output(module, cell.connections.get(OUTPUT_PORT));
                        }
                        None => {}
                    }
                } else {
                    // Data input; pass through to the output.
                    self.enqueue_output(module, cell.connections.get(OUTPUT_PORT));
                }
            }
        }
        None
    }

    fn enqueue_output(&mut self, module: &Module, output: Option<&SigSpec>) {
        if let Some(sig) = output {
            self.queue.push_back((module.name.clone(), sig.clone()));
        }
    }

    /// Step (b): general fan-out through non-module cells; outputs go to the
    /// back of the queue.
    fn expand_fanout(&mut self, module: &Module, wire_name: &str) {
        for cell in module.cells.values() {
            if self.design.is_module_instance(cell) {
                continue;
            }
            let feeds_input = cell.connections.iter().any(|(port, bound)| {
                module.sig_as_whole_wire(bound) == Some(wire_name)
                    && self.design.cell_port_is_input(cell, port)
            });
            if !feeds_input {
                continue;
            }
            for (port, bound) in &cell.connections {
                if self.design.cell_port_is_output(cell, port) {
                    log::debug!(
                        "fan-out through cell {} (type {}) in module {}",
                        cell.name,
                        cell.ty,
                        module.name
                    );
                    self.queue.push_back((module.name.clone(), bound.clone()));
                }
            }
        }
    }

    /// Step (c): direct aliasing; the driven side of a connection is a free
    /// hop and goes to the front of the queue.
    fn expand_aliases(&mut self, module: &Module, wire_name: &str) {
        for (lhs, rhs) in &module.connections {
            if module.sig_as_whole_wire(rhs) == Some(wire_name) {
                log::debug!("alias {} in module {}", describe(lhs), module.name);
                self.queue.push_front((module.name.clone(), lhs.clone()));
            }
        }
    }

    /// Step (d): downward hierarchy crossing into an instantiated submodule;
    /// the submodule's port wire goes to the front of the queue.
    fn expand_downward(&mut self, module: &Module, wire_name: &str) {
        for cell in module.cells.values() {
            let sub = match self.design.module(&cell.ty) {
                Some(m) => m,
                None => continue,
            };
            for (port, bound) in &cell.connections {
                if module.sig_as_whole_wire(bound) != Some(wire_name) {
                    continue;
                }
                if self.design.cell_port_is_output(cell, port) {
                    continue;
                }
                match sub.wire(port) {
                    Some(port_wire) => {
                        log::debug!(
                            "descending into {} through port {} of cell {}",
                            sub.name,
                            port,
                            cell.name
                        );
                        self.queue.push_front((
                            sub.name.clone(),
                            SigSpec::whole_wire(&port_wire.name, port_wire.width),
                        ));
                    }
                    None => {
                        log::warn!(
                            "cell {} in module {} binds port {} that {} does not declare",
                            cell.name,
                            module.name,
                            port,
                            sub.name
                        );
                    }
                }
            }
        }
    }

    /// Step (e): upward hierarchy crossing. When the traced wire is an
    /// output port and a parent is recorded, the parent-side binding goes to
    /// the front of the queue.
    fn expand_upward(&mut self, module: &Module, wire_name: &str) {
        let wire = match module.wire(wire_name) {
            Some(w) => w,
            None => return,
        };
        if !wire.port_output {
            return;
        }
        let parent_name = match self.hierarchy.parent.get(&module.name) {
            Some(p) => p,
            None => return,
        };
        let parent = match self.design.module(parent_name) {
            Some(m) => m,
            None => return,
        };
        for cell in parent.cells.values() {
            if cell.ty != module.name {
                continue;
            }
            if let Some(bound) = cell.connections.get(wire_name) {
                log::debug!(
                    "ascending into {} through port {} of cell {}",
                    parent.name,
                    wire_name,
                    cell.name
                );
                self.queue.push_front((parent.name.clone(), bound.clone()));
            }
        }
    }
}

fn describe(sig: &SigSpec) -> String {
    match sig.as_wire() {
        Some(name) => name.to_string(),
        None => format!("{:?}", sig),
    }
}
