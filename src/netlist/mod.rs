// SPDX-License-Identifier: Apache-2.0

//! In-memory hierarchical netlist model.
//!
//! A `Design` owns a set of `Module`s; each module owns its wires, cells, and
//! direct connections. A cell is either a primitive operation (type tag
//! starting with `$`, e.g. `$mux`) or an instantiation of another module in
//! the same design (type tag equal to that module's name). Module-instance
//! cells key their connections by the submodule's port wire name.
//!
//! Naming follows the RTLIL convention: user-visible identifiers start with
//! `\` and synthesizer-generated ones with `$`. Wire references inside signal
//! expressions are by name, scoped to the module under examination.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub mod io;

/// Leading marker of user-visible identifiers.
pub const PUBLIC_PREFIX: char = '\\';
/// Leading marker of synthetic (tool-generated) identifiers.
pub const SYNTHETIC_PREFIX: char = '$';

/// A named, fixed-width signal within a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub name: String,
    pub width: u32,
    #[serde(default)]
    pub port_input: bool,
    #[serde(default)]
    pub port_output: bool,
    /// Attribute payloads used by the surrounding rewrite passes (e.g.
    /// `fuzz_wire`, `regstate_cell_wire`). Carried verbatim; the tracer
    /// never interprets them.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// One bit-range piece of a signal expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SigChunk {
    /// A constant value, LSB first.
    Const(Vec<bool>),
    /// A bit range of a wire, referenced by name within the current module.
    Slice { wire: String, offset: u32, width: u32 },
}

/// An ordered sequence of bit-range chunks forming one signal expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SigSpec {
    pub chunks: Vec<SigChunk>,
}

impl SigSpec {
    /// A single-chunk expression covering the whole of `wire`.
    pub fn whole_wire(wire: impl Into<String>, width: u32) -> Self {
        SigSpec {
            chunks: vec![SigChunk::Slice {
                wire: wire.into(),
                offset: 0,
                width,
            }],
        }
    }

    /// A constant expression, LSB first.
    pub fn constant(bits: Vec<bool>) -> Self {
        SigSpec {
            chunks: vec![SigChunk::Const(bits)],
        }
    }

    /// If this expression is exactly one zero-offset slice of a wire, returns
    /// that wire's name. The slice's width is not checked here (the declared
    /// wire width is module context this type does not carry); use
    /// [`Module::sig_as_whole_wire`] when full-wire coverage matters.
    pub fn as_wire(&self) -> Option<&str> {
        match self.chunks.as_slice() {
            [SigChunk::Slice { wire, offset: 0, .. }] => Some(wire),
            _ => None,
        }
    }

    /// The first wire-backed chunk's name, if any chunk references a wire.
    pub fn first_wire(&self) -> Option<&str> {
        self.chunks.iter().find_map(|chunk| match chunk {
            SigChunk::Slice { wire, .. } => Some(wire.as_str()),
            SigChunk::Const(_) => None,
        })
    }
}

/// An instance of a primitive operation or of another module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,
    /// Primitive tag (e.g. `$mux`) or the name of the instantiated module.
    pub ty: String,
    /// Port name to bound signal. For module instances the port name is the
    /// submodule's port wire name.
    pub connections: BTreeMap<String, SigSpec>,
}

/// A named circuit definition: wires, cells, and direct connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub wires: BTreeMap<String, Wire>,
    pub cells: BTreeMap<String, Cell>,
    /// Direct point-to-point connections; lhs is driven by rhs.
    #[serde(default)]
    pub connections: Vec<(SigSpec, SigSpec)>,
    /// Names of behavioral process blocks that have not been lowered to
    /// cells. Must be empty in every module the tracer explores.
    #[serde(default)]
    pub processes: Vec<String>,
}

impl Module {
    pub fn wire(&self, name: &str) -> Option<&Wire> {
        self.wires.get(name)
    }

    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    /// If `sig` is a single slice covering the whole of one of this module's
    /// declared wires, returns that wire's name. A zero-offset slice narrower
    /// than the declared width is a part-select, not a whole-wire binding.
    pub fn sig_as_whole_wire<'a>(&self, sig: &'a SigSpec) -> Option<&'a str> {
        match sig.chunks.as_slice() {
            [SigChunk::Slice {
                wire,
                offset: 0,
                width,
            }] => {
                let declared = self.wires.get(wire)?;
                if *width == declared.width {
                    Some(wire)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Direction of a cell port as determined by the cell's type signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDir {
    Input,
    Output,
}

/// Port direction for a primitive cell type. Covers the word-level cell
/// library the tracer encounters; unknown primitives fall back to the
/// convention that `Y` and `Q` are outputs and every other port is an input.
pub fn prim_port_dir(ty: &str, port: &str) -> PortDir {
    match ty {
        "$mux" | "$pmux" => match port {
            "Y" => PortDir::Output,
            _ => PortDir::Input,
        },
        "$not" | "$neg" | "$pos" | "$reduce_and" | "$reduce_or" | "$reduce_xor"
        | "$reduce_bool" | "$logic_not" => match port {
            "Y" => PortDir::Output,
            _ => PortDir::Input,
        },
        "$and" | "$or" | "$xor" | "$xnor" | "$add" | "$sub" | "$mul" | "$shl" | "$shr"
        | "$sshl" | "$sshr" | "$eq" | "$ne" | "$lt" | "$le" | "$gt" | "$ge" | "$logic_and"
        | "$logic_or" => match port {
            "Y" => PortDir::Output,
            _ => PortDir::Input,
        },
        "$dff" | "$adff" | "$sdff" | "$dffe" | "$adffe" | "$sdffe" => match port {
            "Q" => PortDir::Output,
            _ => PortDir::Input,
        },
        _ => match port {
            "Y" | "Q" => PortDir::Output,
            _ => PortDir::Input,
        },
    }
}

/// A design: all modules, the top module, and the selection scope the tracer
/// is allowed to traverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub modules: Vec<Module>,
    #[serde(default)]
    pub top: Option<String>,
    /// Selected module names. `None` selects every module. Cells of a
    /// selected module are selected.
    #[serde(default)]
    pub selection: Option<BTreeSet<String>>,
}

impl Design {
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        match &self.selection {
            Some(sel) => sel.contains(name),
            None => true,
        }
    }

    /// Selected modules in declaration order.
    pub fn selected_modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter().filter(|m| self.is_selected(&m.name))
    }

    /// True if `cell` instantiates a module of this design.
    pub fn is_module_instance(&self, cell: &Cell) -> bool {
        self.module(&cell.ty).is_some()
    }

    /// Direction of `port` on `cell`: from the instantiated module's port
    /// wires for module instances, from the primitive signature otherwise.
    /// Module-instance ports that name no port wire in the submodule are
    /// reported as inputs, which keeps them inert for traversal.
    pub fn cell_port_dir(&self, cell: &Cell, port: &str) -> PortDir {
        if let Some(sub) = self.module(&cell.ty) {
            match sub.wire(port) {
                Some(w) if w.port_output => PortDir::Output,
                _ => PortDir::Input,
            }
        } else {
            prim_port_dir(&cell.ty, port)
        }
    }

    pub fn cell_port_is_input(&self, cell: &Cell, port: &str) -> bool {
        self.cell_port_dir(cell, port) == PortDir::Input
    }

    pub fn cell_port_is_output(&self, cell: &Cell, port: &str) -> bool {
        self.cell_port_dir(cell, port) == PortDir::Output
    }
}
