// SPDX-License-Identifier: Apache-2.0

//! `muxtrace` traces a named signal forward through a hierarchical netlist
//! to the nearest multiplexer whose select input is a genuine decision point
//! (not a reset), reporting the select wire's name and its owning module.

pub mod error;
pub mod find_next_mux;
pub mod hierarchy;
pub mod mux;
pub mod netlist;
pub mod process_design;
pub mod wire_name;
