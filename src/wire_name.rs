// SPDX-License-Identifier: Apache-2.0

//! Presentable wire names.
//!
//! Search results often land on synthesizer-generated wires (`$`-prefixed)
//! that are plain aliases of user-named signals. When a direct connection
//! ties the wire to a `\`-prefixed wire, that name is reported instead.

use crate::netlist::{Module, PUBLIC_PREFIX};

/// Resolve a presentable alias for `wire_name` in `module`.
///
/// Scans the module's direct connections for one whose lhs or rhs is exactly
/// this wire; if the other side is a single wire with a user-visible name,
/// returns that name. Otherwise returns `wire_name` unchanged.
pub fn find_better_wirename(module: &Module, wire_name: &str) -> String {
    for (lhs, rhs) in &module.connections {
        if module.sig_as_whole_wire(rhs) == Some(wire_name) {
            if let Some(other) = module.sig_as_whole_wire(lhs) {
                if other.starts_with(PUBLIC_PREFIX) {
                    return other.to_string();
                }
            }
        } else if module.sig_as_whole_wire(lhs) == Some(wire_name) {
            if let Some(other) = module.sig_as_whole_wire(rhs) {
                if other.starts_with(PUBLIC_PREFIX) {
                    return other.to_string();
                }
            }
        }
    }
    wire_name.to_string()
}
