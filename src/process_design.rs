// SPDX-License-Identifier: Apache-2.0

//! Command driver: resolves the starting point of a trace and runs the
//! search.
//!
//! The caller supplies a starting wire name (without the `\` marker) and an
//! optional module-name filter. Resolution walks the selected modules in
//! topological order, applies the filter as a substring match on module
//! names, and requires the wire to exist in exactly one candidate module.

use crate::error::TraceError;
use crate::find_next_mux::{MuxSearch, SearchOutcome};
use crate::hierarchy::HierarchyIndex;
use crate::netlist::io::load_design_from_path;
use crate::netlist::{Design, PUBLIC_PREFIX};
use anyhow::Result;
use std::path::Path;

/// Sentinel reported for both fields when the frontier is exhausted without
/// a terminal match. Not an error.
pub const NOT_FOUND: &str = "NONE";

#[derive(Debug, Clone)]
pub struct Options {
    /// Starting wire name, without the leading identifier marker.
    pub wire: String,
    /// Substring filter narrowing which modules may contain the starting
    /// wire.
    pub module_filter: Option<String>,
}

/// Resolve the starting point in `design` and run the trace. Returns the
/// `(selector wire name, owning module name)` pair, or `(NONE, NONE)` when
/// no genuine controlling multiplexer is reachable.
pub fn process_design(design: &Design, options: &Options) -> Result<(String, String), TraceError> {
    if design.selected_modules().next().is_none() {
        return Err(TraceError::EmptySelection);
    }

    let hierarchy = HierarchyIndex::build(design)?;
    let full_wire = format!("{}{}", PUBLIC_PREFIX, options.wire);

    let mut start_module: Option<&str> = None;
    let mut filter_matched = options.module_filter.is_none();
    for name in &hierarchy.order {
        if let Some(filter) = &options.module_filter {
            if !name.contains(filter.as_str()) {
                continue;
            }
        }
        filter_matched = true;
        let module = match design.module(name) {
            Some(m) => m,
            None => continue,
        };
        if module.wire(&full_wire).is_some() {
            if start_module.is_some() {
                return Err(TraceError::AmbiguousWire {
                    wire: options.wire.clone(),
                });
            }
            start_module = Some(name.as_str());
        }
    }
    if !filter_matched {
        return Err(TraceError::ModuleFilterUnmatched {
            filter: options.module_filter.clone().unwrap_or_default(),
        });
    }
    let start_module = start_module.ok_or_else(|| TraceError::WireNotFound {
        wire: options.wire.clone(),
    })?;
    log::info!("starting trace at {} in module {}", full_wire, start_module);

    let search = MuxSearch::new(design, &hierarchy);
    match search.run(start_module, &full_wire)? {
        SearchOutcome::Found { selector, module } => Ok((selector, module)),
        SearchOutcome::NotFound => Ok((NOT_FOUND.to_string(), NOT_FOUND.to_string())),
    }
}

/// Load a design from `path` and run [`process_design`].
pub fn process_design_path(path: &Path, options: &Options) -> Result<(String, String)> {
    let design = load_design_from_path(path)?;
    Ok(process_design(&design, options)?)
}
