// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the tracer.
//!
//! Precondition violations and ambiguous inputs abort the whole operation;
//! everything else (a not-found search outcome, a converging frontier path)
//! is handled locally and never surfaces as an error.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The module instantiation hierarchy contains a cycle.
    RecursiveModules,
    /// A module reached by the search still contains behavioral process
    /// blocks; the search requires them to have been lowered beforehand.
    UnresolvedProcesses { module: String },
    /// No module is selected.
    EmptySelection,
    /// The starting wire resolves in more than one candidate module and no
    /// module filter narrows the choice.
    AmbiguousWire { wire: String },
    /// The starting wire does not exist in any selected module.
    WireNotFound { wire: String },
    /// The module-name filter matched no module.
    ModuleFilterUnmatched { filter: String },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::RecursiveModules => {
                write!(f, "recursive modules are not supported")
            }
            TraceError::UnresolvedProcesses { module } => write!(
                f,
                "module {} contains unresolved processes; run a proc lowering pass first",
                module
            ),
            TraceError::EmptySelection => {
                write!(f, "cannot operate on an empty module selection")
            }
            TraceError::AmbiguousWire { wire } => write!(
                f,
                "the wire {} is present in more than one module; use a module filter",
                wire
            ),
            TraceError::WireNotFound { wire } => {
                write!(f, "the wire {} does not exist in any selected module", wire)
            }
            TraceError::ModuleFilterUnmatched { filter } => {
                write!(f, "the module filter {} matches no module", filter)
            }
        }
    }
}

impl std::error::Error for TraceError {}
