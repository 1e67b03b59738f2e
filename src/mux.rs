// SPDX-License-Identifier: Apache-2.0

//! Multiplexer recognition and select-signal classification.
//!
//! The recognized primitive is the word-level `$mux`: data inputs `A` and
//! `B`, select `S`, output `Y`. A select signal is classified as a reset when
//! its wire name contains the fixed token `rstz` (case-sensitive substring
//! match on the raw name). This is purely syntactic; downstream consumers
//! depend on this exact heuristic.

use crate::netlist::Cell;

pub const MUX_TYPE: &str = "$mux";
pub const SELECT_PORT: &str = "S";
pub const OUTPUT_PORT: &str = "Y";

/// Naming token conventionally used for active-low reset signals.
pub const RESET_TOKEN: &str = "rstz";

/// Whether `cell` is a recognized multiplexer primitive.
pub fn is_mux(cell: &Cell) -> bool {
    cell.ty == MUX_TYPE
}

/// Classification of a multiplexer select signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectClass {
    /// A genuine decision point; a valid terminal match for the search.
    Genuine,
    /// A reset signal; the search continues past the mux output.
    Reset,
}

/// Classify the select signal of a mux cell. Returns `None` when the select
/// port is unbound or bound to a pure constant (such a mux can never be a
/// terminal match).
pub fn classify_select(cell: &Cell) -> Option<SelectClass> {
    let select = cell.connections.get(SELECT_PORT)?;
    let wire = select.first_wire()?;
    if wire.contains(RESET_TOKEN) {
        Some(SelectClass::Reset)
    } else {
        Some(SelectClass::Genuine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::SigSpec;
    use std::collections::BTreeMap;
    use test_case::test_case;

    fn mux_with_select(select: &str) -> Cell {
        Cell {
            name: "u_mux".to_string(),
            ty: MUX_TYPE.to_string(),
            connections: BTreeMap::from([
                ("A".to_string(), SigSpec::whole_wire("\\a", 1)),
                ("B".to_string(), SigSpec::whole_wire("\\b", 1)),
                (SELECT_PORT.to_string(), SigSpec::whole_wire(select, 1)),
                (OUTPUT_PORT.to_string(), SigSpec::whole_wire("\\y", 1)),
            ]),
        }
    }

    #[test_case("\\enable", SelectClass::Genuine; "plain user name")]
    #[test_case("\\rstz", SelectClass::Reset; "bare reset token")]
    #[test_case("\\sys_rstz_n", SelectClass::Reset; "token embedded in name")]
    #[test_case("\\RSTZ", SelectClass::Genuine; "match is case sensitive")]
    #[test_case("$auto$sel$1", SelectClass::Genuine; "synthetic select name")]
    fn select_classification(select: &str, expected: SelectClass) {
        let cell = mux_with_select(select);
        assert_eq!(classify_select(&cell), Some(expected));
    }

    #[test]
    fn constant_select_is_unclassifiable() {
        let mut cell = mux_with_select("\\enable");
        cell.connections.insert(
            SELECT_PORT.to_string(),
            SigSpec::constant(vec![true]),
        );
        assert_eq!(classify_select(&cell), None);
    }

    #[test]
    fn non_mux_cells_are_rejected() {
        let mut cell = mux_with_select("\\enable");
        cell.ty = "$and".to_string();
        assert!(!is_mux(&cell));
    }
}
