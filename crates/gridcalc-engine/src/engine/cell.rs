//! Cell snapshot entries handed to the evaluator.
//!
//! The evaluator never owns or mutates cells. Callers pass a slice of
//! [`Cell`] values describing the whole sheet for one evaluation.

use serde::{Deserialize, Serialize};

use super::cell_ref::CellRef;

/// A cell as seen by the evaluator: its id (e.g. "A1") and raw stored text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: String,
    pub value: String,
}

impl Cell {
    pub fn new(id: &str, value: &str) -> Cell {
        Cell {
            id: id.to_string(),
            value: value.to_string(),
        }
    }

    pub fn at(cell_ref: CellRef, value: &str) -> Cell {
        Cell {
            id: cell_ref.to_string(),
            value: value.to_string(),
        }
    }
}

/// Look up a cell's stored text by id. Letters compare case-insensitively.
pub fn lookup<'a>(cells: &'a [Cell], id: &str) -> Option<&'a str> {
    cells
        .iter()
        .find(|cell| cell.id.eq_ignore_ascii_case(id))
        .map(|cell| cell.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact_and_case_insensitive() {
        let cells = vec![Cell::new("A1", "5"), Cell::new("A10", "7")];
        assert_eq!(lookup(&cells, "a1"), Some("5"));
        assert_eq!(lookup(&cells, "A10"), Some("7"));
        assert_eq!(lookup(&cells, "A2"), None);
    }

    #[test]
    fn test_at_uses_display_id() {
        let cell = Cell::at(CellRef::new(2, 4), "x");
        assert_eq!(cell.id, "C5");
    }
}
