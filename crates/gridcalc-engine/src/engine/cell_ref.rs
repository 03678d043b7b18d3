//! Cell reference parsing and formatting.
//!
//! Cells are addressed by a single column letter `A`-`J` followed by a row
//! number `1`-`99` without leading zeros (e.g. "A1", "C12", "J99").
//! Internally both indices are zero-based.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Number of columns in a sheet (`A` through `J`).
pub const MAX_COLS: usize = 10;
/// Number of rows in a sheet.
pub const MAX_ROWS: usize = 99;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Ja-j])(?<number>[1-9][0-9]?)$")
            .expect("cell reference regex must compile")
    })
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "j99").
    /// Returns None if the input is invalid or outside the sheet.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let letter = caps["letter"].to_ascii_uppercase().bytes().next()?;
        let col = (letter - b'A') as usize;
        let row = caps["number"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Convert a column index to its letter (0 -> A, 9 -> J).
    /// Returns None for columns outside the sheet.
    pub fn col_to_letter(col: usize) -> Option<char> {
        if col < MAX_COLS {
            Some((b'A' + col as u8) as char)
        } else {
            None
        }
    }

    /// Every cell of the sheet in row-major order (A1, B1, ..., J1, A2, ...).
    pub fn all() -> impl Iterator<Item = CellRef> {
        (0..MAX_ROWS).flat_map(|row| (0..MAX_COLS).map(move |col| CellRef::new(col, row)))
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = CellRef::col_to_letter(self.col).unwrap_or('?');
        write!(f, "{}{}", letter, self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corners() {
        assert_eq!(CellRef::from_str("A1"), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::from_str("J99"), Some(CellRef::new(9, 98)));
        assert_eq!(CellRef::from_str("c12"), Some(CellRef::new(2, 11)));
    }

    #[test]
    fn test_parse_rejects_outside_sheet() {
        assert!(CellRef::from_str("K1").is_none());
        assert!(CellRef::from_str("A0").is_none());
        assert!(CellRef::from_str("A01").is_none());
        assert!(CellRef::from_str("A100").is_none());
        assert!(CellRef::from_str("AA1").is_none());
        assert!(CellRef::from_str("A 1").is_none());
        assert!(CellRef::from_str("").is_none());
    }

    #[test]
    fn test_display_is_uppercase() {
        let cell: CellRef = "b7".parse().unwrap();
        assert_eq!(cell.to_string(), "B7");
    }

    #[test]
    fn test_all_is_row_major() {
        let cells: Vec<String> = CellRef::all().take(11).map(|c| c.to_string()).collect();
        assert_eq!(cells[0], "A1");
        assert_eq!(cells[9], "J1");
        assert_eq!(cells[10], "A2");
        assert_eq!(CellRef::all().count(), MAX_COLS * MAX_ROWS);
    }
}
