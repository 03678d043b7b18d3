//! Range and cell reference expansion.
//!
//! - **Ranges**: `A1:B2` → `A1,B1,A2,B2` (row by row, columns left to right)
//! - **References**: `A1` → the text stored in cell A1, or nothing if absent
//!
//! Both are single replace-all passes; text substituted for a reference is
//! not expanded again until the next evaluation pass.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::cell::{Cell, lookup};
use crate::builtins::{char_range, int_range};

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([A-J])([1-9][0-9]?):([A-J])([1-9][0-9]?)")
            .expect("range regex must compile")
    })
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[A-J][1-9][0-9]?").expect("cell reference regex must compile")
    })
}

/// Result of substituting cell references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// First reference naming a cell that is not in the snapshot.
    pub missing: Option<String>,
}

/// Rewrite every range token into a comma-separated list of references.
///
/// Rows are taken as written, so `A3:B1` expands to nothing. Letters keep
/// their case; mixed-case spans such as `a1:C1` are empty.
pub fn expand_ranges(text: &str) -> String {
    range_re()
        .replace_all(text, |caps: &Captures| {
            let first_col = first_char(&caps[1]);
            let last_col = first_char(&caps[3]);
            let rows = int_range(parse_row(&caps[2]), parse_row(&caps[4]));
            let letters = char_range(first_col, last_col);

            rows.iter()
                .flat_map(|row| letters.iter().map(move |letter| format!("{}{}", letter, row)))
                .collect::<Vec<_>>()
                .join(",")
        })
        .into_owned()
}

/// Replace every cell reference with the referenced cell's stored text.
pub fn expand_references(text: &str, cells: &[Cell]) -> Expansion {
    let mut missing = None;
    let expanded = reference_re()
        .replace_all(text, |caps: &Captures| {
            let id = caps[0].to_ascii_uppercase();
            match lookup(cells, &id) {
                Some(value) => value.to_string(),
                None => {
                    if missing.is_none() {
                        missing = Some(id);
                    }
                    String::new()
                }
            }
        })
        .into_owned();

    Expansion {
        text: expanded,
        missing,
    }
}

/// First reference-shaped token in the text, if any.
pub fn find_reference(text: &str) -> Option<String> {
    reference_re().find(text).map(|m| m.as_str().to_string())
}

/// Every reference-shaped token in the text, uppercased, in order.
pub fn find_references(text: &str) -> Vec<String> {
    reference_re()
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_uppercase())
        .collect()
}

fn first_char(text: &str) -> char {
    text.chars().next().unwrap_or_default()
}

fn parse_row(text: &str) -> i64 {
    text.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells() -> Vec<Cell> {
        vec![
            Cell::new("A1", "1"),
            Cell::new("B1", "2"),
            Cell::new("A2", "3"),
            Cell::new("B2", "4"),
        ]
    }

    #[test]
    fn test_expand_range_row_major() {
        assert_eq!(expand_ranges("sum(A1:B2)"), "sum(A1,B1,A2,B2)");
        assert_eq!(expand_ranges("A1:A3"), "A1,A2,A3");
    }

    #[test]
    fn test_expand_range_descending_is_empty() {
        assert_eq!(expand_ranges("sum(A3:A1)"), "sum()");
        assert_eq!(expand_ranges("sum(C1:A1)"), "sum()");
    }

    #[test]
    fn test_expand_range_two_digit_rows() {
        assert_eq!(expand_ranges("J98:J99"), "J98,J99");
        assert_eq!(expand_ranges("a9:b10"), "a9,b9,a10,b10");
    }

    #[test]
    fn test_expand_multiple_ranges_in_one_pass() {
        assert_eq!(expand_ranges("A1:A2+B1:B2"), "A1,A2+B1,B2");
    }

    #[test]
    fn test_expand_references_substitutes_values() {
        let expansion = expand_references("A1 + b2", &cells());
        assert_eq!(expansion.text, "1 + 4");
        assert_eq!(expansion.missing, None);
    }

    #[test]
    fn test_expand_references_missing_cell_is_empty() {
        let expansion = expand_references("A1+D1+E1", &cells());
        assert_eq!(expansion.text, "1++");
        assert_eq!(expansion.missing, Some("D1".to_string()));
    }

    #[test]
    fn test_expand_references_is_single_pass() {
        let cells = vec![Cell::new("A1", "B1"), Cell::new("B1", "7")];
        assert_eq!(expand_references("A1", &cells).text, "B1");
    }

    #[test]
    fn test_find_reference() {
        assert_eq!(find_reference("1+c3"), Some("c3".to_string()));
        assert_eq!(find_reference("sum(1,2)"), None);
        assert_eq!(find_references("a1+B2*c10"), vec!["A1", "B2", "C10"]);
    }
}
