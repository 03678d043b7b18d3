//! Parser for .grd file format

use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::CellRef;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const MAX_SHEET_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Parse a .grd file into cell text keyed by position
pub fn parse_grd(path: &Path) -> Result<BTreeMap<CellRef, String>> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_SHEET_FILE_BYTES {
        return Err(GridcalcError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: sheet file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SHEET_FILE_BYTES
            ),
        )));
    }
    let content = fs::read_to_string(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string
pub fn parse_grd_content(content: &str) -> Result<BTreeMap<CellRef, String>> {
    let mut cells = BTreeMap::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse "CELLREF: TEXT" format; TEXT may itself contain ':'
        let Some((cell_ref_str, text)) = line.split_once(':') else {
            return Err(GridcalcError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: TEXT' format".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let text = text.trim();

        let cell_ref = CellRef::from_str(cell_ref_str).ok_or_else(|| GridcalcError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        if !text.is_empty() {
            cells.insert(cell_ref, text.to_string());
        }
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_parse_literal_and_formula() {
        let cells = parse_grd_content("A1: 42\nC1: =sum(A1:B2)").unwrap();
        assert_eq!(cells[&cell("A1")], "42");
        assert_eq!(cells[&cell("C1")], "=sum(A1:B2)");
    }

    #[test]
    fn test_skip_comments_and_empty_lines() {
        let content = r#"
# This is a comment
A1: 42

# Another comment

B1: 100
C1:
"#;
        let cells = parse_grd_content(content).unwrap();
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn test_missing_separator_reports_line() {
        let err = parse_grd_content("A1: 1\nB1 2").unwrap_err();
        assert!(matches!(err, GridcalcError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_cell_outside_sheet_is_rejected() {
        let err = parse_grd_content("K1: 1").unwrap_err();
        match err {
            GridcalcError::Parse { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("K1"));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }
}
