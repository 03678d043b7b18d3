//! Writer for .grd file format

use crate::error::Result;
use gridcalc_engine::engine::CellRef;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Write cells to a .grd file
pub fn write_grd(path: &Path, cells: &BTreeMap<CellRef, String>) -> Result<()> {
    let content = write_grd_content(cells);
    fs::write(path, content)?;
    Ok(())
}

/// Write cells to a .grd format string, row by row
pub fn write_grd_content(cells: &BTreeMap<CellRef, String>) -> String {
    let mut lines = vec!["# Gridcalc Sheet".to_string()];

    for (cell_ref, text) in cells {
        if text.is_empty() {
            continue;
        }
        lines.push(format!("{}: {}", cell_ref, text));
    }

    lines.join("\n") + "\n"
}
