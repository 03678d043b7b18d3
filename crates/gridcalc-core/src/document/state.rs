use gridcalc_engine::engine::{Cell, CellRef, EvalOptions};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// UI-agnostic sheet of `A`-`J` by `1`-`99` cells.
///
/// Cells hold raw text: a literal, an evaluated result, or a formula that
/// starts with `=` and has not been committed yet. Empty cells are not stored.
pub struct Document {
    /// Cell text keyed by position; `CellRef` orders row-major.
    pub(crate) cells: BTreeMap<CellRef, String>,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified
    pub modified: bool,
    /// Settings passed to every evaluation
    pub options: EvalOptions,
}

impl Document {
    /// Create an empty sheet.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_options(EvalOptions::default())
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Document {
            cells: BTreeMap::new(),
            file_path: None,
            modified: false,
            options,
        }
    }

    /// Stored text of a cell ("" when empty).
    pub fn get(&self, cell_ref: CellRef) -> &str {
        self.cells.get(&cell_ref).map(String::as_str).unwrap_or("")
    }

    /// Non-empty cells in row-major order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (CellRef, &str)> {
        self.cells.iter().map(|(cell_ref, text)| (*cell_ref, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Snapshot of the whole grid for the evaluator, empty cells included.
    ///
    /// Formulas that have not been committed yet are passed without their
    /// leading `=`, so they resolve as formula fragments.
    pub fn snapshot(&self) -> Vec<Cell> {
        CellRef::all()
            .map(|cell_ref| {
                let text = self.get(cell_ref);
                Cell::at(cell_ref, text.strip_prefix('=').unwrap_or(text))
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
