//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::{CellRef, EvalError};

/// Errors that can occur while editing, loading or saving a sheet
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    #[error("Cell {0} refers to itself")]
    SelfReference(CellRef),

    #[error("No file path set")]
    NoFilePath,

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
