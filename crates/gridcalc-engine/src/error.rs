//! Error types for formula evaluation.

use thiserror::Error;

/// Errors raised while evaluating a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Cannot calculate {function} of an empty list")]
    EmptyInput { function: &'static str },

    #[error("Invalid range for {function}: expected 2 arguments, got {len}")]
    InvalidRange { function: &'static str, len: usize },

    #[error("Range for {function} is longer than {limit} values")]
    RangeTooLarge { function: &'static str, limit: usize },

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Circular reference: formula did not settle after {iterations} passes")]
    CircularReference { iterations: usize },
}

pub type Result<T> = std::result::Result<T, EvalError>;
