//! Spreadsheet engine API.
//!
//! This module provides the formula evaluator and its building blocks:
//!
//! - [`Cell`], [`CellRef`] - Cell snapshots and typed cell references
//! - [`reduce_all_arithmetic`] - Infix arithmetic rewriting by precedence
//! - [`apply_functions`] - Built-in function call application
//! - [`expand_ranges`], [`expand_references`] - Range and reference expansion
//! - [`evaluate`] - Rewrite a formula until it settles
//! - [`format_number`], [`format_value`] - Canonical value text

mod apply;
mod arith;
mod cell;
mod cell_ref;
mod eval;
mod expand;
mod format;

pub use apply::apply_functions;
pub use arith::{reduce_all_arithmetic, reduce_high_precedence, reduce_low_precedence};
pub use cell::{Cell, lookup};
pub use cell_ref::{CellRef, MAX_COLS, MAX_ROWS};
pub use eval::{DEFAULT_MAX_ITERATIONS, EvalOptions, evaluate, evaluate_with_options};
pub use expand::{Expansion, expand_ranges, expand_references, find_reference, find_references};
pub use format::{Value, format_number, format_value};
