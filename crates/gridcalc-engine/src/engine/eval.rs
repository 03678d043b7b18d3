//! Formula evaluation.
//!
//! One pass runs range expansion, reference expansion, function application
//! and arithmetic reduction over the formula text. Passes repeat until the
//! text stops changing, which is how references to other formula fragments
//! resolve without a dependency graph.

use log::{debug, trace};

use super::apply::apply_functions;
use super::arith::reduce_all_arithmetic;
use super::cell::Cell;
use super::expand::{Expansion, expand_ranges, expand_references, find_reference};
use crate::error::{EvalError, Result};

/// Default number of passes before giving up on a formula.
pub const DEFAULT_MAX_ITERATIONS: usize = 256;

/// Evaluation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    /// Passes allowed before the formula is reported as circular.
    pub max_iterations: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Evaluate a formula (without the leading `=`) against a snapshot of cells.
pub fn evaluate(formula: &str, cells: &[Cell]) -> Result<String> {
    evaluate_with_options(formula, cells, &EvalOptions::default())
}

/// Evaluate a formula with explicit options.
///
/// Fails with [`EvalError::InvalidReference`] when the text settles while
/// still holding a reference, or when it settles to nothing after naming a
/// cell missing from the snapshot. Fails with
/// [`EvalError::CircularReference`] when the pass budget runs out.
pub fn evaluate_with_options(formula: &str, cells: &[Cell], options: &EvalOptions) -> Result<String> {
    let mut current = formula.to_string();
    let mut dangling: Option<String> = None;

    for pass in 1..=options.max_iterations {
        let (next, missing) = evaluate_pass(&current, cells)?;
        trace!("pass {}: {:?} -> {:?}", pass, current, next);
        if dangling.is_none() {
            dangling = missing;
        }

        if next == current {
            if let Some(token) = find_reference(&next) {
                return Err(EvalError::InvalidReference(token));
            }
            if let Some(token) = dangling.filter(|_| next.is_empty()) {
                return Err(EvalError::InvalidReference(token));
            }
            debug!("{:?} = {:?} after {} passes", formula, next, pass);
            return Ok(next);
        }
        current = next;
    }

    Err(EvalError::CircularReference {
        iterations: options.max_iterations,
    })
}

fn evaluate_pass(text: &str, cells: &[Cell]) -> Result<(String, Option<String>)> {
    let ranges = expand_ranges(text);
    let Expansion { text, missing } = expand_references(&ranges, cells);
    let applied = apply_functions(&text)?;
    Ok((reduce_all_arithmetic(&applied), missing))
}
