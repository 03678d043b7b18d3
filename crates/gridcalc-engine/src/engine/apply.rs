//! Function call application.
//!
//! A call is `name(args)` where `args` is a plain list of numbers and no `(`
//! follows anywhere later in the text. That picks the innermost call of the
//! rightmost nesting, so repeated passes resolve nested calls inside out.

use log::trace;
use regex::Regex;
use std::sync::OnceLock;

use super::arith::{reduce_high_precedence, reduce_low_precedence};
use super::format::format_value;
use crate::builtins::Function;
use crate::error::{EvalError, Result};

/// Regex that matches the last function call in a formula.
///
/// Captures:
/// - group 1: function name (may be empty)
/// - group 2: argument list (e.g. `1, 2.5, -3`)
fn function_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([a-z0-9]*)\(([0-9., \-]*)\)[^(]*$")
            .expect("function call regex must compile")
    })
}

/// Normalize arithmetic, then apply at most one function call.
pub fn apply_functions(text: &str) -> Result<String> {
    let reduced = reduce_low_precedence(&reduce_high_precedence(text));

    let Some(caps) = function_call_re().captures(&reduced) else {
        return Ok(reduced);
    };
    let (Some(name), Some(args)) = (caps.get(1), caps.get(2)) else {
        return Ok(reduced);
    };

    let function = Function::from_name(name.as_str())
        .ok_or_else(|| EvalError::UnknownFunction(name.as_str().to_string()))?;
    let value = function.apply(&parse_arguments(args.as_str()))?;
    let rendered = format_value(&value);
    trace!("{}({}) = {}", name.as_str(), args.as_str(), rendered);

    // `args.end()` sits on the closing paren.
    Ok(format!(
        "{}{}{}",
        &reduced[..name.start()],
        rendered,
        &reduced[args.end() + 1..]
    ))
}

/// Split an argument list on commas. Blank pieces are skipped and pieces
/// that are not numbers become NaN.
fn parse_arguments(args: &str) -> Vec<f64> {
    args.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}
