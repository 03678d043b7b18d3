//! Infix arithmetic reduction by textual rewriting.
//!
//! The leftmost `<number> <op> <number>` is replaced by its result and the
//! text is scanned again from the start, so operators of equal precedence
//! evaluate left to right. `*` and `/` are fully reduced before `+` and `-`.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::format::format_number;

fn high_precedence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(-?\d+\.?\d*)\s*([*/])\s*(-?\d+\.?\d*)")
            .expect("high precedence regex must compile")
    })
}

fn low_precedence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(-?\d+\.?\d*)\s*([+-])\s*(-?\d+\.?\d*)")
            .expect("low precedence regex must compile")
    })
}

/// Reduce every `*` and `/` between numeric literals.
pub fn reduce_high_precedence(text: &str) -> String {
    reduce_to_fixed_point(text, high_precedence_re(), false)
}

/// Reduce every `+` and `-` between numeric literals.
pub fn reduce_low_precedence(text: &str) -> String {
    reduce_to_fixed_point(text, low_precedence_re(), true)
}

/// Reduce all arithmetic, multiplication and division first.
pub fn reduce_all_arithmetic(text: &str) -> String {
    reduce_low_precedence(&reduce_high_precedence(text))
}

fn reduce_to_fixed_point(text: &str, re: &Regex, guard_right: bool) -> String {
    let mut current = text.to_string();
    while let Some(next) = reduce_leftmost(&current, re, guard_right) {
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn reduce_leftmost(text: &str, re: &Regex, guard_right: bool) -> Option<String> {
    let caps = find_operation(text, re, guard_right)?;
    let whole = caps.get(0)?;
    let lhs = parse_operand(&caps[1]);
    let rhs = parse_operand(&caps[3]);
    let mut replacement = format_number(apply_operator(&caps[2], lhs, rhs));

    // `10-5*-2`: the leading '-' was the binary minus of the outer expression,
    // so the result must keep an explicit sign to stay separated from `10`.
    if whole.as_str().starts_with('-')
        && follows_operand(&text[..whole.start()])
        && !replacement.starts_with('-')
    {
        replacement.insert(0, '+');
    }

    Some(format!(
        "{}{}{}",
        &text[..whole.start()],
        replacement,
        &text[whole.end()..]
    ))
}

/// Leftmost match that stands on its own: its first number is not the tail
/// of a longer number or of a reference such as `B1`, and no tighter
/// operator is waiting on either operand.
fn find_operation<'t>(text: &'t str, re: &Regex, guard_right: bool) -> Option<Captures<'t>> {
    let mut start = 0;
    while let Some(caps) = re.captures_at(text, start) {
        let whole = caps.get(0)?;
        let before = &text[..whole.start()];
        let after = &text[whole.end()..];

        let glued = !whole.as_str().starts_with('-')
            && before
                .chars()
                .last()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.');
        let outranked = before.trim_end().ends_with(['*', '/'])
            || (guard_right && after.trim_start().starts_with(['*', '/']));

        if !glued && !outranked {
            return Some(caps);
        }
        // Matches begin with '-' or an ASCII digit.
        start = whole.start() + 1;
    }
    None
}

fn follows_operand(prefix: &str) -> bool {
    prefix
        .trim_end()
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ')')
}

fn parse_operand(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn apply_operator(op: &str, lhs: f64, rhs: f64) -> f64 {
    match op {
        "*" => lhs * rhs,
        "/" => lhs / rhs,
        "+" => lhs + rhs,
        _ => lhs - rhs,
    }
}
