//! Canonical text for evaluated values.

/// Result of a built-in function.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    List(Vec<f64>),
}

/// Format a value for substitution back into formula text.
/// Lists render comma-joined with no spaces.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => items
            .iter()
            .map(|n| format_number(*n))
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Format a number as shortest decimal text (`6`, `2.5`, `-0.1`).
/// Non-finite values become `Infinity`, `-Infinity` or `NaN`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // -0
        "0".to_string()
    } else {
        n.to_string()
    }
}
