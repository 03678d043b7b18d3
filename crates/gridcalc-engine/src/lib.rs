//! gridcalc_engine - Spreadsheet formula engine.
//!
//! Formulas are evaluated by rewriting their text until it stops changing:
//! ranges become reference lists, references become stored cell text,
//! function calls become their results and infix arithmetic collapses by
//! precedence.

pub mod builtins;
pub mod engine;
pub mod error;

pub use engine::{Cell, CellRef, EvalOptions, evaluate, evaluate_with_options};
pub use error::{EvalError, Result};

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use crate::error::EvalError;

    fn sheet() -> Vec<Cell> {
        vec![
            Cell::new("A1", "5"),
            Cell::new("B1", "3"),
            Cell::new("C1", "A1 + B1"),
            Cell::new("A2", "1"),
            Cell::new("B2", "2"),
            Cell::new("A3", "3"),
            Cell::new("B3", "4"),
        ]
    }

    #[test]
    fn test_high_precedence_then_full_reduction() {
        let high = reduce_high_precedence("2 + 3 * 4");
        assert_eq!(high, "2 + 12");
        assert_eq!(reduce_all_arithmetic(&high), "14");
    }

    #[test]
    fn test_cell_formula_chain() {
        assert_eq!(evaluate("C1", &sheet()).unwrap(), "8");
        assert_eq!(evaluate("A1", &sheet()).unwrap(), "5");
    }

    #[test]
    fn test_range_expands_before_functions() {
        assert_eq!(expand_ranges("sum(A2:B3)"), "sum(A2,B2,A3,B3)");
        let expanded = expand_references("sum(A2,B2,A3,B3)", &sheet());
        assert_eq!(expanded.text, "sum(1,2,3,4)");
        assert_eq!(apply_functions(&expanded.text).unwrap(), "10");
        assert_eq!(evaluate("sum(A2:B3)", &sheet()).unwrap(), "10");
    }

    #[test]
    fn test_mixed_functions_and_references() {
        assert_eq!(evaluate("average(A2:B3)+C1", &sheet()).unwrap(), "10.5");
        assert_eq!(evaluate("everyeven(increment(A2,A3))", &sheet()).unwrap(), "true");
        assert_eq!(evaluate("firsttwo(nodupes(A2,A2,B2,B3))", &sheet()).unwrap(), "1,2");
    }

    #[test]
    fn test_random_in_formula() {
        for _ in 0..50 {
            let n: f64 = evaluate("random(A2,B3)", &sheet()).unwrap().parse().unwrap();
            assert!((1.0..=4.0).contains(&n));
        }
    }

    #[test]
    fn test_dangling_reference() {
        assert_eq!(
            evaluate("D1", &sheet()),
            Err(EvalError::InvalidReference("D1".to_string()))
        );
    }
}
