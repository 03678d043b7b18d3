use super::Document;
use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::{CellRef, evaluate_with_options, expand_ranges, find_references};
use log::{debug, warn};

impl Document {
    /// Store text in a cell verbatim. Empty text clears the cell.
    pub fn set_raw(&mut self, cell_ref: CellRef, text: &str) {
        if text.is_empty() {
            self.cells.remove(&cell_ref);
        } else {
            self.cells.insert(cell_ref, text.to_string());
        }
        self.modified = true;
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, cell_ref: CellRef) {
        if self.cells.remove(&cell_ref).is_some() {
            self.modified = true;
        }
    }

    /// Commit user input to a cell, returning the text the cell now shows.
    ///
    /// Input that starts with `=` once whitespace is stripped is evaluated against
    /// the rest of the sheet and the result replaces the formula. If the
    /// formula names the cell itself it is stored unevaluated and
    /// [`GridcalcError::SelfReference`] is returned. If evaluation fails the
    /// cell keeps its previous text. Any other input is stored as typed.
    pub fn commit(&mut self, cell_ref: CellRef, input: &str) -> Result<String> {
        let text: String = input.chars().filter(|c| !c.is_whitespace()).collect();

        let Some(formula) = text.strip_prefix('=') else {
            self.set_raw(cell_ref, input);
            return Ok(input.to_string());
        };

        if refers_to(formula, cell_ref) {
            warn!("{} refers to itself, storing {:?} unevaluated", cell_ref, text);
            self.set_raw(cell_ref, &text);
            return Err(GridcalcError::SelfReference(cell_ref));
        }

        let result = evaluate_with_options(formula, &self.snapshot(), &self.options)?;
        debug!("{} = {:?}", cell_ref, result);
        self.set_raw(cell_ref, &result);
        Ok(result)
    }

    /// Commit input to a cell named like "A1".
    pub fn commit_named(&mut self, id: &str, input: &str) -> Result<String> {
        let cell_ref = CellRef::from_str(id.trim())
            .ok_or_else(|| GridcalcError::InvalidCell(id.to_string()))?;
        self.commit(cell_ref, input)
    }

    /// Commit every stored formula in row-major order.
    /// Returns the cells that failed along with their errors.
    pub fn commit_all(&mut self) -> Vec<(CellRef, GridcalcError)> {
        let formulas: Vec<(CellRef, String)> = self
            .iter_filled()
            .filter(|(_, text)| text.starts_with('='))
            .map(|(cell_ref, text)| (cell_ref, text.to_string()))
            .collect();

        let mut failures = Vec::new();
        for (cell_ref, formula) in formulas {
            if let Err(e) = self.commit(cell_ref, &formula) {
                failures.push((cell_ref, e));
            }
        }
        failures
    }

    /// Evaluate a formula (leading `=` optional) against the sheet without
    /// storing the result.
    pub fn evaluate(&self, input: &str) -> Result<String> {
        let text: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let formula = text.strip_prefix('=').unwrap_or(&text);
        Ok(evaluate_with_options(formula, &self.snapshot(), &self.options)?)
    }
}

/// Whether a formula names the cell directly or through a range.
fn refers_to(formula: &str, cell_ref: CellRef) -> bool {
    let id = cell_ref.to_string();
    find_references(&expand_ranges(formula)).contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_engine::{EvalError, EvalOptions};

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_commit_literal_keeps_input_as_typed() {
        let mut doc = Document::new();
        assert_eq!(doc.commit(cell("A1"), " 1 2 ").unwrap(), " 1 2 ");
        assert_eq!(doc.get(cell("A1")), " 1 2 ");
        assert!(doc.modified);
    }

    #[test]
    fn test_commit_blank_reference_is_empty() {
        let mut doc = Document::new();
        doc.commit(cell("A1"), "1").unwrap();
        assert_eq!(doc.commit(cell("B1"), "=A5").unwrap(), "");
        assert_eq!(doc.get(cell("B1")), "");
        assert_eq!(doc.commit(cell("B3"), "=A5+A1").unwrap(), "+1");
        assert_eq!(doc.evaluate("sum(A1:A5)").unwrap(), "1");
    }

    #[test]
    fn test_commit_formula_stores_result() {
        let mut doc = Document::new();
        doc.commit(cell("A1"), "5").unwrap();
        doc.commit(cell("B1"), "3").unwrap();
        assert_eq!(doc.commit(cell("C1"), "= A1 + B1").unwrap(), "8");
        assert_eq!(doc.get(cell("C1")), "8");
    }

    #[test]
    fn test_commit_self_reference_is_not_evaluated() {
        let mut doc = Document::new();
        let err = doc.commit(cell("A1"), "=A1+1").unwrap_err();
        assert!(matches!(err, GridcalcError::SelfReference(r) if r == cell("A1")));
        assert_eq!(doc.get(cell("A1")), "=A1+1");

        let err = doc.commit(cell("A2"), "=sum(A1:A3)").unwrap_err();
        assert!(matches!(err, GridcalcError::SelfReference(_)));
    }

    #[test]
    fn test_commit_similar_id_is_not_self_reference() {
        let mut doc = Document::new();
        doc.commit(cell("A10"), "4").unwrap();
        assert_eq!(doc.commit(cell("A1"), "=A10*2").unwrap(), "8");
    }

    #[test]
    fn test_commit_error_keeps_previous_text() {
        let mut doc = Document::new();
        doc.commit(cell("A1"), "7").unwrap();
        let err = doc.commit(cell("A1"), "=average()").unwrap_err();
        assert!(matches!(
            err,
            GridcalcError::Eval(EvalError::EmptyInput { .. })
        ));
        assert_eq!(doc.get(cell("A1")), "7");
    }

    #[test]
    fn test_commit_all_resolves_pending_formulas() {
        let mut doc = Document::new();
        doc.set_raw(cell("A1"), "=B2*2");
        doc.set_raw(cell("B1"), "=sum(A1:A2)");
        doc.set_raw(cell("A2"), "1");
        doc.set_raw(cell("B2"), "=sum(1,2)");

        let failures = doc.commit_all();
        assert!(failures.is_empty());
        assert_eq!(doc.get(cell("A1")), "6");
        assert_eq!(doc.get(cell("B1")), "7");
        assert_eq!(doc.get(cell("B2")), "3");
    }

    #[test]
    fn test_commit_all_reports_failures() {
        let mut doc = Document::with_options(EvalOptions { max_iterations: 8 });
        doc.set_raw(cell("A1"), "=B1");
        doc.set_raw(cell("B1"), "=A1");
        doc.set_raw(cell("C1"), "=nope(1)");

        let failures = doc.commit_all();
        assert_eq!(failures.len(), 3);
        assert!(matches!(
            failures[0].1,
            GridcalcError::Eval(EvalError::CircularReference { iterations: 8 })
        ));
        assert!(matches!(
            failures[2].1,
            GridcalcError::Eval(EvalError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_evaluate_does_not_store() {
        let mut doc = Document::new();
        doc.commit(cell("A1"), "2").unwrap();
        assert_eq!(doc.evaluate("=A1*21").unwrap(), "42");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_commit_named_rejects_bad_id() {
        let mut doc = Document::new();
        assert_eq!(doc.commit_named("b2", "=1+1").unwrap(), "2");
        assert!(matches!(
            doc.commit_named("Z9", "1"),
            Err(GridcalcError::InvalidCell(id)) if id == "Z9"
        ));
    }

    #[test]
    fn test_clear_cell() {
        let mut doc = Document::new();
        doc.commit(cell("A1"), "2").unwrap();
        doc.modified = false;
        doc.clear_cell(cell("A1"));
        assert!(doc.is_empty());
        assert!(doc.modified);
    }
}
