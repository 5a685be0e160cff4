use crate::features::diagnostics::domain::Diagnostic;
use crate::features::diagnostics::infrastructure::{debt_item_to_diagnostic, verdict_to_diagnostic, violation_to_diagnostic};
use crate::features::diagnostics::ports::FunctionMetrics;

/// Unifies C6 (verdicts), C9 (style violations) and C10 (debt) findings for
/// one function into a single, sorted diagnostic list (spec §4.11). C8's
/// maintainability index has no natural source span of its own, so it is
/// not represented here; callers surface it at the file-report level.
pub fn build_diagnostics(metrics: &FunctionMetrics) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    diagnostics.extend(metrics.violations.iter().map(violation_to_diagnostic));
    diagnostics.extend(metrics.verdicts.iter().filter(|v| !v.is_safe).map(verdict_to_diagnostic));
    diagnostics.extend(metrics.debt.iter().map(debt_item_to_diagnostic));
    diagnostics.sort_by(|a, b| a.range.start.line.cmp(&b.range.start.line).then(a.range.start.character.cmp(&b.range.start.character)));
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::aggregator::FunctionMetrics;

    #[test]
    fn safe_verdicts_are_not_surfaced_as_diagnostics() {
        use crate::features::abstract_interp::{Verdict, VerdictKind};
        use crate::shared::models::{BlockId, InstructionId, Span};

        let metrics = FunctionMetrics {
            function_id: "f".into(),
            cyclomatic: 1,
            cognitive: 1,
            maintainability_index: 100.0,
            lines_of_code: 1,
            violations: Vec::new(),
            verdicts: vec![Verdict {
                kind: VerdictKind::NullDereference,
                is_safe: true,
                is_definite: None,
                reason: "non-null".into(),
                site: InstructionId(0),
                block: BlockId(0),
                span: Span::zero(),
            }],
            debt: Vec::new(),
            derived_facts: Default::default(),
        };
        assert!(build_diagnostics(&metrics).is_empty());
    }
}
