//! Converts the core's internal finding types to LSP-shaped [`Diagnostic`]s
//! (spec §4.11). Internal positions are 1-based line / 0-based column
//! (spec §4.11, §6); LSP positions are 0-based on both axes.

use crate::features::abstract_interp::{Verdict, VerdictKind};
use crate::features::debt::{DebtItem, DebtSeverity, DebtType};
use crate::features::diagnostics::domain::{Diagnostic, Position, Range, DIAGNOSTIC_SOURCE};
use crate::features::style_rules::Violation;
use crate::shared::models::{Severity, Span};

pub fn to_range(span: Span) -> Range {
    Range {
        start: Position { line: span.start.line.saturating_sub(1), character: span.start.column },
        end: Position { line: span.end.line.saturating_sub(1), character: span.end.column },
    }
}

fn concat_suggestion(message: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("{message}\n{s}"),
        None => message.to_string(),
    }
}

pub fn violation_to_diagnostic(violation: &Violation) -> Diagnostic {
    Diagnostic {
        message: concat_suggestion(&violation.message, violation.suggestion.as_deref()),
        severity: violation.severity,
        range: to_range(violation.span),
        source: DIAGNOSTIC_SOURCE,
        code: violation.rule_id.clone(),
    }
}

fn verdict_severity(verdict: &Verdict) -> Severity {
    if verdict.is_safe {
        Severity::Info
    } else if verdict.is_definite == Some(true) {
        Severity::Error
    } else {
        Severity::Warning
    }
}

fn verdict_code(kind: VerdictKind) -> &'static str {
    match kind {
        VerdictKind::NullDereference => "null-dereference",
        VerdictKind::OutOfBounds => "out-of-bounds",
    }
}

pub fn verdict_to_diagnostic(verdict: &Verdict) -> Diagnostic {
    Diagnostic {
        message: verdict.reason.clone(),
        severity: verdict_severity(verdict),
        range: to_range(verdict.span),
        source: DIAGNOSTIC_SOURCE,
        code: verdict_code(verdict.kind).to_string(),
    }
}

fn debt_severity(severity: DebtSeverity) -> Severity {
    match severity {
        DebtSeverity::Critical => Severity::Error,
        DebtSeverity::High => Severity::Warning,
        DebtSeverity::Medium => Severity::Warning,
        DebtSeverity::Low => Severity::Hint,
    }
}

fn debt_code(debt_type: DebtType) -> String {
    format!("debt/{}", debt_type.as_str())
}

pub fn debt_item_to_diagnostic(item: &DebtItem) -> Diagnostic {
    Diagnostic {
        message: item.message.clone(),
        severity: debt_severity(item.severity),
        range: to_range(item.span),
        source: DIAGNOSTIC_SOURCE,
        code: debt_code(item.debt_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::style_rules::Violation;
    use crate::shared::models::Span;

    #[test]
    fn one_based_line_converts_to_zero_based() {
        let range = to_range(Span::new(1, 0, 1, 5));
        assert_eq!(range.start.line, 0);
        assert_eq!(range.end.line, 0);
    }

    #[test]
    fn suggestion_is_appended_under_a_newline() {
        let violation = Violation::new("no-x", Severity::Warning, "bad thing", Span::zero())
            .with_suggestion("do this instead");
        let diagnostic = violation_to_diagnostic(&violation);
        assert_eq!(diagnostic.message, "bad thing\ndo this instead");
    }

    #[test]
    fn violation_without_suggestion_keeps_bare_message() {
        let violation = Violation::new("no-x", Severity::Warning, "bad thing", Span::zero());
        let diagnostic = violation_to_diagnostic(&violation);
        assert_eq!(diagnostic.message, "bad thing");
    }

    #[test]
    fn definite_null_dereference_is_an_error() {
        let verdict = Verdict {
            kind: VerdictKind::NullDereference,
            is_safe: false,
            is_definite: Some(true),
            reason: "definitely null".into(),
            site: crate::shared::models::InstructionId(0),
            block: crate::shared::models::BlockId(0),
            span: Span::zero(),
        };
        assert_eq!(verdict_to_diagnostic(&verdict).severity, Severity::Error);
    }

    #[test]
    fn potential_null_dereference_is_a_warning() {
        let verdict = Verdict {
            kind: VerdictKind::NullDereference,
            is_safe: false,
            is_definite: Some(false),
            reason: "maybe null".into(),
            site: crate::shared::models::InstructionId(0),
            block: crate::shared::models::BlockId(0),
            span: Span::zero(),
        };
        assert_eq!(verdict_to_diagnostic(&verdict).severity, Severity::Warning);
    }
}
