//! Style rule violations (spec §4.8).

use crate::shared::models::{Severity, Span};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub suggestion: Option<String>,
}

impl Violation {
    pub fn new(rule_id: impl Into<String>, severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            span,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
