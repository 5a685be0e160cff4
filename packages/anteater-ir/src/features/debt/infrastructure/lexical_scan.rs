//! Lexical comment scan for `TODO`/`FIXME`/`HACK`/`XXX` markers (spec
//! §4.9). Runs over raw source text rather than the AST - comment text
//! generally isn't a node the core's `AstVisitor` surface exposes, and the
//! marker scan doesn't need structure, only line/column.

use crate::features::debt::domain::{DebtItem, DebtType};
use crate::shared::models::Span;

const MARKERS: &[(&str, DebtType)] = &[
    ("TODO", DebtType::Todo),
    ("FIXME", DebtType::Fixme),
    ("HACK", DebtType::Hack),
    // XXX carries no dedicated cost field in `DebtCosts`; treated as an
    // alias for HACK (spec §6's cost table has no separate entry).
    ("XXX", DebtType::Hack),
];

pub fn scan_lexical_debt(source: &str) -> Vec<DebtItem> {
    let mut items = Vec::new();
    for (line_idx, line) in source.lines().enumerate() {
        let line_no = line_idx as u32 + 1;
        for &(marker, debt_type) in MARKERS {
            let mut search_from = 0usize;
            while let Some(offset) = line[search_from..].find(marker) {
                let start = search_from + offset;
                let end = start + marker.len();
                if is_word_boundary(line, start, end) {
                    items.push(DebtItem {
                        debt_type,
                        severity: debt_type.default_severity(),
                        message: format!("{marker} comment"),
                        span: Span::new(line_no, start as u32, line_no, end as u32),
                        cost: 0.0,
                    });
                }
                search_from = end;
            }
        }
    }
    items
}

fn is_word_boundary(line: &str, start: usize, end: usize) -> bool {
    let before_ok = line[..start].chars().next_back().map(|c| !c.is_alphanumeric()).unwrap_or(true);
    let after_ok = line[end..].chars().next().map(|c| !c.is_alphanumeric()).unwrap_or(true);
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_todo_and_fixme_but_not_substring_matches() {
        let source = "// TODO: fix this\nlet todolist = 1; // FIXME later\n";
        let items = scan_lexical_debt(source);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].debt_type, DebtType::Todo);
        assert_eq!(items[1].debt_type, DebtType::Fixme);
    }

    #[test]
    fn xxx_aliases_to_hack() {
        let items = scan_lexical_debt("// XXX this is gross\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].debt_type, DebtType::Hack);
    }
}
