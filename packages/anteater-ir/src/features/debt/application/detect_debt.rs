use crate::config::RunConfig;
use crate::features::debt::domain::DebtSummary;
use crate::features::debt::infrastructure::{detect_ast_debt, scan_lexical_debt, DebtCostCalculator};
use crate::shared::ast::{AstVisitor, NodeId};

/// Runs the lexical comment scan and the AST-pattern detectors over one
/// file, then prices and rolls up the combined findings (spec §4.9).
pub fn detect_debt<V: AstVisitor>(ast: &V, root: NodeId, source: &str, config: &RunConfig) -> DebtSummary {
    let mut items = scan_lexical_debt(source);
    items.extend(detect_ast_debt(ast, root, config.thresholds.god_class_members));
    DebtCostCalculator::new(config).summarize(items)
}
