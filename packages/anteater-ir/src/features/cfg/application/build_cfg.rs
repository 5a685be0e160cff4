//! Use case: build a single function's CFG from its AST body.

use crate::features::cfg::domain::Cfg;
use crate::features::cfg::infrastructure::CfgBuilder;
use crate::shared::ast::{AstVisitor, NodeId};
use crate::{AnteaterError, ErrorKind, Result};

/// Builds the CFG for one function. `function_id` identifies the function
/// for diagnostics and downstream feature reports (spec §4.1, §7); `body`
/// is the root node of the function's statement list.
pub fn build_cfg<V: AstVisitor>(
    ast: &V,
    function_id: impl Into<String>,
    body: NodeId,
) -> Result<Cfg> {
    let function_id = function_id.into();
    CfgBuilder::new(ast, function_id.clone())
        .build(body)
        .map_err(|e| {
            AnteaterError::new(ErrorKind::CfgBuild, e.reason.clone())
                .with_function(function_id)
                .with_source(e)
        })
}
