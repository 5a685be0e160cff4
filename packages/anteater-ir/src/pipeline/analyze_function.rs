//! Per-function pipeline: CFG -> SSA -> facts -> Datalog -> abstract
//! interpretation, plus complexity/maintainability/style/debt (spec §4,
//! §7). A failure in any per-function stage aborts only that function:
//! its note is pushed to `skipped` and the caller moves to the next one.

use crate::config::RunConfig;
use crate::features::abstract_interp::{domain::AbstractState, run_abstract_interp};
use crate::features::aggregator::FunctionMetrics;
use crate::features::cfg::build_cfg;
use crate::features::complexity::measure_complexity;
use crate::features::datalog::{derive_facts, derived_predicates};
use crate::features::debt::detect_debt;
use crate::features::facts::extract_facts;
use crate::features::maintainability::compute_mi;
use crate::features::ssa::build_ssa;
use crate::features::style_rules::{run_style_rules, RuleRegistry};
use crate::pipeline::discover::FoundFunction;
use crate::shared::ast::AstVisitor;
use crate::Result;
use std::collections::BTreeMap;

/// One function's worth of analysis, or a reason it could not complete.
pub enum FunctionOutcome {
    Analyzed(FunctionMetrics),
    Skipped { function_id: String, reason: String },
}

pub fn analyze_function<V: AstVisitor>(
    ast: &V,
    function: &FoundFunction,
    registry: &RuleRegistry,
    config: &RunConfig,
) -> FunctionOutcome {
    match try_analyze_function(ast, function, registry, config) {
        Ok(metrics) => FunctionOutcome::Analyzed(metrics),
        Err(e) => FunctionOutcome::Skipped {
            function_id: function.name.clone(),
            reason: e.to_string(),
        },
    }
}

fn try_analyze_function<V: AstVisitor>(
    ast: &V,
    function: &FoundFunction,
    registry: &RuleRegistry,
    config: &RunConfig,
) -> Result<FunctionMetrics> {
    let cfg = build_cfg(ast, function.name.clone(), function.body)?;

    // SSA/facts/Datalog failures are informational only (spec §7): a
    // function whose SSA fails still gets complexity, style and debt
    // findings, just no Datalog-derived relations or verdicts beyond what
    // the CFG-level interpreter can already see.
    let mut derived_facts: BTreeMap<String, Vec<crate::features::datalog::Tuple>> = BTreeMap::new();
    if let Ok(ssa) = build_ssa(&cfg) {
        let facts = extract_facts(&cfg, &ssa);
        if let Ok(engine) = derive_facts(&facts) {
            // Pull the program's IDB predicates back out so C4's result
            // actually reaches C11 (spec.md:30: "All results → C11"),
            // instead of running the fixpoint just to throw it away.
            for predicate in derived_predicates() {
                let mut tuples = engine.query(predicate);
                if tuples.is_empty() {
                    continue;
                }
                tuples.sort();
                derived_facts.insert((*predicate).to_string(), tuples);
            }
        }
    }

    let interp = run_abstract_interp(&cfg, AbstractState::default())?;

    let (complexity, halstead) = measure_complexity(ast, function.body, Some(function.name.as_str()));
    let lines_of_code = ast.range(function.body).line_count();
    let mi = compute_mi(&halstead, complexity.cyclomatic, lines_of_code);

    let violations = run_style_rules(ast, function.body, registry, &config.rules);

    let body_source = ast.source_text(ast.range(function.body));
    let debt = detect_debt(ast, function.body, body_source, config);

    Ok(FunctionMetrics {
        function_id: function.name.clone(),
        cyclomatic: complexity.cyclomatic,
        cognitive: complexity.cognitive,
        maintainability_index: mi.0,
        lines_of_code,
        violations,
        verdicts: interp.verdicts,
        debt: debt.items,
        derived_facts,
    })
}
