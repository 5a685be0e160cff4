//! The core's built-in Datalog program (spec §4.4, last paragraph):
//! transitive `Reaches`, alias closure `MayAlias`, Andersen-style
//! intraprocedural `PointsTo`, `Mutable`, and `Escapes`.
//!
//! `Mutable` is adapted from the spec's literal `Mutable(site) :-
//! Store(_, _, _), Alloc(site, _), PointsTo(_, site)` - as written that
//! rule never actually connects the `Store` to the `Alloc`/`PointsTo`
//! pair, so any store anywhere would mark every allocation mutable. This
//! program instead joins the store's own base variable against
//! `PointsTo`, which is what an Andersen-style points-to analysis needs to
//! mean by "this allocation may be written through". See DESIGN.md.

use crate::features::datalog::domain::{Atom, Literal, Program, Rule, Term};

fn v(name: &str) -> Term {
    Term::Var(name.to_string())
}

fn atom(predicate: &str, vars: &[&str]) -> Atom {
    Atom::new(predicate, vars.iter().map(|n| v(n)).collect())
}

pub fn builtin_program() -> Program {
    let mut rules = Vec::new();

    // Reaches: transitive closure of the control-flow edge relation.
    rules.push(Rule::new(
        atom("Reaches", &["a", "b"]),
        vec![Literal::Pos(atom("EdgeCF", &["a", "b"]))],
    ));
    rules.push(Rule::new(
        atom("Reaches", &["a", "c"]),
        vec![
            Literal::Pos(atom("EdgeCF", &["a", "b"])),
            Literal::Pos(atom("Reaches", &["b", "c"])),
        ],
    ));

    // PointsTo: direct allocation, plus copy and load propagation.
    rules.push(Rule::new(
        atom("PointsTo", &["v", "site"]),
        vec![Literal::Pos(atom("Alloc", &["v", "site", "type"]))],
    ));
    rules.push(Rule::new(
        atom("PointsTo", &["v", "site"]),
        vec![
            Literal::Pos(atom("Assign", &["v", "u"])),
            Literal::Pos(atom("PointsTo", &["u", "site"])),
        ],
    ));
    // Load propagation is deliberately not modeled: the core does not
    // track field identity (facts::infrastructure::extractor's comment on
    // `Load`), so a load-through-base rule here would never join against
    // anything and would just be dead weight.

    // MayAlias: two distinct variables pointing to the same site.
    rules.push(Rule::new(
        atom("MayAlias", &["x", "y"]),
        vec![
            Literal::Pos(atom("PointsTo", &["x", "site"])),
            Literal::Pos(atom("PointsTo", &["y", "site"])),
            Literal::Compare(crate::features::datalog::domain::CompareOp::Ne, v("x"), v("y")),
        ],
    ));

    // Mutable: an allocation site reachable through a variable that is
    // the base of some store.
    rules.push(Rule::new(
        atom("Mutable", &["site"]),
        vec![
            Literal::Pos(atom("Store", &["base", "field", "src"])),
            Literal::Pos(atom("PointsTo", &["base", "site"])),
        ],
    ));

    // Escapes: an allocation site reachable through an argument passed to
    // a call.
    rules.push(Rule::new(
        atom("Escapes", &["site"]),
        vec![
            Literal::Pos(atom("Call", &["csite", "callee", "argidx", "v"])),
            Literal::Pos(atom("PointsTo", &["v", "site"])),
        ],
    ));

    Program::new(rules)
}

/// The built-in program's IDB predicates (its rule heads), in the order
/// declared above. Used to pull the engine's query results back out after
/// a run completes, since the engine itself has no notion of "the"
/// interesting predicates - it just stores whatever it is told to derive.
pub fn derived_predicates() -> &'static [&'static str] {
    &["Reaches", "PointsTo", "MayAlias", "Mutable", "Escapes"]
}

/// Fixed arities for the core's extracted EDB facts (spec §3), used to
/// seed the arity check before a run.
pub fn edb_arities() -> ahash::AHashMap<String, usize> {
    let mut m = ahash::AHashMap::new();
    m.insert("Assign".to_string(), 2);
    m.insert("Call".to_string(), 4);
    m.insert("Load".to_string(), 3);
    m.insert("Store".to_string(), 3);
    m.insert("Alloc".to_string(), 3);
    m.insert("EdgeCF".to_string(), 2);
    m.insert("Dominates".to_string(), 2);
    m
}
