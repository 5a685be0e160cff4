//! Rule safety and arity checks, run once before evaluation.

use super::errors::{DatalogProgramError, DatalogResult};
use crate::features::datalog::domain::{Literal, Program, Term};
use ahash::{AHashMap as HashMap, AHashSet as HashSet};

/// Every variable in the head, and every variable in a negated or
/// comparison literal, must appear in some positive body literal (spec
/// §4.4's safety check, generalized from "negation only on fully-ground
/// atoms" to the standard Datalog safety condition).
pub fn check_safety(program: &Program) -> DatalogResult<()> {
    for rule in &program.rules {
        let mut bound: HashSet<&str> = HashSet::new();
        for literal in &rule.body {
            if let Literal::Pos(atom) = literal {
                bound.extend(atom.vars());
            }
        }
        for var in rule.head.vars() {
            if !bound.contains(var) {
                return Err(DatalogProgramError::UnsafeRule {
                    predicate: rule.head.predicate.clone(),
                    variable: var.to_string(),
                });
            }
        }
        for literal in &rule.body {
            let (vars, predicate): (Vec<&str>, &str) = match literal {
                Literal::Neg(atom) => (atom.vars().collect(), &atom.predicate),
                Literal::Compare(_, a, b) => {
                    let mut vs = Vec::new();
                    if let Term::Var(v) = a {
                        vs.push(v.as_str());
                    }
                    if let Term::Var(v) = b {
                        vs.push(v.as_str());
                    }
                    (vs, &rule.head.predicate)
                }
                Literal::Pos(_) => continue,
            };
            for var in vars {
                if !bound.contains(var) {
                    return Err(DatalogProgramError::UnsafeRule {
                        predicate: predicate.to_string(),
                        variable: var.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Every occurrence of a predicate (fact or rule atom) must use the same
/// arity; `known` seeds the check with the fixed-arity EDB predicates.
pub fn check_arity(program: &Program, known: &HashMap<String, usize>) -> DatalogResult<()> {
    let mut arities = known.clone();
    let mut record = |predicate: &str, arity: usize, arities: &mut HashMap<String, usize>| {
        match arities.get(predicate) {
            Some(&expected) if expected != arity => Err(DatalogProgramError::ArityMismatch {
                predicate: predicate.to_string(),
                expected,
                got: arity,
            }),
            Some(_) => Ok(()),
            None => {
                arities.insert(predicate.to_string(), arity);
                Ok(())
            }
        }
    };

    for rule in &program.rules {
        record(&rule.head.predicate, rule.head.terms.len(), &mut arities)?;
        for literal in &rule.body {
            match literal {
                Literal::Pos(atom) | Literal::Neg(atom) => {
                    record(&atom.predicate, atom.terms.len(), &mut arities)?;
                }
                Literal::Compare(..) => {}
            }
        }
    }
    Ok(())
}
