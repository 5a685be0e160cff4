//! Semi-naive bottom-up evaluator with stratified negation (spec §4.4).
//!
//! Joins are evaluated literal-by-literal, left to right, extending a list
//! of partial variable bindings; each literal is joined against its source
//! relation through a hash index keyed on the literal's already-bound
//! positions (spec: "joins use hash indexes keyed on the shared variables
//! of consecutive literals; variable binding is left-to-right").
//!
//! Per round, a rule's in-stratum positive literals are evaluated once per
//! distinct predicate using that predicate's delta from the previous round
//! as the source and every other literal against the full relation so far -
//! this is semi-naive evaluation simplified to per-predicate (rather than
//! per-literal-position) delta selection, which is exact as long as no rule
//! references the same recursive predicate twice in one body (true of every
//! rule in this engine's built-in program).

use super::errors::{DatalogProgramError, DatalogResult};
use super::stratify::stratify;
use super::validate::{check_arity, check_safety};
use crate::features::datalog::domain::{CompareOp, Literal, Program, Rule, Term, Tuple};
use crate::features::facts::domain::{Const, Fact, FactSet};
use ahash::{AHashMap as HashMap, AHashSet as HashSet};

pub struct DatalogEngine {
    full: HashMap<String, HashSet<Tuple>>,
}

impl Default for DatalogEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DatalogEngine {
    pub fn new() -> Self {
        Self { full: HashMap::new() }
    }

    pub fn load_facts(&mut self, facts: &FactSet) {
        for Fact { predicate, args } in facts.iter() {
            self.full
                .entry(predicate.as_str().to_string())
                .or_default()
                .insert(args.clone());
        }
    }

    pub fn query(&self, predicate: &str) -> Vec<Tuple> {
        self.full
            .get(predicate)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Runs `program` to fixpoint, stratum by stratum.
    pub fn run(&mut self, program: &Program, edb_arities: &HashMap<String, usize>) -> DatalogResult<()> {
        check_safety(program)?;
        check_arity(program, edb_arities)?;
        let strata = stratify(program)?;

        let mut by_stratum: HashMap<usize, Vec<&Rule>> = HashMap::new();
        for rule in &program.rules {
            let s = strata.get(&rule.head.predicate).copied().unwrap_or(0);
            by_stratum.entry(s).or_default().push(rule);
        }

        let mut ordered_strata: Vec<usize> = by_stratum.keys().copied().collect();
        ordered_strata.sort();

        for stratum in ordered_strata {
            tracing::debug!(stratum, "evaluating datalog stratum");
            self.run_stratum(&by_stratum[&stratum]);
        }
        Ok(())
    }

    fn run_stratum(&mut self, rules: &[&Rule]) {
        let predicates_this_stratum: HashSet<String> =
            rules.iter().map(|r| r.head.predicate.clone()).collect();

        let mut delta: HashMap<String, HashSet<Tuple>> = predicates_this_stratum
            .iter()
            .map(|p| (p.clone(), self.full.get(p).cloned().unwrap_or_default()))
            .collect();

        let mut round = 0usize;
        loop {
            let mut new_delta: HashMap<String, HashSet<Tuple>> = HashMap::new();

            for rule in rules {
                let local_preds: HashSet<String> = rule
                    .body
                    .iter()
                    .filter_map(|l| match l {
                        Literal::Pos(a) if predicates_this_stratum.contains(&a.predicate) => {
                            Some(a.predicate.clone())
                        }
                        _ => None,
                    })
                    .collect();

                if local_preds.is_empty() {
                    if round == 0 {
                        let produced = eval_rule(rule, &self.full, None);
                        insert_new(&mut new_delta, &rule.head.predicate, produced, &self.full);
                    }
                    continue;
                }

                for pred in &local_preds {
                    let empty = HashSet::new();
                    let delta_set = delta.get(pred).unwrap_or(&empty);
                    if delta_set.is_empty() {
                        continue;
                    }
                    let produced = eval_rule(rule, &self.full, Some((pred.as_str(), delta_set)));
                    insert_new(&mut new_delta, &rule.head.predicate, produced, &self.full);
                }
            }

            let mut changed = false;
            for (pred, tuples) in &new_delta {
                if !tuples.is_empty() {
                    changed = true;
                    self.full.entry(pred.clone()).or_default().extend(tuples.iter().cloned());
                }
            }
            for p in &predicates_this_stratum {
                new_delta.entry(p.clone()).or_default();
            }
            delta = new_delta;
            round += 1;
            if !changed {
                break;
            }
        }
    }
}

fn insert_new(
    new_delta: &mut HashMap<String, HashSet<Tuple>>,
    head: &str,
    produced: HashSet<Tuple>,
    full: &HashMap<String, HashSet<Tuple>>,
) {
    let existing = full.get(head);
    let entry = new_delta.entry(head.to_string()).or_default();
    for t in produced {
        if existing.map(|e| !e.contains(&t)).unwrap_or(true) {
            entry.insert(t);
        }
    }
}

fn relation_of<'a>(
    predicate: &str,
    full: &'a HashMap<String, HashSet<Tuple>>,
    over: Option<(&str, &'a HashSet<Tuple>)>,
) -> std::borrow::Cow<'a, HashSet<Tuple>> {
    if let Some((p, set)) = over {
        if p == predicate {
            return std::borrow::Cow::Borrowed(set);
        }
    }
    match full.get(predicate) {
        Some(set) => std::borrow::Cow::Borrowed(set),
        None => std::borrow::Cow::Owned(HashSet::new()),
    }
}

type Binding = HashMap<String, Const>;

fn eval_rule(rule: &Rule, full: &HashMap<String, HashSet<Tuple>>, over: Option<(&str, &HashSet<Tuple>)>) -> HashSet<Tuple> {
    let mut bindings: Vec<Binding> = vec![HashMap::new()];

    for literal in &rule.body {
        if bindings.is_empty() {
            break;
        }
        bindings = match literal {
            Literal::Pos(atom) => {
                let source = relation_of(&atom.predicate, full, over);
                join_positive(&bindings, &atom.terms, &source)
            }
            Literal::Neg(atom) => {
                let source = relation_of(&atom.predicate, full, None);
                bindings
                    .into_iter()
                    .filter(|b| {
                        let tuple = instantiate(&atom.terms, b);
                        match tuple {
                            Some(t) => !source.contains(&t),
                            None => false,
                        }
                    })
                    .collect()
            }
            Literal::Compare(op, a, b) => bindings
                .into_iter()
                .filter(|binding| compare_holds(*op, a, b, binding))
                .collect(),
        };
    }

    bindings
        .into_iter()
        .filter_map(|b| instantiate(&rule.head.terms, &b))
        .collect()
}

fn instantiate(terms: &[Term], binding: &Binding) -> Option<Tuple> {
    terms
        .iter()
        .map(|t| match t {
            Term::Const(c) => Some(c.clone()),
            Term::Var(v) => binding.get(v).cloned(),
        })
        .collect()
}

fn resolve(term: &Term, binding: &Binding) -> Option<Const> {
    match term {
        Term::Const(c) => Some(c.clone()),
        Term::Var(v) => binding.get(v).cloned(),
    }
}

fn compare_holds(op: CompareOp, a: &Term, b: &Term, binding: &Binding) -> bool {
    let (Some(a), Some(b)) = (resolve(a, binding), resolve(b, binding)) else {
        return false;
    };
    match op {
        CompareOp::Eq => a == b,
        CompareOp::Ne => a != b,
        CompareOp::Lt => a < b,
        CompareOp::Le => a <= b,
        CompareOp::Gt => a > b,
        CompareOp::Ge => a >= b,
    }
}

/// Joins `bindings` against `source` through `terms`, indexing `source` by
/// the positions already bound in `bindings` (spec: hash index on shared
/// variables).
fn join_positive(bindings: &[Binding], terms: &[Term], source: &HashSet<Tuple>) -> Vec<Binding> {
    if bindings.is_empty() {
        return Vec::new();
    }
    let template = &bindings[0];
    let key_positions: Vec<usize> = terms
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t, Term::Const(_)) || matches!(t, Term::Var(v) if template.contains_key(v)))
        .map(|(i, _)| i)
        .collect();

    let mut index: HashMap<Vec<Const>, Vec<&Tuple>> = HashMap::new();
    for tuple in source {
        if tuple.len() != terms.len() {
            continue;
        }
        let mut consistent = true;
        for &i in &key_positions {
            if let Term::Const(c) = &terms[i] {
                if &tuple[i] != c {
                    consistent = false;
                    break;
                }
            }
        }
        if !consistent {
            continue;
        }
        let key: Vec<Const> = key_positions.iter().map(|&i| tuple[i].clone()).collect();
        index.entry(key).or_default().push(tuple);
    }

    let mut out = Vec::new();
    for binding in bindings {
        let probe: Vec<Const> = key_positions
            .iter()
            .map(|&i| match &terms[i] {
                Term::Const(c) => c.clone(),
                Term::Var(v) => binding[v].clone(),
            })
            .collect();
        let Some(candidates) = index.get(&probe) else {
            continue;
        };
        for tuple in candidates {
            let mut extended = binding.clone();
            let mut ok = true;
            for (i, term) in terms.iter().enumerate() {
                if let Term::Var(v) = term {
                    if !extended.contains_key(v) {
                        extended.insert(v.clone(), tuple[i].clone());
                    } else if extended[v] != tuple[i] {
                        ok = false;
                        break;
                    }
                }
            }
            if ok {
                out.push(extended);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::datalog::domain::Atom;

    fn var(s: &str) -> Term {
        Term::Var(s.into())
    }

    fn edge(a: i64, b: i64) -> Fact {
        Fact::new(crate::features::facts::domain::Predicate::EdgeCf, vec![Const::Int(a), Const::Int(b)])
    }

    #[test]
    fn transitive_reaches_closes_over_edges() {
        let mut facts = FactSet::default();
        facts.push(edge(1, 2));
        facts.push(edge(2, 3));
        facts.push(edge(3, 4));

        let mut engine = DatalogEngine::new();
        engine.load_facts(&facts);

        let base = Rule::new(
            Atom::new("Reaches", vec![var("a"), var("b")]),
            vec![Literal::Pos(Atom::new("EdgeCF", vec![var("a"), var("b")]))],
        );
        let step = Rule::new(
            Atom::new("Reaches", vec![var("a"), var("c")]),
            vec![
                Literal::Pos(Atom::new("EdgeCF", vec![var("a"), var("b")])),
                Literal::Pos(Atom::new("Reaches", vec![var("b"), var("c")])),
            ],
        );
        let program = Program::new(vec![base, step]);

        let mut arities = HashMap::new();
        arities.insert("EdgeCF".to_string(), 2);
        engine.run(&program, &arities).unwrap();

        let reaches = engine.query("Reaches");
        assert!(reaches.contains(&vec![Const::Int(1), Const::Int(4)]));
        assert_eq!(reaches.len(), 6); // 1->2,1->3,1->4,2->3,2->4,3->4
    }

    #[test]
    fn negation_excludes_already_derived_tuples() {
        let mut facts = FactSet::default();
        facts.push(edge(1, 2));
        facts.push(Fact::new(
            crate::features::facts::domain::Predicate::Mutable,
            vec![Const::Int(2)],
        ));

        let mut engine = DatalogEngine::new();
        engine.load_facts(&facts);

        let rule = Rule::new(
            Atom::new("Immutable", vec![var("b")]),
            vec![
                Literal::Pos(Atom::new("EdgeCF", vec![var("a"), var("b")])),
                Literal::Neg(Atom::new("Mutable", vec![var("b")])),
            ],
        );
        let mut arities = HashMap::new();
        arities.insert("EdgeCF".to_string(), 2);
        arities.insert("Mutable".to_string(), 1);
        engine.run(&Program::new(vec![rule]), &arities).unwrap();

        assert!(engine.query("Immutable").is_empty());
    }
}
