//! Stratification by negation dependency (spec §4.4 step 1).
//!
//! Predicates are nodes in a dependency graph; a rule `H :- ..., lit(B), ...`
//! contributes an edge `B -> H`, tagged with whether `lit` negates `B`.
//! Strongly-connected components are computed with Tarjan's algorithm; a
//! negated edge inside a single component means the predicate depends
//! negatively on itself (through some cycle), which is `CyclicNegation`.
//! Stratum numbers are the condensation DAG's topological order.

use super::errors::{DatalogProgramError, DatalogResult};
use crate::features::datalog::domain::{Literal, Program};
use ahash::AHashMap as HashMap;

struct Graph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<Vec<(usize, bool)>>, // adjacency: (to, negated)
}

impl Graph {
    fn node(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.edges.push(Vec::new());
        i
    }
}

pub fn stratify(program: &Program) -> DatalogResult<HashMap<String, usize>> {
    let mut graph = Graph {
        names: Vec::new(),
        index: HashMap::new(),
        edges: Vec::new(),
    };

    for rule in &program.rules {
        let head = graph.node(&rule.head.predicate);
        for literal in &rule.body {
            match literal {
                Literal::Pos(atom) => {
                    let from = graph.node(&atom.predicate);
                    graph.edges[from].push((head, false));
                }
                Literal::Neg(atom) => {
                    let from = graph.node(&atom.predicate);
                    graph.edges[from].push((head, true));
                }
                Literal::Compare(..) => {}
            }
        }
    }

    let components = tarjan_scc(&graph);

    for comp in &components {
        let comp_set: ahash::AHashSet<usize> = comp.iter().copied().collect();
        for &node in comp {
            for &(to, negated) in &graph.edges[node] {
                if negated && comp_set.contains(&to) {
                    return Err(DatalogProgramError::CyclicNegation {
                        predicate: graph.names[to].clone(),
                    });
                }
            }
        }
    }

    // Tarjan yields components in reverse topological order: the component
    // at output index `i` gets stratum `num_components - 1 - i`, so a
    // predicate with no incoming dependency edges (e.g. a base fact
    // predicate) lands in stratum 0 and everything that depends on it
    // lands strictly later.
    let num_components = components.len();
    let mut rank = vec![0usize; graph.names.len()];
    for (i, comp) in components.iter().enumerate() {
        for &node in comp {
            rank[node] = num_components - 1 - i;
        }
    }

    let mut result = HashMap::new();
    for (node_idx, name) in graph.names.iter().enumerate() {
        result.insert(name.clone(), rank[node_idx]);
    }
    Ok(result)
}

/// Tarjan's SCC algorithm, returning components in reverse topological
/// order (a component with no outgoing edges to another component comes
/// first).
fn tarjan_scc(graph: &Graph) -> Vec<Vec<usize>> {
    struct State {
        index_counter: usize,
        stack: Vec<usize>,
        on_stack: Vec<bool>,
        indices: Vec<Option<usize>>,
        lowlink: Vec<usize>,
        components: Vec<Vec<usize>>,
    }

    fn strongconnect(v: usize, graph: &Graph, st: &mut State) {
        st.indices[v] = Some(st.index_counter);
        st.lowlink[v] = st.index_counter;
        st.index_counter += 1;
        st.stack.push(v);
        st.on_stack[v] = true;

        for &(w, _) in &graph.edges[v] {
            if st.indices[w].is_none() {
                strongconnect(w, graph, st);
                st.lowlink[v] = st.lowlink[v].min(st.lowlink[w]);
            } else if st.on_stack[w] {
                st.lowlink[v] = st.lowlink[v].min(st.indices[w].unwrap());
            }
        }

        if st.lowlink[v] == st.indices[v].unwrap() {
            let mut component = Vec::new();
            loop {
                let w = st.stack.pop().unwrap();
                st.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            st.components.push(component);
        }
    }

    let n = graph.names.len();
    let mut st = State {
        index_counter: 0,
        stack: Vec::new(),
        on_stack: vec![false; n],
        indices: vec![None; n],
        lowlink: vec![0; n],
        components: Vec::new(),
    };
    for v in 0..n {
        if st.indices[v].is_none() {
            strongconnect(v, graph, &mut st);
        }
    }
    st.components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::datalog::domain::{Atom, Rule, Term};

    fn atom(p: &str) -> Atom {
        Atom::new(p, vec![Term::Var("x".into())])
    }

    #[test]
    fn acyclic_negation_stratifies() {
        let program = Program::new(vec![
            Rule::new(atom("B"), vec![Literal::Pos(atom("A"))]),
            Rule::new(atom("C"), vec![Literal::Neg(atom("B"))]),
        ]);
        let strata = stratify(&program).unwrap();
        assert!(strata["A"] < strata["B"]);
        assert!(strata["B"] < strata["C"]);
    }

    #[test]
    fn self_negation_cycle_is_rejected() {
        let program = Program::new(vec![Rule::new(atom("P"), vec![Literal::Neg(atom("P"))])]);
        assert!(matches!(
            stratify(&program),
            Err(DatalogProgramError::CyclicNegation { .. })
        ));
    }

    #[test]
    fn positive_recursion_is_allowed() {
        let program = Program::new(vec![
            Rule::new(atom("Reaches"), vec![Literal::Pos(atom("EdgeCF"))]),
            Rule::new(
                atom("Reaches"),
                vec![Literal::Pos(atom("EdgeCF")), Literal::Pos(atom("Reaches"))],
            ),
        ]);
        assert!(stratify(&program).is_ok());
    }
}
