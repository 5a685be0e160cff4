//! C4: Datalog Engine - fixpoint evaluator over facts + rules (spec §4.4).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::derive_facts;
pub use domain::{Atom, CompareOp, Literal, Program, Rule, Term, Tuple};
pub use infrastructure::{derived_predicates, DatalogEngine};
