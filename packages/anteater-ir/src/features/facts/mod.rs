//! C3: Fact Extractor - CFG/SSA -> relational facts (spec §4.3).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::extract_facts;
pub use domain::{Const, Fact, FactSet, Predicate};
