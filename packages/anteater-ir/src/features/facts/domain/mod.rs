//! Relational fact schema (spec §3).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fact constant: the schema mixes symbol/block/site identifiers with
/// small integers and plain strings, so constants stay a closed sum type
/// rather than dynamically typed values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Const {
    Sym(u32),
    Block(u32),
    Site(u32),
    Int(i64),
    Str(String),
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Const::Sym(v) => write!(f, "s{v}"),
            Const::Block(v) => write!(f, "b{v}"),
            Const::Site(v) => write!(f, "i{v}"),
            Const::Int(v) => write!(f, "{v}"),
            Const::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

/// The fixed predicate vocabulary the core emits and reasons over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Predicate {
    Assign,
    Call,
    Load,
    Store,
    Alloc,
    EdgeCf,
    Dominates,
    MayAlias,
    PointsTo,
    Mutable,
    Escapes,
    Reaches,
}

impl Predicate {
    pub fn as_str(self) -> &'static str {
        match self {
            Predicate::Assign => "Assign",
            Predicate::Call => "Call",
            Predicate::Load => "Load",
            Predicate::Store => "Store",
            Predicate::Alloc => "Alloc",
            Predicate::EdgeCf => "EdgeCF",
            Predicate::Dominates => "Dominates",
            Predicate::MayAlias => "MayAlias",
            Predicate::PointsTo => "PointsTo",
            Predicate::Mutable => "Mutable",
            Predicate::Escapes => "Escapes",
            Predicate::Reaches => "Reaches",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ground fact: a predicate symbol applied to a tuple of constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub predicate: Predicate,
    pub args: Vec<Const>,
}

impl Fact {
    pub fn new(predicate: Predicate, args: Vec<Const>) -> Self {
        Self { predicate, args }
    }
}

/// The facts extracted from one function (spec §3: "multiset (duplicates
/// preserved but semantically a set)" - callers that need set semantics
/// dedupe at the Datalog boundary; the extractor preserves emission order
/// for determinism).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactSet {
    pub facts: Vec<Fact>,
}

impl FactSet {
    pub fn push(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    pub fn by_predicate(&self, predicate: Predicate) -> impl Iterator<Item = &Fact> {
        self.facts.iter().filter(move |f| f.predicate == predicate)
    }
}
