//! Identifiers and the `Symbol` table entry (spec §3).
//!
//! Block/instruction/symbol ids are dense `u32` newtypes rather than the
//! teacher's textual `String` ids: spec §3 requires dense integer block ids,
//! and small `Copy` types make the CFG/SSA invariants in spec §8 cheap to
//! state and check.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! dense_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", stringify!($name), self.0)
            }
        }
    };
}

dense_id!(BlockId);
dense_id!(InstructionId);
dense_id!(SymbolId);
dense_id!(ScopeId);

/// Declared type tag, or `Unknown` when the parser/resolver could not
/// determine one. The core never infers types itself (Non-goals, spec §1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    Unknown,
    Named(String),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Unknown => write!(f, "?"),
            TypeTag::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A declared variable/parameter/local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub scope: ScopeId,
    pub declared_type: TypeTag,
}

impl Symbol {
    pub fn new(id: SymbolId, name: impl Into<String>, scope: ScopeId, declared_type: TypeTag) -> Self {
        Self {
            id,
            name: name.into(),
            scope,
            declared_type,
        }
    }
}
