//! Anteater - static analyzer for a strongly-typed, null-safe, class-based
//! source language.
//!
//! Feature-First Hexagonal Architecture:
//! - shared/      : Common models (Span, Symbol, AST visitor surface)
//! - config/      : Run configuration (thresholds, debt costs, rule set)
//! - features/    : Vertical slices (cfg -> ssa -> facts -> datalog,
//!                  abstract_domains -> abstract_interp, complexity ->
//!                  maintainability, style_rules, debt, aggregator,
//!                  diagnostics)
//! - pipeline/    : Per-file and per-project orchestration
//!
//! No process-global mutable state: the only shared value is the immutable
//! `RuleRegistry`, constructed once at run start (see `config`).

#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod shared;

pub mod features {
    pub mod abstract_domains;
    pub mod abstract_interp;
    pub mod aggregator;
    pub mod cfg;
    pub mod complexity;
    pub mod datalog;
    pub mod debt;
    pub mod diagnostics;
    pub mod facts;
    pub mod maintainability;
    pub mod ssa;
    pub mod style_rules;
}

pub use error::{AnteaterError, ErrorKind, Result};
