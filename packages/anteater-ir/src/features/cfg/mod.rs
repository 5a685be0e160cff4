//! C1: CFG Builder - lowers a function AST into a Control-Flow Graph
//! (spec §4.1).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::build_cfg;
pub use domain::{Block, BlockKind, Cfg, Instruction, OperationTag};
pub use infrastructure::{CfgBuildError, CfgBuilder};
