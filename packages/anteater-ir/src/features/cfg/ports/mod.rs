//! Ports: what the CFG builder needs from its collaborators.

pub use crate::shared::ast::AstVisitor;
