pub use crate::config::RuleConfig;
pub use crate::shared::ast::{AstVisitor, NodeId, NodeKind};
