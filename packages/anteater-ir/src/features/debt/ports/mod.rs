pub use crate::config::RunConfig;
pub use crate::shared::ast::{AstVisitor, NodeId};
