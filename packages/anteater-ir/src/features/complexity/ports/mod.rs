pub use crate::shared::ast::AstVisitor;
