//! AST interface consumed by the core (spec §3, §6).
//!
//! The parser itself is an external collaborator (Non-goal: "the source
//! language parser"); the core only needs a small visitor surface over
//! whatever tree the parser hands it. `NodeId` is opaque to the core - it is
//! whatever the parser's arena uses internally, threaded through unchanged.

use crate::shared::models::Span;

/// Opaque handle into the caller's AST arena.
pub type NodeId = u32;

/// Structural classification of an AST node. The core only branches on
/// these tags; it never inspects language-specific node data beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    FunctionDecl,
    Parameter,
    Block,
    IfStmt,
    WhileStmt,
    ForStmt,
    SwitchStmt,
    CaseArm,
    ReturnStmt,
    ThrowStmt,
    TryStmt,
    CatchClause,
    FinallyClause,
    BreakStmt,
    ContinueStmt,
    ExpressionStmt,
    VarDecl,
    Assignment,
    BinaryExpr,
    LogicalAnd,
    LogicalOr,
    TernaryExpr,
    UnaryExpr,
    CallExpr,
    NewExpr,
    FieldAccess,
    IndexAccess,
    Identifier,
    Literal,
    NullLiteral,
    CastExpr,
    NullCheck,
    /// A decorator/annotation/pragma attached to a declaration or
    /// statement (`@Deprecated`, `@ts-ignore`, ...); `lexeme` carries its
    /// name. Added for the debt detector (spec §4.9), which needs to see
    /// these without the core inferring language-specific syntax for them.
    Annotation,
    Other,
}

/// Minimal read-only visitor surface over a parsed unit.
///
/// Implementations are owned by the external parser/resolver; the core
/// never constructs one, only borrows it for the duration of a single
/// function analysis (spec §5: "CFG builder ... carries no per-function
/// state beyond local scratch").
pub trait AstVisitor {
    fn kind(&self, node: NodeId) -> NodeKind;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn range(&self, node: NodeId) -> Span;
    fn lexeme(&self, node: NodeId) -> Option<&str>;
    fn source_text(&self, range: Span) -> &str;
}
