//! Cross-cutting models shared by every feature slice.

pub mod ast;
pub mod models;
