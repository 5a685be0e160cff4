//! CFG construction errors (spec §4.1, §7).
//!
//! A `CfgBuildError` aborts only the function being lowered; the aggregator
//! records the function as skipped and continues with the rest of the file.

use crate::shared::ast::NodeId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("CFG construction failed at node {node}: {reason}")]
pub struct CfgBuildError {
    pub node: NodeId,
    pub reason: String,
}

impl CfgBuildError {
    pub fn new(node: NodeId, reason: impl Into<String>) -> Self {
        Self {
            node,
            reason: reason.into(),
        }
    }
}

pub type CfgResult<T> = std::result::Result<T, CfgBuildError>;
