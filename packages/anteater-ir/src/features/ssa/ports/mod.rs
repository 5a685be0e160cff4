//! Ports: what the SSA builder needs from its collaborators.

pub use crate::features::cfg::domain::Cfg;
