//! Ports: what the Datalog engine needs from its collaborators.

pub use crate::features::facts::domain::FactSet;
