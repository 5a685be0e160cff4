//! Run configuration (spec §6).
//!
//! A single-tier options record, loaded from YAML or JSON by an external
//! driver (configuration loading is an external collaborator, spec §1) and
//! handed to the pipeline as one immutable `RunConfig`. Grounded in the
//! teacher's `config/` module, minus the preset/patch/provenance machinery
//! that module carries for a much larger pipeline than this core needs.

mod error;
mod run_config;
mod validation;

pub use error::{ConfigError, ConfigResult};
pub use run_config::{DebtCosts, RuleConfig, RunConfig, SeverityMultipliers, Thresholds};
pub use validation::Validatable;
