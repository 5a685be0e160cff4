//! Validation trait for configuration objects.
//!
//! Mirrors the teacher's `config::validation::Validatable` - code that
//! builds a run depends on this trait, not on `RunConfig` directly, so new
//! configuration sections can be validated the same way.

use super::error::ConfigResult;

pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    fn config_name(&self) -> &'static str {
        "Config"
    }
}
