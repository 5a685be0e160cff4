//! Application: the derived-facts use case.

mod derive_facts;

pub use derive_facts::derive_facts;
