//! Application: the fact-extraction use case.

mod extract_facts;

pub use extract_facts::extract_facts;
