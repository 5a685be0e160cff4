//! Infrastructure: the fact extraction pass.

mod extractor;

pub use extractor::FactExtractor;
