//! Use case: extract the relational fact set for one function.

use crate::features::cfg::domain::Cfg;
use crate::features::facts::domain::FactSet;
use crate::features::facts::infrastructure::FactExtractor;
use crate::features::ssa::domain::SsaGraph;

pub fn extract_facts(cfg: &Cfg, ssa: &SsaGraph) -> FactSet {
    FactExtractor::new(cfg, ssa).extract()
}
