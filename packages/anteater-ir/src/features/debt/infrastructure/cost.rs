//! `cost = baseCost(type) * multiplier(severity)`; summary roll-ups and
//! hotspot ordering (spec §4.9).

use crate::config::RunConfig;
use crate::features::debt::domain::{DebtItem, DebtSummary, DebtType};
use ahash::AHashMap;

pub struct DebtCostCalculator<'a> {
    config: &'a RunConfig,
}

impl<'a> DebtCostCalculator<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    fn base_cost(&self, debt_type: DebtType) -> f64 {
        let costs = &self.config.debt_costs;
        match debt_type {
            DebtType::Todo => costs.todo,
            DebtType::Fixme => costs.fixme,
            DebtType::Hack => costs.hack,
            DebtType::AsDynamic => costs.as_dynamic,
            DebtType::Deprecated => costs.deprecated,
            DebtType::Ignore => costs.ignore,
            DebtType::EmptyCatch => costs.empty_catch,
            DebtType::GodClass => costs.god_class,
        }
    }

    pub fn price(&self, item: DebtItem) -> DebtItem {
        let cost = self.base_cost(item.debt_type) * self.config.multiplier_for(item.severity);
        DebtItem { cost, ..item }
    }

    /// Prices every item, then rolls up totals, threshold check, and
    /// type/hotspot rankings (cost desc, count desc, name asc - spec §4.9).
    pub fn summarize(&self, items: Vec<DebtItem>) -> DebtSummary {
        let priced: Vec<DebtItem> = items.into_iter().map(|i| self.price(i)).collect();
        let total_cost: f64 = priced.iter().map(|i| i.cost).sum();

        let mut by_type: AHashMap<DebtType, (f64, usize)> = AHashMap::new();
        for item in &priced {
            let entry = by_type.entry(item.debt_type).or_insert((0.0, 0));
            entry.0 += item.cost;
            entry.1 += 1;
        }
        let mut ranked: Vec<(DebtType, f64, usize)> =
            by_type.into_iter().map(|(t, (cost, count))| (t, cost, count)).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.2.cmp(&a.2))
                .then(a.0.as_str().cmp(b.0.as_str()))
        });

        DebtSummary {
            exceeds_threshold: total_cost > self.config.debt_threshold,
            total_cost,
            by_type: ranked,
            items: priced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Span;

    fn item(debt_type: DebtType) -> DebtItem {
        DebtItem {
            debt_type,
            severity: crate::features::debt::domain::DebtSeverity::Medium,
            message: String::new(),
            span: Span::default(),
            cost: 0.0,
        }
    }

    #[test]
    fn example_scenario_totals_28_hours() {
        // spec §8 scenario 6: todo=4, fixme=8, asDynamic=16, all medium (x1.0)
        let config = RunConfig::default();
        let calc = DebtCostCalculator::new(&config);
        let summary = calc.summarize(vec![item(DebtType::Todo), item(DebtType::Fixme), item(DebtType::AsDynamic)]);
        assert_eq!(summary.total_cost, 28.0);
    }

    #[test]
    fn hotspots_sort_by_cost_descending() {
        let config = RunConfig::default();
        let calc = DebtCostCalculator::new(&config);
        let summary = calc.summarize(vec![item(DebtType::Todo), item(DebtType::GodClass)]);
        assert_eq!(summary.by_type[0].0, DebtType::GodClass);
    }
}
