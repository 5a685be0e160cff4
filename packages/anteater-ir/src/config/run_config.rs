//! The root options record (spec §6).

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::shared::models::Severity;
use ahash::AHashMap as HashMap;
use serde::{Deserialize, Serialize};

/// Metric thresholds driving violation selection (spec §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub cyclomatic_complexity: u32,
    pub cognitive_complexity: u32,
    pub maintainability_index: f64,
    pub lines_of_code: u32,
    pub parameters: u32,
    /// God-object heuristic: a container with more direct members than
    /// this trips the debt detector (spec §4.9).
    pub god_class_members: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cyclomatic_complexity: 20,
            cognitive_complexity: 15,
            maintainability_index: 50.0,
            lines_of_code: 100,
            parameters: 4,
            god_class_members: 20,
        }
    }
}

impl Validatable for Thresholds {
    fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=100.0).contains(&self.maintainability_index) {
            return Err(ConfigError::OutOfRange {
                field: "maintainabilityIndex".into(),
                value: self.maintainability_index.to_string(),
                min: "0".into(),
                max: "100".into(),
            });
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "Thresholds"
    }
}

/// Per-type base cost in hours (spec §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtCosts {
    pub todo: f64,
    pub fixme: f64,
    pub hack: f64,
    pub as_dynamic: f64,
    pub deprecated: f64,
    pub ignore: f64,
    pub empty_catch: f64,
    pub god_class: f64,
}

impl Default for DebtCosts {
    fn default() -> Self {
        Self {
            todo: 4.0,
            fixme: 8.0,
            hack: 8.0,
            as_dynamic: 16.0,
            deprecated: 4.0,
            ignore: 2.0,
            empty_catch: 6.0,
            god_class: 24.0,
        }
    }
}

impl Validatable for DebtCosts {
    fn validate(&self) -> ConfigResult<()> {
        let fields: [(&str, f64); 8] = [
            ("todo", self.todo),
            ("fixme", self.fixme),
            ("hack", self.hack),
            ("asDynamic", self.as_dynamic),
            ("deprecated", self.deprecated),
            ("ignore", self.ignore),
            ("emptyCatch", self.empty_catch),
            ("godClass", self.god_class),
        ];
        for (field, value) in fields {
            if value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    field: field.into(),
                    value: value.to_string(),
                    min: "0".into(),
                    max: "inf".into(),
                });
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "DebtCosts"
    }
}

/// Multipliers applied to `baseCost(type)` (spec §4.9, §6).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityMultipliers {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for SeverityMultipliers {
    fn default() -> Self {
        Self {
            critical: 2.0,
            high: 1.5,
            medium: 1.0,
            low: 0.5,
        }
    }
}

/// Include/exclude sets and per-rule severity overrides (spec §6).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub include: Option<Vec<String>>,
    pub exclude: Vec<String>,
    pub severity_overrides: HashMap<String, Severity>,
}

impl RuleConfig {
    /// Whether a rule id is active under this configuration.
    pub fn is_active(&self, rule_id: &str) -> bool {
        if self.exclude.iter().any(|id| id == rule_id) {
            return false;
        }
        match &self.include {
            Some(included) => included.iter().any(|id| id == rule_id),
            None => true,
        }
    }

    /// The effective severity for a rule, honoring overrides.
    pub fn severity_for<'a>(&self, rule_id: &str, default: Severity) -> Severity {
        self.severity_overrides.get(rule_id).copied().unwrap_or(default)
    }
}

/// The root options record threaded through a single analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub thresholds: Thresholds,
    pub debt_costs: DebtCosts,
    pub severity_multipliers: SeverityMultipliers,
    pub debt_threshold: f64,
    pub debt_unit: String,
    pub rules: RuleConfig,
    pub exclude_globs: Vec<String>,
}

impl RunConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: RunConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: RunConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// `baseCost(type) x multiplier(severity)` (spec §4.9).
    pub fn multiplier_for(&self, severity: crate::features::debt::domain::DebtSeverity) -> f64 {
        use crate::features::debt::domain::DebtSeverity::*;
        match severity {
            Critical => self.severity_multipliers.critical,
            High => self.severity_multipliers.high,
            Medium => self.severity_multipliers.medium,
            Low => self.severity_multipliers.low,
        }
    }
}

impl Validatable for RunConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.thresholds.validate()?;
        self.debt_costs.validate()?;
        for rule_id in self.rules.severity_overrides.keys() {
            if !known_rule_ids().contains(&rule_id.as_str()) {
                return Err(ConfigError::UnknownRule {
                    rule_id: rule_id.clone(),
                });
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "RunConfig"
    }
}

fn known_rule_ids() -> &'static [&'static str] {
    crate::features::style_rules::infrastructure::BUILTIN_RULE_IDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let t = Thresholds::default();
        assert_eq!(t.cyclomatic_complexity, 20);
        assert_eq!(t.cognitive_complexity, 15);
        assert_eq!(t.maintainability_index, 50.0);
        assert_eq!(t.lines_of_code, 100);
        assert_eq!(t.parameters, 4);
    }

    #[test]
    fn rejects_out_of_range_mi_threshold() {
        let t = Thresholds {
            maintainability_index: 150.0,
            ..Default::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn rule_config_respects_include_and_exclude() {
        let mut cfg = RuleConfig::default();
        cfg.include = Some(vec!["avoid-unnecessary-cast".into()]);
        assert!(cfg.is_active("avoid-unnecessary-cast"));
        assert!(!cfg.is_active("binary-expression-order"));

        cfg.exclude.push("avoid-unnecessary-cast".into());
        assert!(!cfg.is_active("avoid-unnecessary-cast"));
    }

    #[test]
    fn debt_example_scenario_6() {
        // spec §8 scenario 6: todo=4, fixme=8, asDynamic=16, all medium (x1.0)
        let costs = DebtCosts {
            todo: 4.0,
            fixme: 8.0,
            as_dynamic: 16.0,
            ..Default::default()
        };
        let total = costs.todo + costs.fixme + costs.as_dynamic;
        assert_eq!(total, 28.0);
    }
}
