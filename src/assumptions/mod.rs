//! Starting conditions of a game: capital, tax, horizon, market and products
//!
//! Everything here can be loaded from JSON. Missing fields fall back to the
//! built-in defaults, so `{}` is a valid configuration.

pub mod market;
pub mod product;

pub use market::MarketAssumptions;
pub use product::{default_catalogue, ProductLineConfig};

use crate::error::{GameError, Result};
use crate::policy::ProductLine;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Capital at month 0 (default: 30,000)
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    /// Share of capital taken as tax at the start of each month (default: 9%)
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Months in a session (default: 12)
    #[serde(default = "default_total_months")]
    pub total_months: u32,

    #[serde(default)]
    pub market: MarketAssumptions,

    #[serde(default = "default_catalogue")]
    pub product_lines: Vec<ProductLineConfig>,
}

/// Upper bound on a line's base demand; keeps demand after the price
/// multiplier within `u32`
pub const MAX_BASE_DEMAND: u32 = 1_000_000;

fn default_initial_capital() -> f64 { 30_000.0 }
fn default_tax_rate() -> f64 { 0.09 }
fn default_total_months() -> u32 { 12 }

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_capital: 30_000.0,
            tax_rate: 0.09,
            total_months: 12,
            market: MarketAssumptions::default(),
            product_lines: default_catalogue(),
        }
    }
}

impl GameConfig {
    /// Load and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(invalid(format!(
                "initial capital must be positive, got {}",
                self.initial_capital
            )));
        }
        if !(0.0..1.0).contains(&self.tax_rate) {
            return Err(invalid(format!("tax rate must be in [0, 1), got {}", self.tax_rate)));
        }
        if self.total_months == 0 {
            return Err(invalid("total months must be at least 1".to_string()));
        }

        let market = &self.market;
        if market.min_claims > market.max_claims {
            return Err(invalid(format!(
                "min claims {} exceeds max claims {}",
                market.min_claims, market.max_claims
            )));
        }
        if !(market.demand_multiplier_floor > 0.0
            && market.demand_multiplier_floor <= market.demand_multiplier_cap)
        {
            return Err(invalid(format!(
                "demand multiplier bounds [{}, {}] are not a valid range",
                market.demand_multiplier_floor, market.demand_multiplier_cap
            )));
        }

        if self.product_lines.is_empty() {
            return Err(invalid("at least one product line is required".to_string()));
        }
        let mut seen = HashSet::new();
        for line in &self.product_lines {
            if line.name.trim().is_empty() {
                return Err(invalid("product line names cannot be empty".to_string()));
            }
            if line.base_demand > MAX_BASE_DEMAND {
                return Err(invalid(format!(
                    "product line '{}': base demand {} exceeds {}",
                    line.name, line.base_demand, MAX_BASE_DEMAND
                )));
            }
            if !seen.insert(line.name.as_str()) {
                return Err(invalid(format!("duplicate product line '{}'", line.name)));
            }
            line.terms
                .validate()
                .map_err(|e| invalid(format!("product line '{}': {}", line.name, e)))?;
        }

        Ok(())
    }

    /// Fresh product lines for a new session
    pub fn build_product_lines(&self) -> Vec<ProductLine> {
        self.product_lines.iter().map(ProductLineConfig::build).collect()
    }
}

fn invalid(msg: String) -> GameError {
    GameError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_capital, 30_000.0);
        assert_eq!(config.tax_rate, 0.09);
        assert_eq!(config.total_months, 12);
        assert_eq!(config.product_lines.len(), 3);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "initial_capital": 50000,
            "market": { "max_claims": 10 },
            "product_lines": [
                { "name": "Travel", "base_demand": 40,
                  "terms": { "premium": 15, "duration": 1, "max_payout": 2000, "franchise": 100 } }
            ]
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.initial_capital, 50_000.0);
        assert_eq!(config.tax_rate, 0.09);
        assert_eq!(config.market.max_claims, 10);
        assert_eq!(config.market.min_claims, 1);
        assert_eq!(config.market.max_sales_per_line, 1000);

        let lines = config.build_product_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Travel");
        assert_eq!(lines[0].policy.valid_until_month, 1);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            r#"{ "initial_capital": 0 }"#,
            r#"{ "tax_rate": 1.0 }"#,
            r#"{ "tax_rate": -0.1 }"#,
            r#"{ "total_months": 0 }"#,
            r#"{ "market": { "min_claims": 5, "max_claims": 2 } }"#,
            r#"{ "market": { "demand_multiplier_floor": 3.0 } }"#,
            r#"{ "product_lines": [] }"#,
        ];
        for json in cases {
            let err = GameConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, GameError::InvalidConfig(_)), "{}", json);
        }
    }

    #[test]
    fn test_rejects_duplicate_and_invalid_lines() {
        let mut config = GameConfig::default();
        config.product_lines.push(config.product_lines[0].clone());
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let mut config = GameConfig::default();
        config.product_lines[1].terms.franchise = 1e9;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_oversized_base_demand() {
        let mut config = GameConfig::default();
        config.product_lines[0].base_demand = MAX_BASE_DEMAND;
        assert!(config.validate().is_ok());

        config.product_lines[0].base_demand = u32::MAX;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_json_file("/nonexistent/insurance_game.json").unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }
}
