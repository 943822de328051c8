//! Product catalogue: the insurance lines a game starts with

use crate::policy::{PolicyTerms, ProductLine};
use serde::{Deserialize, Serialize};

/// Starting configuration of one product line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLineConfig {
    pub name: String,

    /// Customers per month at a neutral price
    pub base_demand: u32,

    /// Terms in force at month 0; they expire after `terms.duration` months
    pub terms: PolicyTerms,
}

impl ProductLineConfig {
    pub fn new(
        name: &str,
        base_demand: u32,
        premium: f64,
        duration: u32,
        max_payout: f64,
        franchise: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            base_demand,
            terms: PolicyTerms {
                premium,
                duration,
                max_payout,
                franchise,
            },
        }
    }

    pub fn build(&self) -> ProductLine {
        ProductLine::new(self.name.clone(), self.base_demand, &self.terms)
    }
}

/// Default three-line catalogue
///
/// | Line   | Premium | Months | Max payout | Franchise | Base demand |
/// |--------|---------|--------|------------|-----------|-------------|
/// | Auto   | 60      | 6      | 4,000      | 500       | 100         |
/// | Home   | 100     | 12     | 10,000     | 1,000     | 70          |
/// | Health | 45      | 3      | 3,000      | 300       | 150         |
pub fn default_catalogue() -> Vec<ProductLineConfig> {
    vec![
        ProductLineConfig::new("Auto", 100, 60.0, 6, 4_000.0, 500.0),
        ProductLineConfig::new("Home", 70, 100.0, 12, 10_000.0, 1_000.0),
        ProductLineConfig::new("Health", 150, 45.0, 3, 3_000.0, 300.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogue() {
        let catalogue = default_catalogue();
        let names: Vec<&str> = catalogue.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Auto", "Home", "Health"]);
        assert!(catalogue.iter().all(|p| p.terms.validate().is_ok()));
    }

    #[test]
    fn test_build_issues_at_month_zero() {
        let lines: Vec<ProductLine> = default_catalogue().iter().map(|c| c.build()).collect();
        assert_eq!(lines[0].policy.valid_until_month, 6);
        assert_eq!(lines[1].policy.valid_until_month, 12);
        assert_eq!(lines[2].policy.valid_until_month, 3);
        assert!(lines.iter().all(|l| l.current_demand == 0 && l.sold_this_period == 0));
        assert!(lines.iter().all(|l| l.policy.name == l.name));
    }
}
