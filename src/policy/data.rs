//! Policy and product line records

use super::PolicyTerms;
use serde::{Deserialize, Serialize};

/// Terms currently sold on a product line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Name of the product line the policy is sold under
    pub name: String,

    /// Price per month of cover
    pub premium: f64,

    /// Months of cover bought by each sale
    pub duration: u32,

    /// Largest amount a single claim can pay
    pub max_payout: f64,

    /// Deductible: damage at or below this pays nothing
    pub franchise: f64,

    /// Month at which these terms must be renewed
    pub valid_until_month: u32,
}

impl Policy {
    /// Issue a policy at `issue_month`; it stays valid for `terms.duration` months
    pub fn issue(name: impl Into<String>, terms: &PolicyTerms, issue_month: u32) -> Self {
        Self {
            name: name.into(),
            premium: terms.premium,
            duration: terms.duration,
            max_payout: terms.max_payout,
            franchise: terms.franchise,
            valid_until_month: issue_month.saturating_add(terms.duration),
        }
    }

    pub fn terms(&self) -> PolicyTerms {
        PolicyTerms {
            premium: self.premium,
            duration: self.duration,
            max_payout: self.max_payout,
            franchise: self.franchise,
        }
    }

    /// Overwrite the four negotiable fields and restart the validity window
    pub fn renew(&mut self, terms: &PolicyTerms, current_month: u32) {
        self.premium = terms.premium;
        self.duration = terms.duration;
        self.max_payout = terms.max_payout;
        self.franchise = terms.franchise;
        self.valid_until_month = current_month.saturating_add(terms.duration);
    }

    pub fn is_expiring(&self, current_month: u32) -> bool {
        self.valid_until_month <= current_month
    }

    /// Price of one sale relative to the cover it buys
    pub fn price_ratio(&self) -> f64 {
        self.premium * self.duration as f64 / self.max_payout
    }

    /// Revenue from a single sale
    pub fn sale_price(&self) -> f64 {
        self.premium * self.duration as f64
    }

    /// Amount paid for a claim of the given damage
    pub fn claim_payout(&self, damage: f64) -> f64 {
        if damage <= self.franchise {
            0.0
        } else {
            damage.min(self.max_payout)
        }
    }
}

/// One insurance product: its demand, this month's sales and its policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLine {
    pub name: String,

    /// Demand before price adjustment and noise
    pub base_demand: u32,

    /// Demand computed for the current month
    pub current_demand: u32,

    /// Policies sold in the current month
    pub sold_this_period: u32,

    pub policy: Policy,
}

impl ProductLine {
    pub fn new(name: impl Into<String>, base_demand: u32, terms: &PolicyTerms) -> Self {
        let name = name.into();
        Self {
            policy: Policy::issue(name.clone(), terms, 0),
            name,
            base_demand,
            current_demand: 0,
            sold_this_period: 0,
        }
    }

    /// Price sensitivity of demand: cheap cover (low ratio) approaches 1.0,
    /// clamped to `[floor, cap]`
    pub fn demand_multiplier(&self, floor: f64, cap: f64) -> f64 {
        (1.0 / (1.0 + self.policy.price_ratio())).clamp(floor, cap)
    }

    /// Demand for the month before noise, truncated to whole customers
    pub fn expected_demand(&self, floor: f64, cap: f64) -> i64 {
        (self.base_demand as f64 * self.demand_multiplier(floor, cap)) as i64
    }

    /// Premium income from this month's sales
    pub fn income(&self) -> f64 {
        self.sold_this_period as f64 * self.policy.sale_price()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn auto_terms() -> PolicyTerms {
        PolicyTerms {
            premium: 60.0,
            duration: 6,
            max_payout: 4000.0,
            franchise: 500.0,
        }
    }

    #[test]
    fn test_issue_sets_expiry() {
        let policy = Policy::issue("Auto", &auto_terms(), 0);
        assert_eq!(policy.valid_until_month, 6);
        assert!(!policy.is_expiring(5));
        assert!(policy.is_expiring(6));
        assert!(policy.is_expiring(7));
    }

    #[test]
    fn test_renew() {
        let mut policy = Policy::issue("Auto", &auto_terms(), 0);
        let terms = PolicyTerms {
            premium: 20.0,
            duration: 6,
            max_payout: 20000.0,
            franchise: 1500.0,
        };
        policy.renew(&terms, 6);
        assert_eq!(policy.terms(), terms);
        assert_eq!(policy.valid_until_month, 12);
        assert_eq!(policy.name, "Auto");

        // Unvalidated terms cannot wrap the expiry month
        let endless = PolicyTerms { duration: u32::MAX, ..terms };
        policy.renew(&endless, 3);
        assert_eq!(policy.valid_until_month, u32::MAX);
    }

    #[test]
    fn test_claim_payout() {
        let policy = Policy::issue("Auto", &auto_terms(), 0);
        assert_eq!(policy.claim_payout(0.0), 0.0);
        assert_eq!(policy.claim_payout(500.0), 0.0);
        assert_eq!(policy.claim_payout(500.5), 500.5);
        assert_eq!(policy.claim_payout(3999.0), 3999.0);
        assert_eq!(policy.claim_payout(10_000.0), 4000.0);
    }

    #[test]
    fn test_demand_multiplier() {
        let line = ProductLine::new("Auto", 100, &auto_terms());
        // ratio = 360 / 4000 = 0.09
        assert_relative_eq!(line.demand_multiplier(0.5, 2.0), 1.0 / 1.09, epsilon = 1e-12);
        assert_eq!(line.expected_demand(0.5, 2.0), 91);

        // Expensive cover hits the floor
        let pricey = ProductLine::new(
            "Pricey",
            100,
            &PolicyTerms { premium: 1000.0, duration: 12, max_payout: 1000.0, franchise: 0.0 },
        );
        assert_eq!(pricey.demand_multiplier(0.5, 2.0), 0.5);
        assert_eq!(pricey.expected_demand(0.5, 2.0), 50);
    }

    #[test]
    fn test_income() {
        let mut line = ProductLine::new("Auto", 100, &auto_terms());
        assert_eq!(line.income(), 0.0);
        line.sold_this_period = 10;
        assert_relative_eq!(line.income(), 3600.0);
    }
}
