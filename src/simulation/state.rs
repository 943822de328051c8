//! Mutable state of a running game

use crate::assumptions::GameConfig;
use crate::policy::{Policy, ProductLine};
use serde::Serialize;

/// Capital, calendar and product lines of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineState {
    pub capital: f64,
    pub tax_rate: f64,
    /// Months played so far; 0 before the first advance
    pub current_month: u32,
    pub total_months: u32,
    /// Terminal flag: no advance is possible once set
    pub is_over: bool,
    pub product_lines: Vec<ProductLine>,
}

impl EngineState {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            capital: config.initial_capital,
            tax_rate: config.tax_rate,
            current_month: 0,
            total_months: config.total_months,
            is_over: false,
            product_lines: config.build_product_lines(),
        }
    }

    pub fn is_bankrupt(&self) -> bool {
        self.capital <= 0.0
    }

    pub fn line(&self, name: &str) -> Option<&ProductLine> {
        self.product_lines.iter().find(|l| l.name == name)
    }

    pub(crate) fn line_index(&self, name: &str) -> Option<usize> {
        self.product_lines.iter().position(|l| l.name == name)
    }

    /// Lines whose policy is due for renewal, in catalogue order
    pub fn expiring(&self) -> impl Iterator<Item = &ProductLine> {
        let month = self.current_month;
        self.product_lines.iter().filter(move |l| l.policy.is_expiring(month))
    }

    pub fn first_expiring(&self) -> Option<(&str, &Policy)> {
        self.expiring().next().map(|l| (l.name.as_str(), &l.policy))
    }
}
