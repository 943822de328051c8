//! Market behaviour: demand response, sales cap and claim frequency

use serde::{Deserialize, Serialize};

/// Tunables of the monthly market model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Hard cap on policies sold per line per month
    #[serde(default = "default_max_sales")]
    pub max_sales_per_line: u32,

    /// Demand noise is uniform in `[-demand_jitter, demand_jitter]`
    #[serde(default = "default_demand_jitter")]
    pub demand_jitter: u32,

    /// Lower clamp of the price multiplier on demand
    #[serde(default = "default_multiplier_floor")]
    pub demand_multiplier_floor: f64,

    /// Upper clamp of the price multiplier on demand
    #[serde(default = "default_multiplier_cap")]
    pub demand_multiplier_cap: f64,

    /// Claims per line per month are uniform in `[min_claims, max_claims]`
    #[serde(default = "default_min_claims")]
    pub min_claims: u32,

    #[serde(default = "default_max_claims")]
    pub max_claims: u32,
}

fn default_max_sales() -> u32 { 1000 }
fn default_demand_jitter() -> u32 { 10 }
fn default_multiplier_floor() -> f64 { 0.5 }
fn default_multiplier_cap() -> f64 { 2.0 }
fn default_min_claims() -> u32 { 1 }
fn default_max_claims() -> u32 { 25 }

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            max_sales_per_line: 1000,
            demand_jitter: 10,
            demand_multiplier_floor: 0.5,
            demand_multiplier_cap: 2.0,
            min_claims: 1,
            max_claims: 25,
        }
    }
}
