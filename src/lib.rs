//! Insurance Game - monthly simulation engine for a small insurance business
//!
//! This library provides:
//! - Product lines with per-line policy terms and demand
//! - A month-by-month engine (tax, demand, sales, claims, renewal, bankruptcy)
//! - Injectable random sources for seeded or scripted runs
//! - JSON-configurable starting conditions and product catalogue

pub mod error;
pub mod random;
pub mod policy;
pub mod assumptions;
pub mod simulation;

// Re-export commonly used types
pub use error::{GameError, Result};
pub use random::{RandomSource, SeededRandom};
pub use policy::{Policy, PolicyTerms, ProductLine};
pub use assumptions::{GameConfig, ProductLineConfig};
pub use simulation::{EngineState, PeriodReport, SessionOutcome, SessionSummary, SimulationEngine};
