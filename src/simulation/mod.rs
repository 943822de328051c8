//! Month-by-month game simulation

mod state;
mod engine;
mod report;

pub use state::EngineState;
pub use engine::SimulationEngine;
pub use report::{LineActivity, LineTotals, PeriodReport, SessionOutcome, SessionSummary};
