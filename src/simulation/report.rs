//! Output records: per-month report and end-of-session summary

use serde::Serialize;
use std::fmt;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Capital fell to zero or below during `month`
    Bankrupt { month: u32 },
    /// The configured number of months was played out
    Completed,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Bankrupt { month } => write!(f, "bankrupt in month {}", month),
            SessionOutcome::Completed => write!(f, "completed"),
        }
    }
}

/// What one product line did during a month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineActivity {
    pub name: String,
    pub demand: u32,
    pub sold: u32,
    pub income: f64,
    pub claims: u32,
    /// Claims that exceeded the franchise and paid out
    pub paid_claims: u32,
    pub claims_paid: f64,
}

/// Result of one `advance_period` call
///
/// `Display` renders the human-readable log, one line per entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub month: u32,
    pub capital_before: f64,
    pub tax_paid: f64,
    pub capital_after_tax: f64,
    pub lines: Vec<LineActivity>,
    pub capital_after: f64,
    /// Product lines whose policy needs new terms
    pub expiring: Vec<String>,
    /// Set when this month ended the session
    pub outcome: Option<SessionOutcome>,
    pub log: Vec<String>,
}

impl PeriodReport {
    pub(crate) fn new(month: u32, capital_before: f64) -> Self {
        Self {
            month,
            capital_before,
            tax_paid: 0.0,
            capital_after_tax: capital_before,
            lines: Vec::new(),
            capital_after: capital_before,
            expiring: Vec::new(),
            outcome: None,
            log: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: String) {
        self.log.push(line);
    }

    pub fn total_income(&self) -> f64 {
        self.lines.iter().map(|l| l.income).sum()
    }

    pub fn total_claims_paid(&self) -> f64 {
        self.lines.iter().map(|l| l.claims_paid).sum()
    }

    pub fn is_bankrupt(&self) -> bool {
        matches!(self.outcome, Some(SessionOutcome::Bankrupt { .. }))
    }
}

impl fmt::Display for PeriodReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.log {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Lifetime totals of one product line
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineTotals {
    pub name: String,
    pub policies_sold: u64,
    pub income: f64,
    pub claims: u64,
    pub claims_paid: f64,
}

/// End-of-session (or current) standing of a game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub outcome: Option<SessionOutcome>,
    pub months_played: u32,
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_tax: f64,
    pub total_income: f64,
    pub total_claims: f64,
    pub lines: Vec<LineTotals>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Some(outcome) => writeln!(f, "Game over: {}", outcome)?,
            None => writeln!(f, "Game in progress")?,
        }
        writeln!(f, "Months played:   {}", self.months_played)?;
        writeln!(f, "Initial capital: {:.2}", self.initial_capital)?;
        writeln!(f, "Final capital:   {:.2}", self.final_capital)?;
        writeln!(f, "Tax paid:        {:.2}", self.total_tax)?;
        writeln!(f, "Premium income:  {:.2}", self.total_income)?;
        writeln!(f, "Claims paid:     {:.2}", self.total_claims)?;
        for line in &self.lines {
            writeln!(
                f,
                "  {:<8} sold {:>6}  income {:>12.2}  claims {:>4}  paid {:>12.2}",
                line.name, line.policies_sold, line.income, line.claims, line.claims_paid
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display_joins_log() {
        let mut report = PeriodReport::new(1, 100.0);
        report.push("first".to_string());
        report.push("second".to_string());
        assert_eq!(report.to_string(), "first\nsecond\n");
    }

    #[test]
    fn test_totals() {
        let mut report = PeriodReport::new(1, 100.0);
        report.lines.push(LineActivity { income: 10.0, claims_paid: 4.0, ..Default::default() });
        report.lines.push(LineActivity { income: 5.5, claims_paid: 1.0, ..Default::default() });
        assert_eq!(report.total_income(), 15.5);
        assert_eq!(report.total_claims_paid(), 5.0);
        assert!(!report.is_bankrupt());

        report.outcome = Some(SessionOutcome::Bankrupt { month: 1 });
        assert!(report.is_bankrupt());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_string(&SessionOutcome::Bankrupt { month: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"bankrupt","month":4}"#);
        let json = serde_json::to_string(&SessionOutcome::Completed).unwrap();
        assert_eq!(json, r#"{"kind":"completed"}"#);
    }
}
