//! Monthly simulation engine
//!
//! Each call to [`SimulationEngine::advance_period`] plays one month:
//!
//! 1. Tax on capital
//! 2. Bankruptcy check
//! 3. Demand update per line (price multiplier + noise)
//! 4. Sales, capped per line
//! 5. Bankruptcy check
//! 6. Claims per line
//! 7. Bankruptcy check
//! 8. Renewal check (expiring lines are reported, never renewed here)
//! 9. End of session check
//!
//! Renewal is driven from outside: the caller asks
//! [`SimulationEngine::find_expiring_policy`] after each month, collects new
//! terms however it likes, then calls [`SimulationEngine::set_new_policy`].
//! Lines left alone keep selling on their stale terms.

use super::report::{LineActivity, LineTotals, PeriodReport, SessionOutcome, SessionSummary};
use super::state::EngineState;
use crate::assumptions::{GameConfig, MarketAssumptions};
use crate::error::{GameError, Result};
use crate::policy::{Policy, PolicyTerms, ProductLine};
use crate::random::RandomSource;
use chrono::Month;
use log::{debug, info, warn};

/// Single-session game engine, generic over its random source
pub struct SimulationEngine<R: RandomSource> {
    state: EngineState,
    market: MarketAssumptions,
    rng: R,
    initial_capital: f64,
    outcome: Option<SessionOutcome>,
    total_tax: f64,
    line_totals: Vec<LineTotals>,
}

impl<R: RandomSource> SimulationEngine<R> {
    /// Start a session from a configuration
    pub fn new(config: &GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, rng))
    }

    /// Start a session with the default catalogue and market
    pub fn with_defaults(rng: R) -> Self {
        Self::start(&GameConfig::default(), rng)
    }

    fn start(config: &GameConfig, rng: R) -> Self {
        let state = EngineState::from_config(config);
        let line_totals = state
            .product_lines
            .iter()
            .map(|l| LineTotals { name: l.name.clone(), ..Default::default() })
            .collect();

        info!(
            "New session: capital {:.2}, tax {:.1}%, {} months, {} product lines",
            config.initial_capital,
            config.tax_rate * 100.0,
            config.total_months,
            state.product_lines.len()
        );

        Self {
            state,
            market: config.market.clone(),
            rng,
            initial_capital: config.initial_capital,
            outcome: None,
            total_tax: 0.0,
            line_totals,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    pub fn capital(&self) -> f64 {
        self.state.capital
    }

    pub fn current_month(&self) -> u32 {
        self.state.current_month
    }

    pub fn product_lines(&self) -> &[ProductLine] {
        &self.state.product_lines
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Play one month. Returns `None`, touching nothing, once the session is over.
    pub fn advance_period(&mut self) -> Option<PeriodReport> {
        if self.state.is_over {
            return None;
        }

        self.state.current_month += 1;
        let month = self.state.current_month;
        let mut report = PeriodReport::new(month, self.state.capital);
        report.push(format!("=== Month {} ({}) ===", month, month_label(month)));

        self.apply_tax(&mut report);
        if self.check_bankruptcy(&mut report) {
            return Some(self.finish(report));
        }

        self.update_demand(&mut report);
        self.record_sales(&mut report);
        if self.check_bankruptcy(&mut report) {
            return Some(self.finish(report));
        }

        self.process_claims(&mut report);
        if self.check_bankruptcy(&mut report) {
            return Some(self.finish(report));
        }

        self.check_renewals(&mut report);
        self.check_session_end(&mut report);

        Some(self.finish(report))
    }

    /// First product line whose policy has expired, with its current terms
    pub fn find_expiring_policy(&self) -> Option<(&str, &Policy)> {
        self.state.first_expiring()
    }

    /// Names of every product line awaiting renewal
    pub fn expiring_lines(&self) -> Vec<String> {
        self.state.expiring().map(|l| l.name.clone()).collect()
    }

    /// Replace the terms of `name`'s policy; the new terms run from the
    /// current month for `terms.duration` months.
    ///
    /// Fails without touching any line if `name` is unknown or the terms
    /// are invalid.
    pub fn set_new_policy(&mut self, name: &str, terms: PolicyTerms) -> Result<String> {
        let idx = self
            .state
            .line_index(name)
            .ok_or_else(|| GameError::UnknownProduct(name.to_string()))?;
        terms.validate()?;

        let month = self.state.current_month;
        let policy = &mut self.state.product_lines[idx].policy;
        policy.renew(&terms, month);

        info!(
            "Renewed {}: premium {:.2} x {} months, max payout {:.2}, franchise {:.2}, \
             valid until month {}",
            name,
            terms.premium,
            terms.duration,
            terms.max_payout,
            terms.franchise,
            policy.valid_until_month
        );

        Ok(format!(
            "New {} policy: premium {:.2} for {} months, max payout {:.2}, franchise {:.2}. \
             Valid until month {}.",
            name,
            terms.premium,
            terms.duration,
            terms.max_payout,
            terms.franchise,
            policy.valid_until_month
        ))
    }

    /// Parse raw renewal input and apply it. Malformed input leaves the line
    /// on its current terms.
    pub fn renew_from_input(&mut self, name: &str, input: &str) -> Result<String> {
        match PolicyTerms::parse(input) {
            Ok(terms) => self.set_new_policy(name, terms),
            Err(e) => {
                warn!("Renewal of {} rejected, keeping current terms: {}", name, e);
                Err(e)
            }
        }
    }

    /// Multi-line snapshot for display between months
    pub fn status_text(&self) -> String {
        let state = &self.state;
        let mut out = format!(
            "Month {}/{}  Capital: {:.2}  Tax rate: {:.1}%\n",
            state.current_month,
            state.total_months,
            state.capital,
            state.tax_rate * 100.0
        );
        for line in &state.product_lines {
            let p = &line.policy;
            out.push_str(&format!(
                "  {:<8} premium {:>8.2} x {:>2} mo  max payout {:>10.2}  franchise {:>8.2}  \
                 valid until {:>3}  demand {:>5}  sold {:>5}{}\n",
                line.name,
                p.premium,
                p.duration,
                p.max_payout,
                p.franchise,
                p.valid_until_month,
                line.current_demand,
                line.sold_this_period,
                if p.is_expiring(state.current_month) { "  [EXPIRED]" } else { "" }
            ));
        }
        if let Some(outcome) = self.outcome {
            out.push_str(&format!("Game over: {}\n", outcome));
        }
        out
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            outcome: self.outcome,
            months_played: self.state.current_month,
            initial_capital: self.initial_capital,
            final_capital: self.state.capital,
            total_tax: self.total_tax,
            total_income: self.line_totals.iter().map(|t| t.income).sum(),
            total_claims: self.line_totals.iter().map(|t| t.claims_paid).sum(),
            lines: self.line_totals.clone(),
        }
    }

    fn apply_tax(&mut self, report: &mut PeriodReport) {
        let tax = self.state.capital * self.state.tax_rate;
        self.state.capital -= tax;
        self.total_tax += tax;

        report.tax_paid = tax;
        report.capital_after_tax = self.state.capital;
        report.push(format!("Tax paid: {:.2}", tax));
        debug!("Month {}: tax {:.2}, capital {:.2}", report.month, tax, self.state.capital);
    }

    /// Ends the session if capital is exhausted
    fn check_bankruptcy(&mut self, report: &mut PeriodReport) -> bool {
        if !self.state.is_bankrupt() {
            return false;
        }
        let month = self.state.current_month;
        self.state.is_over = true;
        self.outcome = Some(SessionOutcome::Bankrupt { month });
        report.outcome = self.outcome;
        report.push(format!(
            "Bankrupt! Capital fell to {:.2}. The company is closed.",
            self.state.capital
        ));
        info!("Session ended: bankrupt in month {} with capital {:.2}", month, self.state.capital);
        true
    }

    fn update_demand(&mut self, report: &mut PeriodReport) {
        let market = &self.market;
        let jitter = i64::from(market.demand_jitter);
        for line in &mut self.state.product_lines {
            let expected =
                line.expected_demand(market.demand_multiplier_floor, market.demand_multiplier_cap);
            let noise = self.rng.next_int(-jitter, jitter);
            line.current_demand = u32::try_from((expected + noise).max(0)).unwrap_or(u32::MAX);

            report.lines.push(LineActivity {
                name: line.name.clone(),
                demand: line.current_demand,
                ..Default::default()
            });
            report.push(format!("{}: demand {}", line.name, line.current_demand));
            debug!(
                "{}: expected demand {}, noise {}, demand {}",
                line.name, expected, noise, line.current_demand
            );
        }
    }

    fn record_sales(&mut self, report: &mut PeriodReport) {
        let cap = self.market.max_sales_per_line;
        for ((line, activity), totals) in self
            .state
            .product_lines
            .iter_mut()
            .zip(report.lines.iter_mut())
            .zip(self.line_totals.iter_mut())
        {
            line.sold_this_period = line.current_demand.min(cap);
            let income = line.income();
            self.state.capital += income;

            activity.sold = line.sold_this_period;
            activity.income = income;
            totals.policies_sold += u64::from(line.sold_this_period);
            totals.income += income;
        }

        for activity in &report.lines {
            report.log.push(format!(
                "{}: sold {} policies, income {:.2}",
                activity.name, activity.sold, activity.income
            ));
        }
        report.push(format!("Capital after sales: {:.2}", self.state.capital));
    }

    fn process_claims(&mut self, report: &mut PeriodReport) {
        let min_claims = i64::from(self.market.min_claims);
        let max_claims = i64::from(self.market.max_claims);

        for ((line, activity), totals) in self
            .state
            .product_lines
            .iter()
            .zip(report.lines.iter_mut())
            .zip(self.line_totals.iter_mut())
        {
            let policy = &line.policy;
            let count = self.rng.next_int(min_claims, max_claims).max(0) as u32;
            let mut paid_claims = 0u32;
            let mut total = 0.0;

            for _ in 0..count {
                let damage = self.rng.next_float(0.0, 1.0) * policy.max_payout;
                let payout = policy.claim_payout(damage);
                debug_assert!(payout <= policy.max_payout);
                if payout > 0.0 {
                    paid_claims += 1;
                    total += payout;
                }
            }

            self.state.capital -= total;

            activity.claims = count;
            activity.paid_claims = paid_claims;
            activity.claims_paid = total;
            totals.claims += u64::from(count);
            totals.claims_paid += total;
        }

        for activity in &report.lines {
            report.log.push(format!(
                "{}: {} claims, {} above franchise, paid {:.2}",
                activity.name, activity.claims, activity.paid_claims, activity.claims_paid
            ));
        }
        report.push(format!("Capital after claims: {:.2}", self.state.capital));
    }

    fn check_renewals(&mut self, report: &mut PeriodReport) {
        for line in self.state.expiring() {
            report.expiring.push(line.name.clone());
            report.log.push(format!(
                "{} policy expired (valid until month {}): new terms required",
                line.name, line.policy.valid_until_month
            ));
        }
    }

    fn check_session_end(&mut self, report: &mut PeriodReport) {
        if self.state.current_month < self.state.total_months {
            return;
        }
        self.state.is_over = true;
        self.outcome = Some(SessionOutcome::Completed);
        report.outcome = self.outcome;
        report.push(format!(
            "Final month reached. Closing capital: {:.2}",
            self.state.capital
        ));
        info!(
            "Session ended: completed {} months with capital {:.2}",
            self.state.current_month, self.state.capital
        );
    }

    fn finish(&self, mut report: PeriodReport) -> PeriodReport {
        report.capital_after = self.state.capital;
        report
    }
}

/// Calendar name for a game month; month 1 is January, wrapping yearly
fn month_label(month: u32) -> &'static str {
    let index = ((month.max(1) - 1) % 12 + 1) as u8;
    Month::try_from(index).map(|m| m.name()).unwrap_or("?")
}
