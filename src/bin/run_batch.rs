//! Play many seeded sessions in parallel without a human at the wheel
//!
//! Outputs one CSV row per session plus summary statistics

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use insurance_game::{GameConfig, SeededRandom, SessionOutcome, SimulationEngine};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// What to do when a policy expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenewStrategy {
    /// Renew with the terms already in force
    Keep,
    /// Never renew; lines keep selling on stale terms
    None,
}

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Monte-Carlo run of the insurance game over many seeds")]
struct Args {
    /// Number of sessions to play
    #[arg(long, default_value_t = 1000)]
    runs: u64,

    /// Seed of the first session; later sessions use consecutive seeds
    #[arg(long, default_value_t = 0)]
    first_seed: u64,

    /// JSON game configuration (built-in defaults if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = RenewStrategy::Keep)]
    renew: RenewStrategy,

    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

/// One CSV row per session
#[derive(Debug, Clone, Serialize)]
struct BatchRow {
    seed: u64,
    outcome: String,
    months_played: u32,
    final_capital: f64,
    total_income: f64,
    total_claims: f64,
    total_tax: f64,
}

fn play_session(
    config: &GameConfig,
    seed: u64,
    renew: RenewStrategy,
) -> insurance_game::Result<BatchRow> {
    let mut engine = SimulationEngine::new(config, SeededRandom::new(seed))?;

    while engine.advance_period().is_some() {
        if renew == RenewStrategy::Keep && !engine.is_over() {
            for name in engine.expiring_lines() {
                let terms = engine.state().line(&name).map(|l| l.policy.terms());
                if let Some(terms) = terms {
                    engine.set_new_policy(&name, terms)?;
                }
            }
        }
    }

    let summary = engine.summary();
    let outcome = match summary.outcome {
        Some(SessionOutcome::Bankrupt { .. }) => "bankrupt",
        Some(SessionOutcome::Completed) => "completed",
        None => "unfinished",
    };
    Ok(BatchRow {
        seed,
        outcome: outcome.to_string(),
        months_played: summary.months_played,
        final_capital: summary.final_capital,
        total_income: summary.total_income,
        total_claims: summary.total_claims,
        total_tax: summary.total_tax,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.validate().context("Invalid game configuration")?;

    println!(
        "Playing {} sessions (seeds {}..{}), renew strategy {:?}...",
        args.runs,
        args.first_seed,
        args.first_seed.saturating_add(args.runs),
        args.renew
    );

    let rows: Vec<BatchRow> = (args.first_seed..args.first_seed.saturating_add(args.runs))
        .into_par_iter()
        .map(|seed| play_session(&config, seed, args.renew))
        .collect::<insurance_game::Result<_>>()
        .context("Session failed")?;

    println!("Sessions complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Output written to {}", args.output.display());

    if rows.is_empty() {
        return Ok(());
    }

    let bankrupt = rows.iter().filter(|r| r.outcome == "bankrupt").count();
    let capitals: Vec<f64> = rows.iter().map(|r| r.final_capital).collect();
    let mean = capitals.iter().sum::<f64>() / capitals.len() as f64;
    let min = capitals.iter().copied().fold(f64::INFINITY, f64::min);
    let max = capitals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    println!("\nBatch Summary:");
    println!(
        "  Bankrupt:      {} of {} ({:.1}%)",
        bankrupt,
        rows.len(),
        100.0 * bankrupt as f64 / rows.len() as f64
    );
    println!("  Final capital: mean {:.0}, min {:.0}, max {:.0}", mean, min, max);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
