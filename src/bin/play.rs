//! Interactive terminal front-end for the insurance game
//!
//! Plays one session month by month, printing each month's log and asking
//! for new terms whenever a policy expires.

use anyhow::{Context, Result};
use clap::Parser;
use insurance_game::{GameConfig, RandomSource, SeededRandom, SimulationEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "play", about = "Run an insurance company one month at a time")]
struct Args {
    /// Seed for the random source (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game configuration (built-in defaults if omitted)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    let rng = match args.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    log::info!("Using seed {}", rng.seed());
    println!("Insurance company simulator (seed {})", rng.seed());

    let mut engine = SimulationEngine::new(&config, rng).context("Invalid game configuration")?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("{}", engine.status_text());

    while !engine.is_over() {
        let command = prompt(&mut input, "[Enter/n] next month, [s] status, [q] quit > ")?;
        let Some(command) = command else {
            break;
        };
        match command.trim() {
            "" | "n" => {
                if let Some(report) = engine.advance_period() {
                    print!("{}", report);
                }
                if !engine.is_over() {
                    collect_renewals(&mut engine, &mut input)?;
                }
            }
            "s" => println!("{}", engine.status_text()),
            "q" => break,
            other => println!("Unknown command '{}'", other),
        }
    }

    println!();
    print!("{}", engine.summary());
    Ok(())
}

/// Ask once for new terms on every expired line. Empty or invalid input keeps
/// the current terms until the next month.
fn collect_renewals<R: RandomSource>(
    engine: &mut SimulationEngine<R>,
    input: &mut impl BufRead,
) -> Result<()> {
    for name in engine.expiring_lines() {
        if let Some(line) = engine.state().line(&name) {
            let p = &line.policy;
            println!(
                "\nThe {} policy has expired. Current terms: premium {:.2}, {} months, \
                 max payout {:.2}, franchise {:.2}",
                name, p.premium, p.duration, p.max_payout, p.franchise
            );
        }

        let answer = prompt(
            input,
            "New terms (premium duration max_payout franchise), Enter to skip > ",
        )?;
        let Some(answer) = answer else {
            return Ok(());
        };
        if answer.trim().is_empty() {
            println!("{} keeps its current terms.", name);
            continue;
        }

        match engine.renew_from_input(&name, &answer) {
            Ok(message) => println!("{}", message),
            Err(e) => println!("Renewal failed ({}); {} keeps its current terms.", e, name),
        }
    }
    Ok(())
}

/// Print `message` and read one line; `None` at end of input
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
