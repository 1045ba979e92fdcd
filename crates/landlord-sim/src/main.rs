use std::path::PathBuf;

use clap::Parser;

use landlord_sim::config::{ResolvedOutputs, SimConfig};
use landlord_sim::logging::init_logging;
use landlord_sim::runner::SimulationRunner;

/// Self-play harness for landlord seats.
#[derive(Debug, Parser)]
#[command(
    name = "landlord-sim",
    author,
    version,
    about = "Seeded self-play simulation for the landlord card game"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for dealing.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (nothing is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.rounds;
    let names: Vec<&str> = config.seats.iter().map(|seat| seat.name.as_str()).collect();

    println!(
        "Loaded configuration '{run_id}' with seats {} ({rounds} round{})",
        names.join(", "),
        if rounds == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = SimulationRunner::new(config, outputs);

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}' (seed {}): {} rounds, {} re-deals, {} rows at {}",
        summary.seed,
        summary.rounds_played,
        summary.redeals,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for standing in &summary.standings {
        println!(
            "  {:<12} rounds {:>4}  landlord {:>4}  wins {:>4}  score {:>8}",
            standing.name,
            standing.rounds,
            standing.landlord_rounds,
            standing.wins,
            standing.total_score
        );
    }
    println!(
        "Evaluator saw {} batches ({} recorded decisions)",
        summary.evaluator_batches, summary.evaluator_decisions
    );
    if let Some(path) = summary.summary_path.as_ref() {
        println!("Run summary: {}", path.display());
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
