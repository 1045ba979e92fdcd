use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use landlord_bot::{EvaluatorSeat, HeuristicEvaluator, LearningStats, SeatMode};
use landlord_core::game::summary::RoundSummary;
use landlord_core::game::table::{Table, TableError};
use landlord_core::model::bidding::BidError;
use landlord_core::model::seat::Seat;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{EvaluatorKind, ResolvedOutputs, SeatConfig, SimConfig};

type HeuristicSeat = EvaluatorSeat<HeuristicEvaluator>;

/// Plays the configured number of rounds and streams one JSONL row per round.
pub struct SimulationRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
    seed: u64,
}

/// Per-agent totals across the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentStanding {
    pub name: String,
    pub rounds: u32,
    pub landlord_rounds: u32,
    pub wins: u32,
    pub total_score: i64,
}

/// Summary details returned after a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub seed: u64,
    pub rounds_played: usize,
    pub redeals: u32,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub standings: Vec<AgentStanding>,
    pub evaluator_batches: u32,
    pub evaluator_decisions: u32,
}

#[derive(Debug, Serialize)]
struct RoundLogRow<'a> {
    run_id: &'a str,
    round_index: usize,
    seating: [&'a str; 3],
    landlord_agent: &'a str,
    winner_agent: &'a str,
    redeals: u32,
    #[serde(flatten)]
    summary: &'a RoundSummary,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Self {
            config,
            outputs,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn build_seats(&self, evaluator: &Arc<Mutex<HeuristicEvaluator>>) -> [HeuristicSeat; 3] {
        let seat = |index: usize| {
            let config: &SeatConfig = &self.config.seats[index];
            let mode = if config.training {
                SeatMode::Training
            } else {
                SeatMode::Greedy
            };
            let seed = config
                .seed
                .unwrap_or_else(|| self.seed.wrapping_add(index as u64 + 1));
            match config.evaluator {
                EvaluatorKind::Heuristic => {
                    EvaluatorSeat::new(config.name.clone(), Arc::clone(evaluator), mode, seed)
                }
            }
        };
        [seat(0), seat(1), seat(2)]
    }

    /// Execute the run, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);

        let evaluator = Arc::new(Mutex::new(HeuristicEvaluator::new()));
        let mut table = Table::with_seed(self.build_seats(&evaluator), self.seed);
        let mut standings: HashMap<String, AgentStanding> = self
            .config
            .seats
            .iter()
            .map(|seat| {
                let standing = AgentStanding {
                    name: seat.name.clone(),
                    ..AgentStanding::default()
                };
                (seat.name.clone(), standing)
            })
            .collect();

        let mut redeals = 0u32;
        let mut rows_written = 0usize;
        for round_index in 0..self.config.rounds {
            let (summary, attempts) = self.play_round(&mut table, round_index)?;
            redeals += attempts;

            let seating = Seat::LOOP.map(|seat| table.agent(seat).name());
            let row = RoundLogRow {
                run_id: &self.config.run_id,
                round_index,
                seating,
                landlord_agent: seating[summary.landlord.index()],
                winner_agent: seating[summary.winner.index()],
                redeals: attempts,
                summary: &summary,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            for seat in Seat::LOOP {
                let name = seating[seat.index()];
                if let Some(standing) = standings.get_mut(name) {
                    standing.rounds += 1;
                    standing.total_score += i64::from(summary.score(seat));
                    if seat == summary.landlord {
                        standing.landlord_rounds += 1;
                    }
                    if (seat == summary.landlord) == summary.landlord_won {
                        standing.wins += 1;
                    }
                }
            }

            event!(
                target: "landlord_sim::run",
                Level::INFO,
                round_index,
                landlord = seating[summary.landlord.index()],
                winner = seating[summary.winner.index()],
                multiplier = summary.multiplier,
                "round recorded"
            );
            table.reset();
        }
        writer.flush()?;

        let stats: LearningStats = evaluator.lock().stats();
        let standings = self
            .config
            .seats
            .iter()
            .filter_map(|seat| standings.remove(&seat.name))
            .collect();
        let summary = RunSummary {
            run_id: self.config.run_id.clone(),
            seed: self.seed,
            rounds_played: rows_written,
            redeals,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_json.clone(),
            standings,
            evaluator_batches: stats.batches,
            evaluator_decisions: stats.bid_decisions + stats.play_decisions,
        };

        if let Some(path) = self.outputs.summary_json.as_ref() {
            ensure_parent(path.parent())?;
            let file = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(file, &summary)?;
        }

        Ok(summary)
    }

    /// Runs one round, dealing again while every seat passes the bid.
    fn play_round(
        &self,
        table: &mut Table<HeuristicSeat>,
        round_index: usize,
    ) -> Result<(RoundSummary, u32), RunnerError> {
        let mut attempts = 0u32;
        loop {
            match table.run_round() {
                Ok(summary) => return Ok((summary, attempts)),
                Err(TableError::Bid(BidError::AllPassed)) if attempts < self.config.max_redeals => {
                    attempts += 1;
                    event!(
                        target: "landlord_sim::run",
                        Level::DEBUG,
                        round_index,
                        attempts,
                        "all seats passed; dealing again"
                    );
                    table.reset();
                }
                Err(TableError::Bid(BidError::AllPassed)) => {
                    return Err(RunnerError::Stalled {
                        round_index,
                        redeals: attempts,
                    });
                }
                Err(err) => return Err(RunnerError::Table(err)),
            }
        }
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("table rejected an action: {0}")]
    Table(#[from] TableError),
    #[error("round {round_index}: every seat passed on {redeals} consecutive deals")]
    Stalled { round_index: usize, redeals: u32 },
}
