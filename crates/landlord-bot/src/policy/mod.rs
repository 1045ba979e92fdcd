mod heuristic;

pub use heuristic::{HeuristicEvaluator, LearningStats};

use landlord_core::belief::{SeatBelief, SeatSnapshot};
use landlord_core::model::group::CardGroup;
use landlord_core::model::seat::Seat;

/// One cached decision: what the seat knew, what it picked, and what the
/// evaluator predicted for that pick.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRecord<T> {
    pub snapshot: SeatSnapshot,
    pub choice: T,
    pub predicted: f32,
}

/// Everything a seat collected during one round, handed over at round end.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningBatch {
    pub seat: Seat,
    pub bids: Vec<DecisionRecord<u8>>,
    pub plays: Vec<DecisionRecord<CardGroup>>,
    pub final_score: i32,
    /// Whether the seat's side won the round.
    pub won: bool,
}

impl LearningBatch {
    pub fn decisions(&self) -> usize {
        self.bids.len() + self.plays.len()
    }
}

/// Scores candidate actions for a seat; higher is preferred.
///
/// Implementations never see the live round, only a seat's own belief, and
/// that belief is borrowed just for one scoring call. Anything kept past the
/// call arrives later as a frozen [`SeatSnapshot`] inside a [`LearningBatch`].
pub trait Evaluator: Send {
    fn score_bid(&self, state: &SeatBelief, bid: u8) -> f32;

    fn score_play(&self, state: &SeatBelief, group: &CardGroup) -> f32;

    fn score_bids(&self, state: &SeatBelief, candidates: &[u8]) -> Vec<f32> {
        candidates
            .iter()
            .map(|bid| self.score_bid(state, *bid))
            .collect()
    }

    fn score_plays(&self, state: &SeatBelief, candidates: &[CardGroup]) -> Vec<f32> {
        candidates
            .iter()
            .map(|group| self.score_play(state, group))
            .collect()
    }

    /// Called once per seat when a round ends. The default ignores it.
    fn learn(&mut self, _batch: LearningBatch) {}
}
