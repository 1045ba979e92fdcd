use crate::policy::{DecisionRecord, Evaluator, LearningBatch};
use landlord_core::belief::SeatBelief;
use landlord_core::game::agent::{BidRequest, PlayRequest, SeatAgent};
use landlord_core::game::events::RoundEvent;
use landlord_core::model::group::CardGroup;
use landlord_core::model::scan::legal_plays;
use landlord_core::model::seat::Seat;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::mem;
use std::sync::Arc;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatMode {
    /// Always take the best-scored candidate.
    Greedy,
    /// Pick uniformly and remember every decision for `Evaluator::learn`.
    Training,
}

/// A [`SeatAgent`] that asks an [`Evaluator`] to rank its candidates.
///
/// Several seats may share one evaluator; it is locked only for the
/// duration of a single scoring pass or `learn` call.
pub struct EvaluatorSeat<E: Evaluator> {
    name: String,
    evaluator: Arc<Mutex<E>>,
    mode: SeatMode,
    rng: StdRng,
    belief: SeatBelief,
    bids: Vec<DecisionRecord<u8>>,
    plays: Vec<DecisionRecord<CardGroup>>,
    rounds_played: u32,
    total_score: i64,
}

impl<E: Evaluator> EvaluatorSeat<E> {
    pub fn new(name: impl Into<String>, evaluator: Arc<Mutex<E>>, mode: SeatMode, seed: u64) -> Self {
        Self {
            name: name.into(),
            evaluator,
            mode,
            rng: StdRng::seed_from_u64(seed),
            belief: SeatBelief::new(Seat::East),
            bids: Vec::new(),
            plays: Vec::new(),
            rounds_played: 0,
            total_score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> SeatMode {
        self.mode
    }

    pub fn belief(&self) -> &SeatBelief {
        &self.belief
    }

    /// Decisions cached since the last deal.
    pub fn pending_decisions(&self) -> usize {
        self.bids.len() + self.plays.len()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    fn pick(&mut self, scores: &[f32]) -> usize {
        match self.mode {
            SeatMode::Training => self.rng.gen_range(0..scores.len()),
            SeatMode::Greedy => argmax(scores),
        }
    }

    fn finish_round(&mut self, score: i32, won: bool) {
        self.rounds_played += 1;
        self.total_score += i64::from(score);
        let batch = LearningBatch {
            seat: self.belief.seat(),
            bids: mem::take(&mut self.bids),
            plays: mem::take(&mut self.plays),
            final_score: score,
            won,
        };
        self.evaluator.lock().learn(batch);
    }
}

/// First index holding the highest score.
fn argmax(scores: &[f32]) -> usize {
    scores
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (index, score)| {
            if *score > best.1 { (index, *score) } else { best }
        })
        .0
}

impl<E: Evaluator> SeatAgent for EvaluatorSeat<E> {
    fn observe(&mut self, event: &RoundEvent) {
        self.belief.apply(event);
        match event {
            RoundEvent::Dealt { .. } => {
                self.bids.clear();
                self.plays.clear();
            }
            RoundEvent::RoundEnded { score, .. } => {
                let seat = self.belief.seat();
                self.finish_round(score.score(seat), score.won(seat));
            }
            _ => {}
        }
    }

    fn choose_bid(&mut self, request: &BidRequest) -> u8 {
        if request.candidates.is_empty() {
            return 0;
        }
        let scores = self
            .evaluator
            .lock()
            .score_bids(&self.belief, request.candidates);
        let index = self.pick(&scores);
        let choice = request.candidates[index];

        if self.mode == SeatMode::Training {
            self.bids.push(DecisionRecord {
                snapshot: self.belief.duplicate(),
                choice,
                predicted: scores[index],
            });
        }

        event!(
            target: "landlord_bot::bid",
            Level::DEBUG,
            name = %self.name,
            seat = %request.seat,
            mode = ?self.mode,
            candidates = request.candidates.len(),
            standing = request.standing,
            chosen = choice,
            predicted = scores[index],
            "bid chosen"
        );
        choice
    }

    fn choose_play(&mut self, request: &PlayRequest) -> CardGroup {
        let mut candidates = legal_plays(request.hand.cards(), request.table, request.must_play);
        if candidates.is_empty() {
            return CardGroup::Pass;
        }
        let scores = self.evaluator.lock().score_plays(&self.belief, &candidates);
        let index = self.pick(&scores);
        let choice = candidates.swap_remove(index);

        if self.mode == SeatMode::Training {
            self.plays.push(DecisionRecord {
                snapshot: self.belief.duplicate(),
                choice: choice.clone(),
                predicted: scores[index],
            });
        }

        if tracing::enabled!(target: "landlord_bot::play", Level::DEBUG) {
            event!(
                target: "landlord_bot::play",
                Level::DEBUG,
                name = %self.name,
                seat = %request.seat,
                mode = ?self.mode,
                must_play = request.must_play,
                candidates = scores.len(),
                chosen = %choice,
                predicted = scores[index],
                "play chosen"
            );
        }
        choice
    }
}
