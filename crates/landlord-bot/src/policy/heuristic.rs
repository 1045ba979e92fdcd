use super::{Evaluator, LearningBatch};
use landlord_core::belief::SeatBelief;
use landlord_core::model::counts::RankCounts;
use landlord_core::model::group::CardGroup;
use landlord_core::model::rank::Rank;
use tracing::{Level, event};

/// Running totals of what the evaluator has been fed at round end.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LearningStats {
    pub batches: u32,
    pub bid_decisions: u32,
    pub play_decisions: u32,
    pub wins: u32,
    pub total_score: i64,
}

impl LearningStats {
    pub fn win_rate(&self) -> f32 {
        if self.batches == 0 {
            0.0
        } else {
            self.wins as f32 / self.batches as f32
        }
    }
}

/// Rule-of-thumb evaluator: bids on high cards and bombs, sheds long low
/// groups first, keeps bombs for emergencies, lets a partner's lead stand.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    stats: LearningStats,
}

impl HeuristicEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> LearningStats {
        self.stats
    }
}

/// Rough count of guaranteed tricks in a hand.
pub(crate) fn hand_strength(counts: &RankCounts) -> f32 {
    let mut strength = 0.0;
    if counts.get(Rank::BlackJoker) > 0 && counts.get(Rank::RedJoker) > 0 {
        strength += 4.0;
    } else {
        strength += f32::from(counts.get(Rank::RedJoker)) * 2.0;
        strength += f32::from(counts.get(Rank::BlackJoker)) * 1.5;
    }
    strength += f32::from(counts.get(Rank::Two));
    strength += f32::from(counts.get(Rank::Ace)) * 0.5;
    for (rank, count) in counts.present() {
        if count == 4 && !rank.is_joker() {
            strength += 3.0;
        }
    }
    strength
}

/// Smallest remaining card count among seats on the other side.
fn closest_threat(state: &SeatBelief) -> Option<usize> {
    state
        .opponents()
        .iter()
        .filter(|view| !state.is_partner(view.seat))
        .map(|view| view.remaining)
        .min()
}

impl Evaluator for HeuristicEvaluator {
    fn score_bid(&self, state: &SeatBelief, bid: u8) -> f32 {
        if bid == 0 {
            return 0.0;
        }
        let strength = hand_strength(&state.hand().counts());
        let needed = 2.0 + 2.0 * f32::from(bid);
        (strength - needed) * f32::from(bid)
    }

    fn score_play(&self, state: &SeatBelief, group: &CardGroup) -> f32 {
        let threat = closest_threat(state).unwrap_or(usize::MAX);
        let partner_leads = state
            .table()
            .is_some_and(|(owner, _)| state.is_partner(owner));

        if group.is_pass() {
            return match (partner_leads, threat <= 2) {
                (true, _) => 2.0,
                (false, true) => -6.0,
                (false, false) => -0.5,
            };
        }

        if group.len() == state.remaining() {
            return 100.0;
        }

        let rank = group.rank().map_or(0.0, |rank| rank.index() as f32);
        let mut score = group.len() as f32 - rank * 0.15;
        if group.overrides_shape() && threat > 4 {
            // A bomb nobody can top once the rocket is gone.
            score -= if group.is_bomb() && state.rocket_seen() { 4.0 } else { 6.0 };
        }
        if partner_leads {
            score -= 3.0;
        }
        score
    }

    fn learn(&mut self, batch: LearningBatch) {
        self.stats.batches += 1;
        self.stats.bid_decisions += batch.bids.len() as u32;
        self.stats.play_decisions += batch.plays.len() as u32;
        self.stats.total_score += i64::from(batch.final_score);
        if batch.won {
            self.stats.wins += 1;
        }
        event!(
            target: "landlord_bot::learn",
            Level::DEBUG,
            seat = %batch.seat,
            decisions = batch.decisions(),
            final_score = batch.final_score,
            won = batch.won,
            "batch recorded"
        );
    }
}
