use crate::model::round::RoundState;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// Outcome of one finished round, in a form suitable for JSON logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u32,
    pub landlord: Seat,
    pub bids: [Option<u8>; 3],
    pub winner: Seat,
    pub landlord_won: bool,
    pub bid: u8,
    pub multiplier: u32,
    pub bombs: u32,
    pub rocket: bool,
    pub spring: bool,
    pub scores: [i32; 3],
    /// Accepted non-pass plays per seat.
    pub plays: [usize; 3],
    pub turns: u32,
}

impl RoundSummary {
    /// `None` until the round has a winner.
    pub fn capture(state: &RoundState, round_number: u32, turns: u32) -> Option<Self> {
        let score = state.settle()?;
        Some(RoundSummary {
            round_number,
            landlord: score.landlord,
            bids: state.bidding().bids(),
            winner: score.winner,
            landlord_won: score.landlord_won,
            bid: score.bid,
            multiplier: score.multiplier,
            bombs: state.bombs(),
            rocket: state.rocket_used() > 0,
            spring: score.spring,
            scores: score.scores,
            plays: Seat::LOOP.map(|seat| state.history(seat).len()),
            turns,
        })
    }

    pub fn score(&self, seat: Seat) -> i32 {
        self.scores[seat.index()]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
