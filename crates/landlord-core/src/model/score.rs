use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

pub const BASE_POINTS: i32 = 100;

/// What settlement needs to know about a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementInput {
    pub landlord: Seat,
    pub winner: Seat,
    pub bid: u8,
    pub bombs: u32,
    pub rocket_used: bool,
    /// Accepted non-pass plays per seat.
    pub plays: [usize; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub landlord: Seat,
    pub winner: Seat,
    pub landlord_won: bool,
    pub bid: u8,
    pub multiplier: u32,
    pub spring: bool,
    pub scores: [i32; 3],
}

impl RoundScore {
    /// Landlord collects or pays double, each farmer the single stake, so
    /// the three scores sum to zero. A recorded bid of 0 counts as 1.
    pub fn settle(input: SettlementInput) -> Self {
        let landlord_won = input.winner == input.landlord;

        let mut multiplier = 1u32;
        if input.bombs > 0 {
            multiplier *= 1 + input.bombs;
        }
        if input.rocket_used {
            multiplier *= 2;
        }

        let farmers_silent = Seat::LOOP
            .iter()
            .filter(|seat| **seat != input.landlord)
            .all(|seat| input.plays[seat.index()] == 0);
        let spring = if landlord_won {
            farmers_silent
        } else {
            input.plays[input.landlord.index()] == 0
        };
        if spring {
            multiplier *= 2;
        }

        let stake = BASE_POINTS * i32::from(input.bid.max(1)) * multiplier as i32;
        let sign = if landlord_won { 1 } else { -1 };
        let mut scores = [0i32; 3];
        for seat in Seat::LOOP {
            scores[seat.index()] = if seat == input.landlord {
                2 * sign * stake
            } else {
                -sign * stake
            };
        }

        Self {
            landlord: input.landlord,
            winner: input.winner,
            landlord_won,
            bid: input.bid,
            multiplier,
            spring,
            scores,
        }
    }

    pub fn score(&self, seat: Seat) -> i32 {
        self.scores[seat.index()]
    }

    /// Whether `seat` sits on the winning side.
    pub fn won(&self, seat: Seat) -> bool {
        (seat == self.landlord) == self.landlord_won
    }
}
