use crate::model::group::CardGroup;
use crate::model::rank::Rank;
use crate::model::round::KITTY_SIZE;
use crate::model::score::RoundScore;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// Notifications the table sends to seats as a round progresses.
///
/// `Dealt` goes only to the seat it names; everything else is broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    Dealt {
        seat: Seat,
        hand: Vec<Rank>,
    },
    BidPlaced {
        seat: Seat,
        bid: u8,
    },
    LandlordDecided {
        landlord: Seat,
        kitty: [Rank; KITTY_SIZE],
    },
    /// `None` is a pass.
    Played {
        seat: Seat,
        group: Option<CardGroup>,
    },
    RoundEnded {
        winner: Seat,
        score: RoundScore,
    },
}
