use super::events::RoundEvent;
use crate::model::group::CardGroup;
use crate::model::hand::Hand;
use crate::model::seat::Seat;

/// Context handed to a seat when it is its turn to bid.
pub struct BidRequest<'a> {
    pub seat: Seat,
    pub standing: u8,
    /// Every value the table will accept, `0` first.
    pub candidates: &'a [u8],
    pub hand: &'a Hand,
}

/// Context handed to a seat when it is its turn to play.
pub struct PlayRequest<'a> {
    pub seat: Seat,
    /// Set when the seat leads and may not pass.
    pub must_play: bool,
    pub table: Option<&'a CardGroup>,
    pub hand: &'a Hand,
}

/// Decision maker occupying one seat at a [`Table`](super::table::Table).
///
/// The table validates every answer; an illegal one aborts the turn with an
/// error instead of being corrected.
pub trait SeatAgent {
    fn observe(&mut self, event: &RoundEvent);

    fn choose_bid(&mut self, request: &BidRequest) -> u8;

    fn choose_play(&mut self, request: &PlayRequest) -> CardGroup;
}

impl<A: SeatAgent + ?Sized> SeatAgent for Box<A> {
    fn observe(&mut self, event: &RoundEvent) {
        (**self).observe(event)
    }

    fn choose_bid(&mut self, request: &BidRequest) -> u8 {
        (**self).choose_bid(request)
    }

    fn choose_play(&mut self, request: &PlayRequest) -> CardGroup {
        (**self).choose_play(request)
    }
}
