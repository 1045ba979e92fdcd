use crate::model::seat::Seat;
use thiserror::Error;

pub const MAX_BID: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BidError {
    #[error("bidding is not open")]
    NotInBiddingPhase,
    #[error("expected {expected} to bid but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("bid {0} is outside 0..=3")]
    OutOfRange(u8),
    #[error("bid {bid} does not exceed the standing bid {standing}")]
    NotHigher { bid: u8, standing: u8 },
    #[error("every seat passed; no landlord can be chosen")]
    AllPassed,
}

/// Bids recorded so far in one round, `0` meaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiddingRecord {
    bids: [Option<u8>; 3],
}

impl BiddingRecord {
    pub const fn new() -> Self {
        Self { bids: [None; 3] }
    }

    pub fn bid(&self, seat: Seat) -> Option<u8> {
        self.bids[seat.index()]
    }

    pub fn bids(&self) -> [Option<u8>; 3] {
        self.bids
    }

    /// Highest non-zero bid so far, `0` when nobody has bid. A later bid
    /// must top this, not just the preceding seat's bid, even across a pass.
    pub fn standing(&self) -> u8 {
        self.bids.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Next seat to speak; bidding always opens at East.
    pub fn next_bidder(&self) -> Option<Seat> {
        Seat::LOOP.into_iter().find(|seat| self.bid(*seat).is_none())
    }

    pub fn is_complete(&self) -> bool {
        self.next_bidder().is_none()
    }

    pub fn validate(&self, seat: Seat, value: u8) -> Result<(), BidError> {
        match self.next_bidder() {
            Some(expected) if expected != seat => {
                return Err(BidError::OutOfTurn {
                    expected,
                    actual: seat,
                });
            }
            Some(_) => {}
            None => return Err(BidError::NotInBiddingPhase),
        }
        if value > MAX_BID {
            return Err(BidError::OutOfRange(value));
        }
        let standing = self.standing();
        if value != 0 && value <= standing {
            return Err(BidError::NotHigher {
                bid: value,
                standing,
            });
        }
        Ok(())
    }

    pub fn record(&mut self, seat: Seat, value: u8) -> Result<(), BidError> {
        self.validate(seat, value)?;
        self.bids[seat.index()] = Some(value);
        Ok(())
    }

    /// Landlord once it is determined: an immediate 3, or after all three
    /// seats spoke, the last seat in turn order with a non-zero bid.
    pub fn landlord(&self) -> Option<Seat> {
        if let Some(seat) = Seat::LOOP.into_iter().find(|s| self.bid(*s) == Some(MAX_BID)) {
            return Some(seat);
        }
        if !self.is_complete() {
            return None;
        }
        Seat::LOOP
            .into_iter()
            .rev()
            .find(|seat| self.bid(*seat).is_some_and(|bid| bid > 0))
    }

    pub fn all_passed(&self) -> bool {
        self.is_complete() && self.bids.iter().all(|bid| *bid == Some(0))
    }

    /// Bids the next seat may legally make.
    pub fn candidates(&self) -> Vec<u8> {
        let mut values = vec![0];
        values.extend(self.standing() + 1..=MAX_BID);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::{BidError, BiddingRecord};
    use crate::model::seat::Seat;

    fn run(values: &[u8]) -> BiddingRecord {
        let mut record = BiddingRecord::new();
        for (seat, value) in Seat::LOOP.into_iter().zip(values) {
            record.record(seat, *value).unwrap();
        }
        record
    }

    #[test]
    fn immediate_three_takes_landlord() {
        let record = run(&[0, 0, 3]);
        assert_eq!(record.landlord(), Some(Seat::West));
        let record = run(&[3]);
        assert_eq!(record.landlord(), Some(Seat::East));
    }

    #[test]
    fn last_non_zero_bidder_wins() {
        assert_eq!(run(&[1, 2, 0]).landlord(), Some(Seat::South));
        assert_eq!(run(&[1, 0, 0]).landlord(), Some(Seat::East));
        assert_eq!(run(&[0, 1, 2]).landlord(), Some(Seat::West));
        assert_eq!(run(&[1, 0]).landlord(), None);
    }

    #[test]
    fn all_zero_has_no_landlord() {
        let record = run(&[0, 0, 0]);
        assert!(record.all_passed());
        assert_eq!(record.landlord(), None);
    }

    #[test]
    fn bids_must_climb() {
        let mut record = run(&[2]);
        assert_eq!(
            record.record(Seat::South, 2),
            Err(BidError::NotHigher {
                bid: 2,
                standing: 2
            })
        );
        assert_eq!(record.record(Seat::South, 4), Err(BidError::OutOfRange(4)));
        assert!(record.record(Seat::South, 0).is_ok());
        assert_eq!(
            record.record(Seat::West, 1),
            Err(BidError::NotHigher {
                bid: 1,
                standing: 2
            })
        );
    }

    #[test]
    fn bid_after_a_pass_must_top_the_earlier_bid() {
        let mut record = run(&[2, 0]);
        assert_eq!(record.standing(), 2);
        assert_eq!(
            record.record(Seat::West, 1),
            Err(BidError::NotHigher {
                bid: 1,
                standing: 2
            })
        );
        assert_eq!(record.candidates(), vec![0, 3]);
        record.record(Seat::West, 3).unwrap();
        assert_eq!(record.landlord(), Some(Seat::West));
    }

    #[test]
    fn bids_follow_turn_order() {
        let mut record = BiddingRecord::new();
        assert_eq!(
            record.record(Seat::South, 1),
            Err(BidError::OutOfTurn {
                expected: Seat::East,
                actual: Seat::South
            })
        );
        assert!(record.record(Seat::East, 1).is_ok());
    }

    #[test]
    fn candidates_skip_covered_values() {
        assert_eq!(BiddingRecord::new().candidates(), vec![0, 1, 2, 3]);
        assert_eq!(run(&[2]).candidates(), vec![0, 3]);
    }
}
