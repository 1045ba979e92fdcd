use super::agent::{BidRequest, PlayRequest, SeatAgent};
use super::events::RoundEvent;
use super::summary::RoundSummary;
use crate::model::bidding::BidError;
use crate::model::deck::Deck;
use crate::model::round::{BidOutcome, PlayError, PlayOutcome, RoundPhase, RoundState};
use crate::model::seat::Seat;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{Level, event};

/// Result of a single [`Table::play`] turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayResult {
    Continue,
    EastWins,
    SouthWins,
    WestWins,
}

impl PlayResult {
    pub fn won_by(seat: Seat) -> Self {
        match seat {
            Seat::East => PlayResult::EastWins,
            Seat::South => PlayResult::SouthWins,
            Seat::West => PlayResult::WestWins,
        }
    }

    pub fn winner(self) -> Option<Seat> {
        match self {
            PlayResult::Continue => None,
            PlayResult::EastWins => Some(Seat::East),
            PlayResult::SouthWins => Some(Seat::South),
            PlayResult::WestWins => Some(Seat::West),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error(transparent)]
    Bid(#[from] BidError),
    #[error(transparent)]
    Play(#[from] PlayError),
}

/// Drives rounds between three agents: deal, bid, play, settle.
///
/// Agent `i` occupies seat `i`. [`Table::reset`] rotates the agents one seat
/// so that the agent that sat South becomes East.
pub struct Table<A: SeatAgent> {
    agents: [A; 3],
    rng: StdRng,
    seed: u64,
    round_number: u32,
    turns: u32,
    round: RoundState,
}

impl<A: SeatAgent> Table<A> {
    pub fn new(agents: [A; 3]) -> Self {
        Self::with_seed(agents, rand::random())
    }

    /// Seats the agents and deals round 1.
    pub fn with_seed(agents: [A; 3], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let round = RoundState::deal(&Deck::shuffled(&mut rng));
        let mut table = Self {
            agents,
            rng,
            seed,
            round_number: 1,
            turns: 0,
            round,
        };
        table.announce_deal();
        table
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn agent(&self, seat: Seat) -> &A {
        &self.agents[seat.index()]
    }

    pub fn agents(&self) -> &[A; 3] {
        &self.agents
    }

    /// Starts the next round from any phase: rotates seats and deals afresh.
    pub fn reset(&mut self) {
        self.agents.rotate_left(1);
        self.round_number += 1;
        self.turns = 0;
        self.round = RoundState::deal(&Deck::shuffled(&mut self.rng));
        self.announce_deal();
    }

    fn announce_deal(&mut self) {
        event!(
            target: "landlord_core::table",
            Level::DEBUG,
            round = self.round_number,
            kitty = ?self.round.kitty(),
            "dealt"
        );
        for seat in Seat::LOOP {
            let event = RoundEvent::Dealt {
                seat,
                hand: self.round.hand(seat).cards().to_vec(),
            };
            self.agents[seat.index()].observe(&event);
        }
    }

    fn broadcast(&mut self, event: &RoundEvent) {
        for agent in self.agents.iter_mut() {
            agent.observe(event);
        }
    }

    /// Runs bidding to completion and returns the landlord.
    pub fn bid(&mut self) -> Result<Seat, BidError> {
        if !matches!(self.round.phase(), RoundPhase::Ready | RoundPhase::Bidding) {
            return Err(BidError::NotInBiddingPhase);
        }

        loop {
            let seat = self
                .round
                .bidding()
                .next_bidder()
                .ok_or(BidError::NotInBiddingPhase)?;
            let candidates = self.round.bidding().candidates();
            let request = BidRequest {
                seat,
                standing: self.round.bidding().standing(),
                candidates: &candidates,
                hand: self.round.hand(seat),
            };
            let value = self.agents[seat.index()].choose_bid(&request);

            let outcome = match self.round.place_bid(seat, value) {
                Ok(outcome) => outcome,
                Err(BidError::AllPassed) => {
                    self.broadcast(&RoundEvent::BidPlaced { seat, bid: value });
                    event!(
                        target: "landlord_core::table",
                        Level::WARN,
                        round = self.round_number,
                        "every seat passed"
                    );
                    return Err(BidError::AllPassed);
                }
                Err(err) => return Err(err),
            };

            event!(
                target: "landlord_core::table",
                Level::INFO,
                round = self.round_number,
                seat = %seat,
                bid = value,
                "bid placed"
            );
            self.broadcast(&RoundEvent::BidPlaced { seat, bid: value });

            if let BidOutcome::Landlord { seat, kitty } = outcome {
                event!(
                    target: "landlord_core::table",
                    Level::INFO,
                    round = self.round_number,
                    landlord = %seat,
                    kitty = ?kitty,
                    "landlord decided"
                );
                self.broadcast(&RoundEvent::LandlordDecided {
                    landlord: seat,
                    kitty,
                });
                return Ok(seat);
            }
        }
    }

    /// Asks the seat on turn for one play and applies it.
    pub fn play(&mut self) -> Result<PlayResult, PlayError> {
        if self.round.phase() != RoundPhase::Playing {
            return Err(PlayError::NotInPlayPhase);
        }

        let seat = self.round.turn();
        let request = PlayRequest {
            seat,
            must_play: self.round.must_play(),
            table: self.round.table().map(|play| &play.group),
            hand: self.round.hand(seat),
        };
        let group = self.agents[seat.index()].choose_play(&request);

        let outcome = self.round.play(seat, group.clone())?;
        self.turns += 1;

        if tracing::enabled!(target: "landlord_core::table", Level::INFO) {
            event!(
                target: "landlord_core::table",
                Level::INFO,
                round = self.round_number,
                seat = %seat,
                group = %group,
                remaining = self.round.hand(seat).len(),
                "played"
            );
        }
        let played = if group.is_pass() { None } else { Some(group) };
        self.broadcast(&RoundEvent::Played {
            seat,
            group: played,
        });

        match outcome {
            PlayOutcome::Won(winner) => {
                if let Some(score) = self.round.settle() {
                    event!(
                        target: "landlord_core::table",
                        Level::INFO,
                        round = self.round_number,
                        winner = %winner,
                        landlord_won = score.landlord_won,
                        multiplier = score.multiplier,
                        spring = score.spring,
                        scores = ?score.scores,
                        "round ended"
                    );
                    self.broadcast(&RoundEvent::RoundEnded { winner, score });
                }
                Ok(PlayResult::won_by(winner))
            }
            PlayOutcome::Played | PlayOutcome::Passed { .. } => Ok(PlayResult::Continue),
        }
    }

    /// Bids, then plays until a seat empties its hand.
    pub fn run_round(&mut self) -> Result<RoundSummary, TableError> {
        self.bid()?;
        loop {
            if let Some(winner) = self.play()?.winner() {
                event!(
                    target: "landlord_core::table",
                    Level::DEBUG,
                    round = self.round_number,
                    winner = %winner,
                    turns = self.turns,
                    "round complete"
                );
                break;
            }
        }
        RoundSummary::capture(&self.round, self.round_number, self.turns)
            .ok_or(TableError::Play(PlayError::NotInPlayPhase))
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayResult, Table, TableError};
    use crate::game::agent::{BidRequest, PlayRequest, SeatAgent};
    use crate::game::events::RoundEvent;
    use crate::model::bidding::BidError;
    use crate::model::group::{CardGroup, NormalKind};
    use crate::model::round::{PlayError, RoundPhase};
    use crate::model::seat::Seat;

    /// Bids a fixed value, leads its lowest single, passes otherwise.
    #[derive(Default)]
    struct Scripted {
        bid: u8,
        events: Vec<RoundEvent>,
        bid_requests: usize,
        pass_on_lead: bool,
    }

    impl Scripted {
        fn bidding(bid: u8) -> Self {
            Self {
                bid,
                ..Self::default()
            }
        }
    }

    impl SeatAgent for Scripted {
        fn observe(&mut self, event: &RoundEvent) {
            self.events.push(event.clone());
        }

        fn choose_bid(&mut self, _request: &BidRequest) -> u8 {
            self.bid_requests += 1;
            self.bid
        }

        fn choose_play(&mut self, request: &PlayRequest) -> CardGroup {
            if request.must_play && !self.pass_on_lead {
                CardGroup::normal(NormalKind::Single, request.hand.cards()[0])
            } else {
                CardGroup::Pass
            }
        }
    }

    fn seated(bids: [u8; 3]) -> Table<Scripted> {
        Table::with_seed(bids.map(Scripted::bidding), 11)
    }

    #[test]
    fn each_seat_sees_only_its_own_deal() {
        let table = seated([0, 0, 3]);
        for seat in Seat::LOOP {
            let events = &table.agent(seat).events;
            assert_eq!(events.len(), 1);
            assert!(matches!(events[0], RoundEvent::Dealt { seat: dealt, .. } if dealt == seat));
        }
    }

    #[test]
    fn three_stops_bidding() {
        let mut table = seated([0, 0, 3]);
        assert_eq!(table.bid(), Ok(Seat::West));
        assert_eq!(table.phase(), RoundPhase::Playing);
        assert_eq!(table.round().hand(Seat::West).len(), 20);

        let mut early = seated([3, 1, 2]);
        assert_eq!(early.bid(), Ok(Seat::East));
        assert_eq!(early.agent(Seat::South).bid_requests, 0);
        assert_eq!(early.agent(Seat::West).bid_requests, 0);
        assert!(
            early
                .agent(Seat::West)
                .events
                .iter()
                .any(|e| matches!(e, RoundEvent::LandlordDecided { landlord: Seat::East, .. }))
        );
    }

    #[test]
    fn unanimous_pass_fails_the_round() {
        let mut table = seated([0, 0, 0]);
        assert_eq!(table.bid(), Err(BidError::AllPassed));
        assert!(matches!(table.run_round(), Err(TableError::Bid(_))));
    }

    #[test]
    fn illegal_bid_is_surfaced() {
        let mut table = seated([2, 1, 0]);
        assert_eq!(
            table.bid(),
            Err(BidError::NotHigher {
                bid: 1,
                standing: 2
            })
        );
    }

    #[test]
    fn pass_on_lead_is_rejected() {
        let mut table = seated([3, 0, 0]);
        table.bid().unwrap();
        assert_eq!(table.play(), Ok(PlayResult::Continue));

        let mut agents = [3, 0, 0].map(Scripted::bidding);
        agents[0].pass_on_lead = true;
        let mut table = Table::with_seed(agents, 3);
        table.bid().unwrap();
        assert_eq!(table.play(), Err(PlayError::PassForbidden(Seat::East)));
    }

    #[test]
    fn run_round_reaches_a_winner() {
        let mut table = seated([1, 2, 0]);
        let summary = table.run_round().unwrap();
        assert_eq!(summary.landlord, Seat::South);
        assert_eq!(summary.winner, Seat::South);
        assert_eq!(summary.plays, [0, 20, 0]);
        assert_eq!(summary.scores.iter().sum::<i32>(), 0);
        assert!(summary.spring);
        assert!(table.play().is_err());

        for seat in Seat::LOOP {
            assert!(matches!(
                table.agent(seat).events.last(),
                Some(RoundEvent::RoundEnded { winner: Seat::South, .. })
            ));
        }
    }

    #[test]
    fn reset_rotates_agents() {
        let mut table = seated([1, 2, 3]);
        table.reset();
        assert_eq!(table.round_number(), 2);
        assert_eq!(table.agent(Seat::East).bid, 2);
        assert_eq!(table.agent(Seat::South).bid, 3);
        assert_eq!(table.agent(Seat::West).bid, 1);
        assert_eq!(table.phase(), RoundPhase::Ready);
    }
}
