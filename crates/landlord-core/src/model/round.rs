use crate::model::bidding::{BidError, BiddingRecord};
use crate::model::deck::Deck;
use crate::model::group::CardGroup;
use crate::model::hand::Hand;
use crate::model::matcher::is_well_formed;
use crate::model::rank::Rank;
use crate::model::score::{RoundScore, SettlementInput};
use crate::model::seat::Seat;
use crate::model::window::PlayWindow;
use serde::{Deserialize, Serialize};
use std::array;
use thiserror::Error;

pub const HAND_SIZE: usize = 17;
pub const KITTY_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Ready,
    Bidding,
    Playing,
    Ended,
}

/// Who may pass.
///
/// `Free` means the acting seat leads and must play. After a play the table
/// is `Contested`; one pass makes it `PassedOnce`, and a second consecutive
/// pass clears the table and hands a free lead to the seat that played last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadState {
    Free,
    Contested,
    PassedOnce,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePlay {
    pub seat: Seat,
    pub group: CardGroup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidOutcome {
    Pending { next: Seat },
    Landlord { seat: Seat, kitty: [Rank; KITTY_SIZE] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Passed { lead_restored: bool },
    Played,
    Won(Seat),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("the round is not in the playing phase")]
    NotInPlayPhase,
    #[error("expected {expected} to play but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("{0} leads and may not pass")]
    PassForbidden(Seat),
    #[error("cards do not form the group they claim: {0}")]
    Malformed(CardGroup),
    #[error("{played} does not match the shape of {table}")]
    ShapeMismatch { table: CardGroup, played: CardGroup },
    #[error("{played} does not beat {table}")]
    DoesNotBeat { table: CardGroup, played: CardGroup },
    #[error("{seat} does not hold {group}")]
    CardsNotInHand { seat: Seat, group: CardGroup },
}

/// Everything that belongs to one deal, from shuffle to settlement.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 3],
    kitty: [Rank; KITTY_SIZE],
    bidding: BiddingRecord,
    landlord: Option<Seat>,
    turn: Seat,
    table: Option<TablePlay>,
    lead: LeadState,
    bombs: u32,
    rocket_used: u32,
    history: [Vec<CardGroup>; 3],
    window: PlayWindow,
    phase: RoundPhase,
    winner: Option<Seat>,
}

impl RoundState {
    /// Seventeen cards to each seat in deck order, the last three to the kitty.
    pub fn deal(deck: &Deck) -> Self {
        let cards = deck.cards();
        let hands = array::from_fn(|i| {
            Hand::with_cards(cards[i * HAND_SIZE..(i + 1) * HAND_SIZE].to_vec())
        });
        let mut kitty = [Rank::Three; KITTY_SIZE];
        kitty.copy_from_slice(&cards[3 * HAND_SIZE..3 * HAND_SIZE + KITTY_SIZE]);
        kitty.sort();

        Self {
            hands,
            kitty,
            bidding: BiddingRecord::new(),
            landlord: None,
            turn: Seat::East,
            table: None,
            lead: LeadState::Free,
            bombs: 0,
            rocket_used: 0,
            history: array::from_fn(|_| Vec::new()),
            window: PlayWindow::new(),
            phase: RoundPhase::Ready,
            winner: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn kitty(&self) -> &[Rank; KITTY_SIZE] {
        &self.kitty
    }

    pub fn bidding(&self) -> &BiddingRecord {
        &self.bidding
    }

    pub fn landlord(&self) -> Option<Seat> {
        self.landlord
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn table(&self) -> Option<&TablePlay> {
        self.table.as_ref()
    }

    pub fn lead(&self) -> LeadState {
        self.lead
    }

    pub fn must_play(&self) -> bool {
        self.lead == LeadState::Free
    }

    pub fn bombs(&self) -> u32 {
        self.bombs
    }

    pub fn rocket_used(&self) -> u32 {
        self.rocket_used
    }

    pub fn history(&self, seat: Seat) -> &[CardGroup] {
        &self.history[seat.index()]
    }

    pub fn window(&self) -> &PlayWindow {
        &self.window
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn place_bid(&mut self, seat: Seat, value: u8) -> Result<BidOutcome, BidError> {
        match self.phase {
            RoundPhase::Ready => self.phase = RoundPhase::Bidding,
            RoundPhase::Bidding => {}
            RoundPhase::Playing | RoundPhase::Ended => return Err(BidError::NotInBiddingPhase),
        }

        self.bidding.record(seat, value)?;
        self.turn = seat.next();

        if let Some(landlord) = self.bidding.landlord() {
            self.assign_landlord(landlord);
            return Ok(BidOutcome::Landlord {
                seat: landlord,
                kitty: self.kitty,
            });
        }
        if self.bidding.all_passed() {
            return Err(BidError::AllPassed);
        }
        Ok(BidOutcome::Pending { next: self.turn })
    }

    fn assign_landlord(&mut self, landlord: Seat) {
        self.hands[landlord.index()].extend(&self.kitty);
        self.landlord = Some(landlord);
        self.turn = landlord;
        self.lead = LeadState::Free;
        self.phase = RoundPhase::Playing;
    }

    /// Applies one seat's turn: a pass or a group from its hand.
    pub fn play(&mut self, seat: Seat, group: CardGroup) -> Result<PlayOutcome, PlayError> {
        if self.phase != RoundPhase::Playing {
            return Err(PlayError::NotInPlayPhase);
        }
        if seat != self.turn {
            return Err(PlayError::OutOfTurn {
                expected: self.turn,
                actual: seat,
            });
        }

        if group.is_pass() {
            let lead_restored = match self.lead {
                LeadState::Free => return Err(PlayError::PassForbidden(seat)),
                LeadState::Contested => {
                    self.lead = LeadState::PassedOnce;
                    false
                }
                LeadState::PassedOnce => {
                    self.lead = LeadState::Free;
                    self.table = None;
                    true
                }
            };
            self.turn = seat.next();
            return Ok(PlayOutcome::Passed { lead_restored });
        }

        if !is_well_formed(&group) {
            return Err(PlayError::Malformed(group));
        }

        if let Some(table) = &self.table {
            if !group.overrides_shape() && !same_shape(&group, &table.group) {
                return Err(PlayError::ShapeMismatch {
                    table: table.group.clone(),
                    played: group,
                });
            }
            if !group.beats(&table.group) {
                return Err(PlayError::DoesNotBeat {
                    table: table.group.clone(),
                    played: group,
                });
            }
        }

        if !self.hands[seat.index()].remove_all(group.cards()) {
            return Err(PlayError::CardsNotInHand { seat, group });
        }

        if group.is_bomb() {
            self.bombs += 1;
        } else if group.is_rocket() {
            self.rocket_used += 1;
        }
        self.window.push(seat, group.cards());
        self.history[seat.index()].push(group.clone());
        self.table = Some(TablePlay { seat, group });
        self.lead = LeadState::Contested;

        if self.hands[seat.index()].is_empty() {
            self.phase = RoundPhase::Ended;
            self.winner = Some(seat);
            return Ok(PlayOutcome::Won(seat));
        }

        self.turn = seat.next();
        Ok(PlayOutcome::Played)
    }

    /// Final scores once a seat has emptied its hand.
    pub fn settle(&self) -> Option<RoundScore> {
        let landlord = self.landlord?;
        let winner = self.winner?;
        Some(RoundScore::settle(SettlementInput {
            landlord,
            winner,
            bid: self.bidding.bid(landlord).unwrap_or(0),
            bombs: self.bombs,
            rocket_used: self.rocket_used > 0,
            plays: array::from_fn(|i| self.history[i].len()),
        }))
    }
}

fn same_shape(a: &CardGroup, b: &CardGroup) -> bool {
    a.shape() == b.shape()
}
