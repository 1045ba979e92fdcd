use crate::game::events::RoundEvent;
use crate::model::deck::Deck;
use crate::model::group::CardGroup;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::round::{HAND_SIZE, KITTY_SIZE};
use crate::model::seat::Seat;
use crate::model::window::PlayWindow;
use serde::Serialize;

/// What one seat knows about a neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpponentView {
    pub seat: Seat,
    pub is_landlord: bool,
    pub last_move: Option<CardGroup>,
    pub played: Vec<Rank>,
    pub remaining: usize,
}

impl OpponentView {
    fn new(seat: Seat) -> Self {
        Self {
            seat,
            is_landlord: false,
            last_move: None,
            played: Vec::new(),
            remaining: HAND_SIZE,
        }
    }
}

/// Live record of everything a seat has observed during the current round.
///
/// The record is rebuilt on `Dealt` and mutated by every later event. Use
/// [`SeatBelief::duplicate`] to freeze a copy before the live record moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatBelief {
    seat: Seat,
    is_landlord: bool,
    hand: Hand,
    last_move: Option<CardGroup>,
    played: Vec<Rank>,
    /// `[previous, next]` in turn order.
    opponents: [OpponentView; 2],
    bids: [Option<u8>; 3],
    landlord: Option<Seat>,
    kitty: Option<[Rank; KITTY_SIZE]>,
    unseen: Hand,
    bombs_seen: Vec<Rank>,
    rocket_seen: bool,
    table: Option<(Seat, CardGroup)>,
    passes: u8,
    window: PlayWindow,
    winner: Option<Seat>,
}

impl SeatBelief {
    pub fn new(seat: Seat) -> Self {
        Self::dealt(seat, Vec::new())
    }

    pub fn dealt(seat: Seat, cards: Vec<Rank>) -> Self {
        let hand = Hand::with_cards(cards);
        let mut unseen = Hand::with_cards(Deck::standard().cards().to_vec());
        unseen.remove_present(hand.cards());
        Self {
            seat,
            is_landlord: false,
            hand,
            last_move: None,
            played: Vec::new(),
            opponents: [
                OpponentView::new(seat.previous()),
                OpponentView::new(seat.next()),
            ],
            bids: [None; 3],
            landlord: None,
            kitty: None,
            unseen,
            bombs_seen: Vec::new(),
            rocket_seen: false,
            table: None,
            passes: 0,
            window: PlayWindow::new(),
            winner: None,
        }
    }

    pub fn apply(&mut self, event: &RoundEvent) {
        match event {
            // Only the receiving seat is told its deal, and seats move
            // between rounds.
            RoundEvent::Dealt { seat, hand } => {
                *self = Self::dealt(*seat, hand.clone());
            }
            RoundEvent::BidPlaced { seat, bid } => {
                self.bids[seat.index()] = Some(*bid);
            }
            RoundEvent::LandlordDecided { landlord, kitty } => {
                self.landlord = Some(*landlord);
                self.kitty = Some(*kitty);
                if *landlord == self.seat {
                    self.is_landlord = true;
                    self.hand.extend(kitty);
                    self.unseen.remove_present(kitty);
                } else if let Some(view) = self.opponent_mut(*landlord) {
                    view.is_landlord = true;
                    view.remaining += KITTY_SIZE;
                }
            }
            RoundEvent::Played { seat, group: None } => {
                if *seat == self.seat {
                    self.last_move = Some(CardGroup::Pass);
                } else if let Some(view) = self.opponent_mut(*seat) {
                    view.last_move = Some(CardGroup::Pass);
                }
                self.passes += 1;
                if self.passes >= 2 {
                    self.table = None;
                    self.passes = 0;
                }
            }
            RoundEvent::Played {
                seat,
                group: Some(group),
            } => self.record_play(*seat, group),
            RoundEvent::RoundEnded { winner, .. } => {
                self.winner = Some(*winner);
            }
        }
    }

    fn record_play(&mut self, seat: Seat, group: &CardGroup) {
        let cards = group.cards();
        if seat == self.seat {
            self.hand.remove_present(cards);
            self.played.extend_from_slice(cards);
            self.last_move = Some(group.clone());
        } else {
            self.unseen.remove_present(cards);
            if let Some(view) = self.opponent_mut(seat) {
                view.played.extend_from_slice(cards);
                view.remaining = view.remaining.saturating_sub(cards.len());
                view.last_move = Some(group.clone());
            }
        }

        if group.is_bomb() {
            if let Some(rank) = group.rank() {
                self.bombs_seen.push(rank);
            }
        } else if group.is_rocket() {
            self.rocket_seen = true;
        }
        self.window.push(seat, cards);
        self.table = Some((seat, group.clone()));
        self.passes = 0;
    }

    fn opponent_mut(&mut self, seat: Seat) -> Option<&mut OpponentView> {
        self.opponents.iter_mut().find(|view| view.seat == seat)
    }

    /// Independent deep copy for later learning.
    pub fn duplicate(&self) -> SeatSnapshot {
        SeatSnapshot {
            belief: self.clone(),
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn is_landlord(&self) -> bool {
        self.is_landlord
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn remaining(&self) -> usize {
        self.hand.len()
    }

    pub fn last_move(&self) -> Option<&CardGroup> {
        self.last_move.as_ref()
    }

    pub fn played(&self) -> &[Rank] {
        &self.played
    }

    pub fn opponents(&self) -> &[OpponentView; 2] {
        &self.opponents
    }

    pub fn opponent(&self, seat: Seat) -> Option<&OpponentView> {
        self.opponents.iter().find(|view| view.seat == seat)
    }

    pub fn bids(&self) -> [Option<u8>; 3] {
        self.bids
    }

    pub fn landlord(&self) -> Option<Seat> {
        self.landlord
    }

    pub fn kitty(&self) -> Option<&[Rank; KITTY_SIZE]> {
        self.kitty.as_ref()
    }

    /// Cards this seat has not seen: the deck minus its own hand, minus
    /// everything the others have played. Includes the kitty while it is
    /// still hidden or held by another seat.
    pub fn unseen(&self) -> &Hand {
        &self.unseen
    }

    pub fn bombs_seen(&self) -> &[Rank] {
        &self.bombs_seen
    }

    pub fn rocket_seen(&self) -> bool {
        self.rocket_seen
    }

    /// Group currently standing on the table and who played it.
    pub fn table(&self) -> Option<(Seat, &CardGroup)> {
        self.table.as_ref().map(|(seat, group)| (*seat, group))
    }

    pub fn window(&self) -> &PlayWindow {
        &self.window
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Whether this seat shares the landlord's side with `other`.
    pub fn is_partner(&self, other: Seat) -> bool {
        match self.landlord {
            Some(landlord) => other != self.seat && other != landlord && self.seat != landlord,
            None => false,
        }
    }
}

/// Frozen view of a [`SeatBelief`] taken when a decision was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatSnapshot {
    belief: SeatBelief,
}

impl SeatSnapshot {
    pub fn belief(&self) -> &SeatBelief {
        &self.belief
    }
}

#[cfg(test)]
mod tests {
    use super::SeatBelief;
    use crate::game::events::RoundEvent;
    use crate::model::group::{CardGroup, NormalKind};
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;

    fn dealt_south() -> SeatBelief {
        let cards = Rank::parse_list("3 3 4 5 6 7 8 9 10 J Q K A 2 2 BJ 9").unwrap();
        let mut belief = SeatBelief::new(Seat::South);
        belief.apply(&RoundEvent::Dealt {
            seat: Seat::South,
            hand: cards,
        });
        belief
    }

    #[test]
    fn deal_fills_hand_and_unseen() {
        let belief = dealt_south();
        assert_eq!(belief.hand().len(), 17);
        assert_eq!(belief.unseen().len(), 37);
        assert_eq!(belief.opponents()[0].seat, Seat::East);
        assert_eq!(belief.opponents()[1].seat, Seat::West);
        assert!(belief.unseen().cards().contains(&Rank::RedJoker));
        assert!(!belief.unseen().cards().contains(&Rank::BlackJoker));
    }

    #[test]
    fn kitty_moves_into_own_hand() {
        let mut belief = dealt_south();
        let kitty = [Rank::Four, Rank::Four, Rank::RedJoker];
        belief.apply(&RoundEvent::LandlordDecided {
            landlord: Seat::South,
            kitty,
        });
        assert!(belief.is_landlord());
        assert_eq!(belief.remaining(), 20);
        assert_eq!(belief.unseen().len(), 34);
        assert_eq!(belief.kitty(), Some(&kitty));
    }

    #[test]
    fn opponent_landlord_holds_twenty() {
        let mut belief = dealt_south();
        belief.apply(&RoundEvent::LandlordDecided {
            landlord: Seat::West,
            kitty: [Rank::Four, Rank::Four, Rank::RedJoker],
        });
        assert!(!belief.is_landlord());
        assert_eq!(belief.opponent(Seat::West).unwrap().remaining, 20);
        assert_eq!(belief.unseen().len(), 37);
        assert!(belief.is_partner(Seat::East));
        assert!(!belief.is_partner(Seat::West));
    }

    #[test]
    fn plays_update_views_and_window() {
        let mut belief = dealt_south();
        belief.apply(&RoundEvent::LandlordDecided {
            landlord: Seat::East,
            kitty: [Rank::Five, Rank::Six, Rank::Seven],
        });
        let bomb = CardGroup::normal(NormalKind::Bomb, Rank::Jack);
        belief.apply(&RoundEvent::Played {
            seat: Seat::East,
            group: Some(bomb.clone()),
        });
        let east = belief.opponent(Seat::East).unwrap();
        assert_eq!(east.remaining, 16);
        assert_eq!(east.last_move.as_ref(), Some(&bomb));
        assert_eq!(belief.bombs_seen(), &[Rank::Jack]);
        assert_eq!(belief.table(), Some((Seat::East, &bomb)));

        belief.apply(&RoundEvent::Played {
            seat: Seat::South,
            group: None,
        });
        belief.apply(&RoundEvent::Played {
            seat: Seat::West,
            group: None,
        });
        assert!(belief.table().is_none());
        assert_eq!(belief.last_move(), Some(&CardGroup::Pass));
        assert_eq!(belief.window().len(), 1);
    }

    #[test]
    fn duplicate_is_unaffected_by_later_events() {
        let mut belief = dealt_south();
        let frozen = belief.duplicate();
        belief.apply(&RoundEvent::BidPlaced {
            seat: Seat::East,
            bid: 2,
        });
        belief.apply(&RoundEvent::LandlordDecided {
            landlord: Seat::South,
            kitty: [Rank::Four, Rank::Four, Rank::RedJoker],
        });
        belief.apply(&RoundEvent::Played {
            seat: Seat::South,
            group: Some(CardGroup::normal(NormalKind::Double, Rank::Two)),
        });

        let before = frozen.belief();
        assert_eq!(before.hand().len(), 17);
        assert_eq!(before.bids(), [None; 3]);
        assert!(before.window().is_empty());
        assert!(!before.is_landlord());
        assert_eq!(before, &dealt_south());
        assert_ne!(belief.hand(), before.hand());
    }

    #[test]
    fn new_deal_moves_the_belief_to_its_seat() {
        let mut belief = dealt_south();
        belief.apply(&RoundEvent::BidPlaced {
            seat: Seat::East,
            bid: 1,
        });
        belief.apply(&RoundEvent::Dealt {
            seat: Seat::West,
            hand: Rank::parse_list("5 6 7").unwrap(),
        });
        assert_eq!(belief.seat(), Seat::West);
        assert_eq!(belief.hand().len(), 3);
        assert_eq!(belief.bids(), [None; 3]);
        assert_eq!(belief.opponents()[0].seat, Seat::South);
        assert_eq!(belief.opponents()[1].seat, Seat::East);
    }
}
