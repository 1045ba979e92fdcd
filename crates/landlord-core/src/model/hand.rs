use crate::model::counts::RankCounts;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// Sorted multiset of ranks held by one seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Rank>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Rank>) -> Self {
        let mut hand = Self { cards };
        hand.cards.sort();
        hand
    }

    pub fn extend(&mut self, cards: &[Rank]) {
        self.cards.extend_from_slice(cards);
        self.cards.sort();
    }

    /// Removes every card in `cards`, or nothing when any is missing.
    pub fn remove_all(&mut self, cards: &[Rank]) -> bool {
        if !self.contains_all(cards) {
            return false;
        }
        self.remove_present(cards);
        true
    }

    /// Removes whichever of `cards` are present; returns how many were removed.
    pub fn remove_present(&mut self, cards: &[Rank]) -> usize {
        let mut removed = 0;
        for card in cards {
            if let Some(index) = self.cards.iter().position(|c| c == card) {
                self.cards.remove(index);
                removed += 1;
            }
        }
        removed
    }

    pub fn contains_all(&self, cards: &[Rank]) -> bool {
        self.counts().covers(&RankCounts::from_cards(cards))
    }

    pub fn counts(&self) -> RankCounts {
        RankCounts::from_cards(&self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rank> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }
}
