use crate::model::rank::Rank;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const WINDOW_CAPACITY: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub seat: Seat,
    pub cards: Vec<Rank>,
}

/// Most recent plays, oldest evicted once `WINDOW_CAPACITY` is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayWindow {
    entries: VecDeque<WindowEntry>,
}

impl PlayWindow {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    pub fn push(&mut self, seat: Seat, cards: &[Rank]) {
        while self.entries.len() >= WINDOW_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(WindowEntry {
            seat,
            cards: cards.to_vec(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &WindowEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&WindowEntry> {
        self.entries.back()
    }
}
