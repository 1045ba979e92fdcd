use crate::model::rank::Rank;

/// Multiplicity of each rank in a card multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RankCounts {
    counts: [u8; Rank::COUNT],
}

impl RankCounts {
    pub fn from_cards(cards: &[Rank]) -> Self {
        let mut counts = [0u8; Rank::COUNT];
        for card in cards {
            counts[card.index()] = counts[card.index()].saturating_add(1);
        }
        Self { counts }
    }

    pub fn get(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    /// Ranks present at least once, ascending.
    pub fn present(&self) -> impl Iterator<Item = (Rank, u8)> + '_ {
        Rank::ORDERED
            .iter()
            .copied()
            .map(|rank| (rank, self.get(rank)))
            .filter(|(_, count)| *count > 0)
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when `other` fits inside `self` rank by rank.
    pub fn covers(&self, other: &RankCounts) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(have, need)| have >= need)
    }
}
