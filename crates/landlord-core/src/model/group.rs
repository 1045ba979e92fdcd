//! Card group taxonomy and the "beats" relation.
//!
//! Every variant carries the concrete cards it consumes. Groups built through
//! the constructors here (and everything produced by the enumerator or the
//! matcher) keep `cards` in canonical order: main cards ascending, then the
//! attachments in ascending rank order, so two equal plays compare equal.

use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

const ROCKET_CARDS: [Rank; 2] = [Rank::BlackJoker, Rank::RedJoker];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalKind {
    Single,
    Double,
    Triple,
    Bomb,
}

impl NormalKind {
    /// Cards of the rank this kind consumes.
    pub const fn width(self) -> u8 {
        match self {
            NormalKind::Single => 1,
            NormalKind::Double => 2,
            NormalKind::Triple => 3,
            NormalKind::Bomb => 4,
        }
    }

    pub const fn from_width(width: u8) -> Option<Self> {
        match width {
            1 => Some(NormalKind::Single),
            2 => Some(NormalKind::Double),
            3 => Some(NormalKind::Triple),
            4 => Some(NormalKind::Bomb),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StraightKind {
    SingleSeq,
    DoubleSeq,
    TripleSeq,
}

impl StraightKind {
    pub const ALL: [StraightKind; 3] = [
        StraightKind::SingleSeq,
        StraightKind::DoubleSeq,
        StraightKind::TripleSeq,
    ];

    pub const fn width(self) -> u8 {
        match self {
            StraightKind::SingleSeq => 1,
            StraightKind::DoubleSeq => 2,
            StraightKind::TripleSeq => 3,
        }
    }

    /// Shortest legal run for this arity.
    pub const fn min_length(self) -> u8 {
        match self {
            StraightKind::SingleSeq => 5,
            StraightKind::DoubleSeq => 3,
            StraightKind::TripleSeq => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeKind {
    TripleWithAttachment,
    SeqTripleWithAttachment,
    BombWithAttachment,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardGroup {
    Pass,
    Rocket,
    Normal {
        kind: NormalKind,
        rank: Rank,
        cards: Vec<Rank>,
    },
    Straight {
        kind: StraightKind,
        length: u8,
        high: Rank,
        cards: Vec<Rank>,
    },
    Composite {
        kind: CompositeKind,
        main: Box<CardGroup>,
        attachments: Vec<CardGroup>,
        cards: Vec<Rank>,
    },
}

/// Shape parameters two groups must share before their ranks are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Pass,
    Rocket,
    Normal(NormalKind),
    Straight {
        kind: StraightKind,
        length: u8,
    },
    Composite {
        kind: CompositeKind,
        main_length: u8,
        attachments: u8,
        attachment_width: u8,
    },
}

impl CardGroup {
    pub fn normal(kind: NormalKind, rank: Rank) -> Self {
        CardGroup::Normal {
            kind,
            rank,
            cards: vec![rank; kind.width() as usize],
        }
    }

    /// Run of `length` ranks starting at `low`; `None` when it is too short or
    /// leaves the 3..A window.
    pub fn straight(kind: StraightKind, low: Rank, length: u8) -> Option<Self> {
        if length < kind.min_length() || !low.in_sequence() {
            return None;
        }
        let high_index = low.index() + length as usize - 1;
        let high = Rank::from_index(high_index).filter(|rank| rank.in_sequence())?;
        let mut cards = Vec::with_capacity(length as usize * kind.width() as usize);
        for index in low.index()..=high_index {
            let rank = Rank::ORDERED[index];
            cards.extend(std::iter::repeat(rank).take(kind.width() as usize));
        }
        Some(CardGroup::Straight {
            kind,
            length,
            high,
            cards,
        })
    }

    pub fn composite(kind: CompositeKind, main: CardGroup, mut attachments: Vec<CardGroup>) -> Self {
        attachments.sort_by_key(|group| group.rank());
        let mut cards = main.cards().to_vec();
        for attachment in &attachments {
            cards.extend_from_slice(attachment.cards());
        }
        CardGroup::Composite {
            kind,
            main: Box::new(main),
            attachments,
            cards,
        }
    }

    pub fn cards(&self) -> &[Rank] {
        match self {
            CardGroup::Pass => &[],
            CardGroup::Rocket => &ROCKET_CARDS,
            CardGroup::Normal { cards, .. }
            | CardGroup::Straight { cards, .. }
            | CardGroup::Composite { cards, .. } => cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CardGroup::Pass)
    }

    pub fn is_rocket(&self) -> bool {
        matches!(self, CardGroup::Rocket)
    }

    pub fn is_bomb(&self) -> bool {
        matches!(
            self,
            CardGroup::Normal {
                kind: NormalKind::Bomb,
                ..
            }
        )
    }

    /// The rank a same-shape comparison is decided on.
    pub fn rank(&self) -> Option<Rank> {
        match self {
            CardGroup::Pass => None,
            CardGroup::Rocket => Some(Rank::RedJoker),
            CardGroup::Normal { rank, .. } => Some(*rank),
            CardGroup::Straight { high, .. } => Some(*high),
            CardGroup::Composite { main, .. } => main.rank(),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            CardGroup::Pass => Shape::Pass,
            CardGroup::Rocket => Shape::Rocket,
            CardGroup::Normal { kind, .. } => Shape::Normal(*kind),
            CardGroup::Straight { kind, length, .. } => Shape::Straight {
                kind: *kind,
                length: *length,
            },
            CardGroup::Composite {
                kind,
                main,
                attachments,
                ..
            } => Shape::Composite {
                kind: *kind,
                main_length: match main.as_ref() {
                    CardGroup::Straight { length, .. } => *length,
                    _ => 1,
                },
                attachments: attachments.len() as u8,
                attachment_width: attachments.first().map_or(0, |a| a.len() as u8),
            },
        }
    }

    /// Whether a bomb or the rocket, which may answer any shape.
    pub fn overrides_shape(&self) -> bool {
        self.is_bomb() || self.is_rocket()
    }

    /// Strict supremacy of `self` over `other`.
    ///
    /// Groups of different shapes never beat each other unless one side is a
    /// bomb or the rocket; callers that need to distinguish a shape mismatch
    /// from a weaker play check [`CardGroup::shape`] first.
    pub fn beats(&self, other: &CardGroup) -> bool {
        match (self, other) {
            (CardGroup::Pass, _) => false,
            (_, CardGroup::Pass) => true,
            (CardGroup::Rocket, CardGroup::Rocket) => false,
            (CardGroup::Rocket, _) => true,
            (_, CardGroup::Rocket) => false,
            _ if self.is_bomb() && !other.is_bomb() => true,
            _ if other.is_bomb() && !self.is_bomb() => false,
            _ => self.shape() == other.shape() && self.rank() > other.rank(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardGroup::Pass => "Pass",
            CardGroup::Rocket => "Rocket",
            CardGroup::Normal { kind, .. } => match kind {
                NormalKind::Single => "Single",
                NormalKind::Double => "Double",
                NormalKind::Triple => "Triple",
                NormalKind::Bomb => "Bomb",
            },
            CardGroup::Straight { kind, .. } => match kind {
                StraightKind::SingleSeq => "SingleSeq",
                StraightKind::DoubleSeq => "DoubleSeq",
                StraightKind::TripleSeq => "TripleSeq",
            },
            CardGroup::Composite { kind, .. } => match kind {
                CompositeKind::TripleWithAttachment => "TripleWithAttachment",
                CompositeKind::SeqTripleWithAttachment => "SeqTripleWithAttachment",
                CompositeKind::BombWithAttachment => "BombWithAttachment",
            },
        }
    }
}

impl fmt::Display for CardGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())?;
        if self.is_pass() {
            return Ok(());
        }
        f.write_str(" [")?;
        for (i, card) in self.cards().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}
