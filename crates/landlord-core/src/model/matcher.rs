//! Exact classification of an arbitrary card list as one group.

use crate::model::counts::RankCounts;
use crate::model::group::{CardGroup, CompositeKind, NormalKind, StraightKind};
use crate::model::rank::Rank;

/// Returns the single group `cards` constitutes, or `None` when the cards
/// form no legal group.
///
/// Checks run in a fixed order: empty, rocket, bomb, one distinct rank,
/// triple with attachment, sequences by arity (singles, pairs, triples),
/// triple sequence with attachments, then bomb with two attachments.
pub fn match_exact(cards: &[Rank]) -> Option<CardGroup> {
    if cards.is_empty() {
        return Some(CardGroup::Pass);
    }

    let counts = RankCounts::from_cards(cards);
    let present: Vec<(Rank, u8)> = counts.present().collect();
    if present.iter().any(|(rank, count)| *count > rank.copies()) {
        return None;
    }

    if cards.len() == 2 && counts.get(Rank::BlackJoker) == 1 && counts.get(Rank::RedJoker) == 1 {
        return Some(CardGroup::Rocket);
    }

    if let [(rank, count)] = present.as_slice() {
        return NormalKind::from_width(*count).map(|kind| CardGroup::normal(kind, *rank));
    }

    if let [first, second] = present.as_slice() {
        let (main, other) = if first.1 >= second.1 {
            (first, second)
        } else {
            (second, first)
        };
        if main.1 == 3 && (other.1 == 1 || other.1 == 2) {
            return Some(with_attachments(
                CompositeKind::TripleWithAttachment,
                CardGroup::normal(NormalKind::Triple, main.0),
                &[*other],
            ));
        }
    }

    for kind in StraightKind::ALL {
        if let Some(run) = match_straight(&present, kind) {
            return Some(run);
        }
    }

    if let Some(plane) = match_triple_run_with_attachments(&present) {
        return Some(plane);
    }

    match_bomb_with_attachments(&present)
}

/// True when the group's cards are exactly the multiset its shape implies.
pub fn is_well_formed(group: &CardGroup) -> bool {
    match_exact(group.cards()).as_ref() == Some(group)
}

fn match_straight(present: &[(Rank, u8)], kind: StraightKind) -> Option<CardGroup> {
    if present.len() < kind.min_length() as usize {
        return None;
    }
    if present.iter().any(|(_, count)| *count != kind.width()) {
        return None;
    }
    let ranks: Vec<Rank> = present.iter().map(|(rank, _)| *rank).collect();
    if !is_run(&ranks) {
        return None;
    }
    CardGroup::straight(kind, ranks[0], ranks.len() as u8)
}

fn match_triple_run_with_attachments(present: &[(Rank, u8)]) -> Option<CardGroup> {
    let mains: Vec<Rank> = present
        .iter()
        .filter(|(_, count)| *count == 3)
        .map(|(rank, _)| *rank)
        .collect();
    if mains.len() < StraightKind::TripleSeq.min_length() as usize || !is_run(&mains) {
        return None;
    }

    let rest: Vec<(Rank, u8)> = present
        .iter()
        .copied()
        .filter(|(_, count)| *count != 3)
        .collect();
    if rest.len() != mains.len() {
        return None;
    }
    let width = rest[0].1;
    if !(width == 1 || width == 2) || rest.iter().any(|(_, count)| *count != width) {
        return None;
    }

    let run = CardGroup::straight(StraightKind::TripleSeq, mains[0], mains.len() as u8)?;
    Some(with_attachments(
        CompositeKind::SeqTripleWithAttachment,
        run,
        &rest,
    ))
}

fn match_bomb_with_attachments(present: &[(Rank, u8)]) -> Option<CardGroup> {
    if present.len() != 3 {
        return None;
    }
    let four = present.iter().find(|(_, count)| *count == 4)?;
    let others: Vec<(Rank, u8)> = present
        .iter()
        .copied()
        .filter(|(rank, _)| *rank != four.0)
        .collect();
    let width = others[0].1;
    if others.len() != 2 || others[1].1 != width || !(width == 1 || width == 2) {
        return None;
    }
    Some(with_attachments(
        CompositeKind::BombWithAttachment,
        CardGroup::normal(NormalKind::Bomb, four.0),
        &others,
    ))
}

fn with_attachments(kind: CompositeKind, main: CardGroup, parts: &[(Rank, u8)]) -> CardGroup {
    let attachments = parts
        .iter()
        .filter_map(|(rank, count)| NormalKind::from_width(*count).map(|k| CardGroup::normal(k, *rank)))
        .collect();
    CardGroup::composite(kind, main, attachments)
}

/// Ascending, gap-free and inside 3..A.
fn is_run(ranks: &[Rank]) -> bool {
    ranks.iter().all(|rank| rank.in_sequence())
        && ranks.windows(2).all(|pair| pair[1].index() == pair[0].index() + 1)
}
