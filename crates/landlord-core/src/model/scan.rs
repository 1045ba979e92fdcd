//! Move enumeration: every legal group obtainable from a hand.

use crate::model::counts::RankCounts;
use crate::model::group::{CardGroup, CompositeKind, NormalKind, StraightKind};
use crate::model::rank::Rank;
use itertools::Itertools;

/// Lists every legal candidate group the hand can form.
///
/// The hand is read-only; rank counts are consulted, never consumed, so a
/// rank held four times shows up as a bomb and independently inside pairs,
/// triples and sequences. The output holds one group per distinct shape and
/// card set, in a fixed order: rocket, plain groups by arity, triples with an
/// attachment, sequences by arity, triple sequences with attachments, bombs
/// with attachments.
pub fn enumerate(hand: &[Rank]) -> Vec<CardGroup> {
    let counts = RankCounts::from_cards(hand);
    let mut groups = Vec::new();

    if counts.get(Rank::BlackJoker) > 0 && counts.get(Rank::RedJoker) > 0 {
        groups.push(CardGroup::Rocket);
    }

    let singles = plain_groups(&counts, NormalKind::Single);
    let doubles = plain_groups(&counts, NormalKind::Double);
    let triples = plain_groups(&counts, NormalKind::Triple);
    let bombs = plain_groups(&counts, NormalKind::Bomb);
    groups.extend(singles.iter().cloned());
    groups.extend(doubles.iter().cloned());
    groups.extend(triples.iter().cloned());
    groups.extend(bombs.iter().cloned());

    for pool in [&singles, &doubles] {
        for triple in &triples {
            for attachment in pool.iter().filter(|a| a.rank() != triple.rank()) {
                groups.push(CardGroup::composite(
                    CompositeKind::TripleWithAttachment,
                    triple.clone(),
                    vec![attachment.clone()],
                ));
            }
        }
    }

    let mut triple_runs = Vec::new();
    for kind in StraightKind::ALL {
        let runs = straights(&counts, kind);
        if kind == StraightKind::TripleSeq {
            triple_runs = runs.clone();
        }
        groups.extend(runs);
    }

    for pool in [&singles, &doubles] {
        for run in &triple_runs {
            let CardGroup::Straight { length, .. } = run else {
                continue;
            };
            let free: Vec<&CardGroup> = pool
                .iter()
                .filter(|a| !run.cards().contains(&a.cards()[0]))
                .collect();
            for chosen in free.iter().copied().combinations(*length as usize) {
                groups.push(CardGroup::composite(
                    CompositeKind::SeqTripleWithAttachment,
                    run.clone(),
                    chosen.into_iter().cloned().collect(),
                ));
            }
        }
    }

    for pool in [&singles, &doubles] {
        for bomb in &bombs {
            let free: Vec<&CardGroup> = pool.iter().filter(|a| a.rank() != bomb.rank()).collect();
            for chosen in free.iter().copied().combinations(2) {
                groups.push(CardGroup::composite(
                    CompositeKind::BombWithAttachment,
                    bomb.clone(),
                    chosen.into_iter().cloned().collect(),
                ));
            }
        }
    }

    groups
}

/// Candidates that answer `table`, plus `Pass` when passing is allowed.
pub fn legal_plays(hand: &[Rank], table: Option<&CardGroup>, must_play: bool) -> Vec<CardGroup> {
    let mut plays: Vec<CardGroup> = enumerate(hand)
        .into_iter()
        .filter(|group| table.is_none_or(|table| group.beats(table)))
        .collect();
    if !must_play {
        plays.push(CardGroup::Pass);
    }
    plays
}

fn plain_groups(counts: &RankCounts, kind: NormalKind) -> Vec<CardGroup> {
    counts
        .present()
        .filter(|(_, count)| *count >= kind.width())
        .map(|(rank, _)| CardGroup::normal(kind, rank))
        .collect()
}

/// Every run inside 3..A where each rank holds at least the kind's width.
fn straights(counts: &RankCounts, kind: StraightKind) -> Vec<CardGroup> {
    let mut runs = Vec::new();
    let window = &Rank::SEQUENCE;
    for start in 0..window.len() {
        let mut length = 0u8;
        for rank in &window[start..] {
            if counts.get(*rank) < kind.width() {
                break;
            }
            length += 1;
            if length >= kind.min_length() {
                runs.extend(CardGroup::straight(kind, window[start], length));
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::{enumerate, legal_plays};
    use crate::model::group::{CardGroup, CompositeKind, NormalKind, StraightKind};
    use crate::model::rank::Rank;

    fn hand(text: &str) -> Vec<Rank> {
        Rank::parse_list(text).unwrap()
    }

    #[test]
    fn full_house_hand_lists_every_piece() {
        let groups = enumerate(&hand("3 3 3 4 4"));
        let with_pair = CardGroup::composite(
            CompositeKind::TripleWithAttachment,
            CardGroup::normal(NormalKind::Triple, Rank::Three),
            vec![CardGroup::normal(NormalKind::Double, Rank::Four)],
        );
        assert!(groups.contains(&with_pair));
        assert!(groups.contains(&CardGroup::normal(NormalKind::Triple, Rank::Three)));
        assert!(groups.contains(&CardGroup::normal(NormalKind::Double, Rank::Four)));
        assert!(groups.contains(&CardGroup::normal(NormalKind::Single, Rank::Three)));
        assert!(groups.contains(&CardGroup::normal(NormalKind::Single, Rank::Four)));
        assert!(groups.contains(&CardGroup::normal(NormalKind::Double, Rank::Three)));
        // 3 singles/doubles/triples + triple with single 4 + triple with pair 4.
        assert_eq!(groups.len(), 7);
    }

    #[test]
    fn rocket_needs_both_jokers() {
        assert!(enumerate(&hand("BJ RJ 3")).contains(&CardGroup::Rocket));
        assert!(!enumerate(&hand("BJ 3")).contains(&CardGroup::Rocket));
    }

    #[test]
    fn sequences_list_every_sub_run() {
        let groups = enumerate(&hand("3 4 5 6 7 8"));
        let runs: Vec<_> = groups
            .iter()
            .filter(|g| matches!(g, CardGroup::Straight { .. }))
            .collect();
        // 3-7, 3-8, 4-8
        assert_eq!(runs.len(), 3);
        assert!(groups.contains(&CardGroup::straight(StraightKind::SingleSeq, Rank::Three, 6).unwrap()));
    }

    #[test]
    fn sequences_never_include_two() {
        let groups = enumerate(&hand("10 J Q K A 2"));
        let runs: Vec<_> = groups
            .iter()
            .filter(|g| matches!(g, CardGroup::Straight { .. }))
            .collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].rank(), Some(Rank::Ace));
    }

    #[test]
    fn triple_sequence_takes_distinct_attachments() {
        let groups = enumerate(&hand("5 5 5 6 6 6 3 4 4 9"));
        let airplanes: Vec<_> = groups
            .iter()
            .filter(|g| {
                matches!(
                    g,
                    CardGroup::Composite {
                        kind: CompositeKind::SeqTripleWithAttachment,
                        ..
                    }
                )
            })
            .collect();
        // singles {3,4,9} choose 2 = 3; doubles {4} cannot fill two slots.
        assert_eq!(airplanes.len(), 3);
        for plane in airplanes {
            let CardGroup::Composite { attachments, .. } = plane else {
                unreachable!();
            };
            assert_ne!(attachments[0].rank(), attachments[1].rank());
        }
    }

    #[test]
    fn triple_sequence_attachments_cover_every_subset() {
        let groups = enumerate(&hand("5 5 5 6 6 6 7 7 7 3 9 J Q"));
        let planes: Vec<_> = groups
            .iter()
            .filter(|g| {
                matches!(
                    g,
                    CardGroup::Composite {
                        kind: CompositeKind::SeqTripleWithAttachment,
                        ..
                    }
                )
            })
            .collect();
        // 5-6 and 6-7 take 2 of 5 free singles; 5-7 takes 3 of {3,9,J,Q}.
        assert_eq!(planes.len(), 24);
        let long = planes.iter().filter(|g| g.len() == 12).count();
        assert_eq!(long, 4);
    }

    #[test]
    fn bomb_takes_two_singles_or_two_pairs() {
        let groups = enumerate(&hand("7 7 7 7 3 3 4 4"));
        let four_with_two: Vec<_> = groups
            .iter()
            .filter(|g| {
                matches!(
                    g,
                    CardGroup::Composite {
                        kind: CompositeKind::BombWithAttachment,
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(four_with_two.len(), 2);
        assert!(four_with_two.iter().any(|g| g.len() == 6));
        assert!(four_with_two.iter().any(|g| g.len() == 8));
    }

    #[test]
    fn legal_plays_filter_by_table_and_allow_pass() {
        let table = CardGroup::normal(NormalKind::Double, Rank::Nine);
        let plays = legal_plays(&hand("4 4 10 10 K"), Some(&table), false);
        assert_eq!(
            plays,
            vec![CardGroup::normal(NormalKind::Double, Rank::Ten), CardGroup::Pass]
        );
        let lead = legal_plays(&hand("4"), None, true);
        assert_eq!(lead, vec![CardGroup::normal(NormalKind::Single, Rank::Four)]);
    }
}
