use landlord_core::game::agent::{BidRequest, PlayRequest, SeatAgent};
use landlord_core::game::events::RoundEvent;
use landlord_core::game::table::Table;
use landlord_core::model::counts::RankCounts;
use landlord_core::model::deck::Deck;
use landlord_core::model::group::{CardGroup, NormalKind, StraightKind};
use landlord_core::model::matcher::match_exact;
use landlord_core::model::rank::Rank;
use landlord_core::model::round::RoundState;
use landlord_core::model::scan::{enumerate, legal_plays};
use landlord_core::model::seat::Seat;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

fn random_hand(rng: &mut StdRng, size: usize) -> Vec<Rank> {
    let mut cards = Deck::standard().cards().to_vec();
    cards.shuffle(rng);
    cards.truncate(size);
    cards
}

#[test]
fn enumerated_groups_round_trip_and_fit_the_hand() {
    let mut rng = StdRng::seed_from_u64(20240601);
    for _ in 0..200 {
        let size = if rng.gen_range(0..2) == 0 { 17 } else { 20 };
        let hand = random_hand(&mut rng, size);
        let available = RankCounts::from_cards(&hand);
        let groups = enumerate(&hand);

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(!group.is_pass());
            assert_eq!(match_exact(group.cards()).as_ref(), Some(group), "hand {hand:?}");
            assert!(available.covers(&RankCounts::from_cards(group.cards())));
            assert!(seen.insert(group.clone()), "duplicate {group}");
        }
    }
}

#[test]
fn beats_is_antisymmetric_on_enumerated_groups() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let hand = random_hand(&mut rng, 20);
        let groups = enumerate(&hand);
        for a in &groups {
            for b in &groups {
                assert!(!(a.beats(b) && b.beats(a)), "{a} vs {b}");
            }
        }
    }
}

#[test]
fn rocket_and_bomb_supremacy() {
    let mut rng = StdRng::seed_from_u64(99);
    let bomb = CardGroup::normal(NormalKind::Bomb, Rank::Three);
    assert!(CardGroup::Rocket.beats(&CardGroup::normal(NormalKind::Bomb, Rank::Two)));
    for _ in 0..20 {
        for group in enumerate(&random_hand(&mut rng, 20)) {
            if group.is_rocket() {
                continue;
            }
            assert!(CardGroup::Rocket.beats(&group));
            if !group.is_bomb() {
                assert!(bomb.beats(&group), "{group}");
                assert!(!group.beats(&bomb), "{group}");
            }
        }
    }
}

#[test]
fn small_hand_scenario() {
    let hand = Rank::parse_list("3 3 3 4 4").unwrap();
    let groups = enumerate(&hand);
    let text: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
    for expected in [
        "Single [3]",
        "Single [4]",
        "Double [3 3]",
        "Double [4 4]",
        "Triple [3 3 3]",
    ] {
        assert!(text.iter().any(|t| t == expected), "missing {expected}: {text:?}");
    }
    let full = match_exact(&hand).unwrap();
    assert!(groups.contains(&full));
}

#[test]
fn dealing_partitions_the_deck() {
    for seed in 0..50 {
        let round = RoundState::deal(&Deck::shuffled_with_seed(seed));
        let mut all = Vec::new();
        for seat in Seat::LOOP {
            assert_eq!(round.hand(seat).len(), 17);
            all.extend_from_slice(round.hand(seat).cards());
        }
        all.extend_from_slice(round.kitty());
        let counts = RankCounts::from_cards(&all);
        for rank in Rank::ORDERED {
            assert_eq!(counts.get(rank), rank.copies());
        }
    }
}

#[test]
fn table_bomb_answers() {
    let table = CardGroup::normal(NormalKind::Bomb, Rank::Seven);
    let hand = Rank::parse_list("6 6 6 6 8 8 8 8 BJ RJ 9 9 9 10 J Q K").unwrap();
    let answers = legal_plays(&hand, Some(&table), false);
    assert!(answers.contains(&CardGroup::Pass));
    for answer in answers.iter().filter(|a| !a.is_pass()) {
        assert!(
            answer.is_rocket() || *answer == CardGroup::normal(NormalKind::Bomb, Rank::Eight),
            "{answer}"
        );
    }
    assert_eq!(answers.len(), 3);
}

#[test]
fn straights_of_other_lengths_are_not_answers() {
    let table = CardGroup::straight(StraightKind::SingleSeq, Rank::Five, 5).unwrap();
    let hand = Rank::parse_list("6 7 8 9 10 J").unwrap();
    let answers = legal_plays(&hand, Some(&table), true);
    assert_eq!(answers.len(), 2);
    assert!(answers.iter().all(|a| a.len() == 5));
    let six = CardGroup::straight(StraightKind::SingleSeq, Rank::Six, 6).unwrap();
    assert!(!six.beats(&table));
    assert!(!table.beats(&six));
}

/// Plays the first legal candidate; bids its seat's configured value.
struct FirstLegal {
    bid: u8,
    landlords_seen: usize,
}

impl SeatAgent for FirstLegal {
    fn observe(&mut self, event: &RoundEvent) {
        if matches!(event, RoundEvent::LandlordDecided { .. }) {
            self.landlords_seen += 1;
        }
    }

    fn choose_bid(&mut self, request: &BidRequest) -> u8 {
        if request.candidates.contains(&self.bid) {
            self.bid
        } else {
            0
        }
    }

    fn choose_play(&mut self, request: &PlayRequest) -> CardGroup {
        let options = legal_plays(request.hand.cards(), request.table, request.must_play);
        options
            .into_iter()
            .find(|group| !group.is_pass())
            .unwrap_or(CardGroup::Pass)
    }
}

#[test]
fn seeded_rounds_finish_with_zero_sum_scores() {
    let agents = [1, 2, 0].map(|bid| FirstLegal {
        bid,
        landlords_seen: 0,
    });
    let mut table = Table::with_seed(agents, 2024);
    for round in 1..=10 {
        assert_eq!(table.round_number(), round);
        let summary = table.run_round().unwrap();
        assert_eq!(summary.scores.iter().sum::<i32>(), 0);
        assert!(summary.multiplier >= 1);
        assert!(summary.plays[summary.landlord.index()] > 0);
        table.reset();
    }
    for agent in table.agents() {
        assert_eq!(agent.landlords_seen, 10);
    }
}
