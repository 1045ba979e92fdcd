use landlord_bot::{EvaluatorSeat, HeuristicEvaluator, SeatMode};
use landlord_core::game::table::{Table, TableError};
use landlord_core::model::bidding::BidError;
use landlord_core::model::seat::Seat;
use parking_lot::Mutex;
use std::sync::Arc;

#[test]
fn heuristic_seats_play_many_rounds() {
    let shared = Arc::new(Mutex::new(HeuristicEvaluator::new()));
    let seats = ["alpha", "beta", "gamma"]
        .map(|name| EvaluatorSeat::new(name, Arc::clone(&shared), SeatMode::Greedy, 0));
    let mut table = Table::with_seed(seats, 404);

    let mut finished = 0u32;
    let mut redeals = 0u32;
    while finished < 20 {
        match table.run_round() {
            Ok(summary) => {
                assert_eq!(summary.scores.iter().sum::<i32>(), 0);
                finished += 1;
            }
            Err(TableError::Bid(BidError::AllPassed)) => redeals += 1,
            Err(other) => panic!("unexpected table error: {other}"),
        }
        table.reset();
        assert!(redeals < 200, "bidding never opened");
        for seat in Seat::LOOP {
            let belief = table.agent(seat).belief();
            assert_eq!(belief.seat(), seat);
            assert_eq!(belief.hand(), table.round().hand(seat));
        }
    }

    let stats = shared.lock().stats();
    assert_eq!(stats.batches, 3 * finished);
    assert_eq!(stats.total_score, 0);
    assert_eq!(stats.bid_decisions + stats.play_decisions, 0);

    let rounds: u32 = table.agents().iter().map(|seat| seat.rounds_played()).sum();
    assert_eq!(rounds, 3 * finished);
    let total: i64 = table.agents().iter().map(|seat| seat.total_score()).sum();
    assert_eq!(total, 0);
}

#[test]
fn training_seats_feed_decisions_to_the_evaluator() {
    let shared = Arc::new(Mutex::new(HeuristicEvaluator::new()));
    let seats = [1u64, 2, 3].map(|seed| {
        EvaluatorSeat::new(format!("trainee-{seed}"), Arc::clone(&shared), SeatMode::Training, seed)
    });
    let mut table = Table::with_seed(seats, 8);

    let mut finished = 0;
    for _ in 0..40 {
        if table.run_round().is_ok() {
            finished += 1;
        }
        table.reset();
    }

    let stats = shared.lock().stats();
    assert!(finished > 0);
    assert_eq!(stats.batches, 3 * finished);
    assert!(stats.play_decisions > 0);
    assert!(stats.bid_decisions > 0);
}
