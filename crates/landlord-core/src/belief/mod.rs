//! Per-seat knowledge of a round in progress.
//!
//! `SeatBelief` is driven entirely by `RoundEvent`s; `SeatSnapshot` is the
//! frozen copy handed to learning code.

mod state;

pub use state::{OpponentView, SeatBelief, SeatSnapshot};
