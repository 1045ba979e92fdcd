mod seat;

pub use seat::{EvaluatorSeat, SeatMode};
