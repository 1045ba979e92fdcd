pub mod bot;
pub mod policy;

pub use bot::{EvaluatorSeat, SeatMode};
pub use policy::{DecisionRecord, Evaluator, HeuristicEvaluator, LearningBatch, LearningStats};
