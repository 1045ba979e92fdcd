pub mod bidding;
pub mod counts;
pub mod deck;
pub mod group;
pub mod hand;
pub mod matcher;
pub mod rank;
pub mod round;
pub mod scan;
pub mod score;
pub mod seat;
pub mod window;
