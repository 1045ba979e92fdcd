pub mod agent;
pub mod events;
pub mod summary;
pub mod table;
