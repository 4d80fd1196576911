pub mod collector;
pub mod snapshot;
pub mod stage;
pub mod statistics;
