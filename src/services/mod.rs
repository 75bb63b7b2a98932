pub mod marking;
pub mod schedule;
pub mod stats;
pub mod time;
