pub mod habits;
pub mod health;
pub mod records;
pub mod stats;
