pub mod habit;
pub mod record;
