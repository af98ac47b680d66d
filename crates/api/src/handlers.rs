pub mod availability;
pub mod schedule;
