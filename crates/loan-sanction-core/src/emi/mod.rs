pub mod quote;
pub mod schedule;
