pub mod config;
pub mod date_range;
pub mod duration;
pub mod validation;

pub use config::*;
pub use date_range::{end_of_day, start_of_day, DateRange, MILLISECONDS_PER_DAY};
pub use duration::Duration;
pub use validation::*;
