pub mod activity;
pub mod bill;
pub mod charge_number;
pub mod config;
pub mod entry;
pub mod time_card;

pub use activity::{Activity, ActivityStatus};
pub use bill::{Bill, BillingReport};
pub use charge_number::ChargeNumber;
pub use config::Config;
pub use entry::{replay, ReplayError, TimeCardEntry};
pub use time_card::{TimeCard, TimeCardListener};
