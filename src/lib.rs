pub mod cli;
pub mod models;
pub mod services;
pub mod test_utils;
pub mod utils;

pub use models::{
    replay, Activity, ActivityStatus, Bill, BillingReport, ChargeNumber, Config, ReplayError,
    TimeCard, TimeCardEntry, TimeCardListener,
};
pub use services::{activity_days, BillingReports};
pub use utils::{DateRange, Duration, ModelError, ModelResult};
