pub mod billing_reports;

pub use billing_reports::{activity_days, BillingReports};
