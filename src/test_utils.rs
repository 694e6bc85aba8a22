use crate::models::{ChargeNumber, TimeCardEntry};
use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test utilities for setting up isolated test environments
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    /// Create a new isolated test context; the config file is not created
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let config_path = temp_dir.path().join("config.toml");

        Ok(Self {
            temp_dir,
            config_path,
        })
    }

    /// Write a JSON time card script into the context directory
    pub fn write_script(&self, name: &str, entries: &[TimeCardEntry]) -> Result<PathBuf> {
        let script_path = self.temp_dir.path().join(name);
        std::fs::write(&script_path, serde_json::to_string_pretty(entries)?)?;
        Ok(script_path)
    }

    /// Path for an output file inside the context directory
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// Helper for tests needing a temporary directory
pub fn with_test_context<F>(test_fn: F)
where
    F: FnOnce(&TestContext) -> Result<()>,
{
    let ctx = TestContext::new().expect("Failed to create test context");
    test_fn(&ctx).expect("Test function failed");
}

/// Midnight UTC of the `day`-th day after 1970-01-01
pub fn day_start(day: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).unwrap() + Duration::days(day)
}

/// `hours` hours into the `day`-th day after 1970-01-01
pub fn day_hour(day: i64, hours: i64) -> DateTime<Utc> {
    day_start(day) + Duration::hours(hours)
}

pub fn start_entry(charge_number: &str, at: DateTime<Utc>) -> TimeCardEntry {
    TimeCardEntry::Start {
        charge_number: ChargeNumber::from_string(charge_number),
        at,
    }
}

pub fn stop_entry(at: DateTime<Utc>) -> TimeCardEntry {
    TimeCardEntry::Stop { at }
}
