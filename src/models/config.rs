use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const MAX_DURATION_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub duration_precision: usize,
    pub date_format: String,
    pub time_format: String,
    pub custom_settings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            duration_precision: 1,
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            custom_settings: HashMap::new(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = ["log_level", "duration_precision", "date_format", "time_format"];

    pub fn validate(&self) -> anyhow::Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "Log level must be one of: {}",
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        if self.duration_precision > MAX_DURATION_PRECISION {
            return Err(anyhow::anyhow!(
                "Duration precision must be at most {} (got {})",
                MAX_DURATION_PRECISION,
                self.duration_precision
            ));
        }

        validate_format("Date format", &self.date_format)?;
        validate_format("Time format", &self.time_format)?;

        Ok(())
    }

    /// Sets a named field, or a custom setting for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "log_level" => self.log_level = value.to_lowercase(),
            "duration_precision" => {
                self.duration_precision = value.parse().map_err(|_| {
                    anyhow::anyhow!("Duration precision must be a non-negative integer, got '{}'", value)
                })?
            }
            "date_format" => self.date_format = value.to_string(),
            "time_format" => self.time_format = value.to_string(),
            _ => {
                self.custom_settings.insert(key.to_string(), value.to_string());
            }
        }

        self.validate()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "log_level" => Some(self.log_level.clone()),
            "duration_precision" => Some(self.duration_precision.to_string()),
            "date_format" => Some(self.date_format.clone()),
            "time_format" => Some(self.time_format.clone()),
            _ => self.custom_settings.get(key).cloned(),
        }
    }
}

fn validate_format(label: &str, format: &str) -> anyhow::Result<()> {
    if format.trim().is_empty() {
        return Err(anyhow::anyhow!("{} cannot be empty", label));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(anyhow::anyhow!(
            "{} '{}' is not a valid strftime format",
            label,
            format
        ));
    }

    Ok(())
}
