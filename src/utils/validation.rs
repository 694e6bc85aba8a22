use chrono::{DateTime, Utc};

/// Precondition failures raised by the time card model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("Invalid argument: {field} - {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Date range is invalid: {reason}")]
    InvalidDateRange { reason: String },
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

impl ModelError {
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        ModelError::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, ModelError::InvalidState { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ModelError::InvalidArgument { .. })
    }
}

/// Validate that a stop time does not precede the matching start time
pub fn validate_stop_time(start_time: DateTime<Utc>, stop_time: DateTime<Utc>) -> ModelResult<()> {
    if stop_time < start_time {
        return Err(ModelError::invalid_argument(
            "stop_time",
            format!(
                "stop time ({}) must be greater than or equal to start time ({})",
                stop_time.format("%Y-%m-%d %H:%M:%S%.3f"),
                start_time.format("%Y-%m-%d %H:%M:%S%.3f")
            ),
        ));
    }

    Ok(())
}

/// Validate inclusive date range bounds
pub fn validate_date_range(begin: DateTime<Utc>, end: DateTime<Utc>) -> ModelResult<()> {
    if end < begin {
        return Err(ModelError::InvalidDateRange {
            reason: format!(
                "ending date ({}) must be greater than or equal to beginning date ({})",
                end.format("%Y-%m-%d %H:%M:%S%.3f"),
                begin.format("%Y-%m-%d %H:%M:%S%.3f")
            ),
        });
    }

    Ok(())
}
