use serde::{Deserialize, Serialize};

/// A span of time measured in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration {
    milliseconds: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { milliseconds: 0 };

    pub fn from_milliseconds(milliseconds: i64) -> Self {
        Self { milliseconds }
    }

    pub fn to_milliseconds(&self) -> i64 {
        self.milliseconds
    }
}

impl From<chrono::Duration> for Duration {
    fn from(duration: chrono::Duration) -> Self {
        Self::from_milliseconds(duration.num_milliseconds())
    }
}
