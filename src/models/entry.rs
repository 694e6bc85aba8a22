use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ChargeNumber, TimeCard};
use crate::utils::validation::ModelError;

/// One recorded time card operation, replayable against a `TimeCard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TimeCardEntry {
    Start {
        charge_number: ChargeNumber,
        at: DateTime<Utc>,
    },
    Stop {
        at: DateTime<Utc>,
    },
    Reset,
}

/// A replay failure, pointing at the entry that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Entry {index} could not be applied: {source}")]
pub struct ReplayError {
    pub index: usize,
    pub source: ModelError,
}

impl TimeCardEntry {
    pub fn apply(&self, time_card: &mut TimeCard) -> Result<(), ModelError> {
        match self {
            TimeCardEntry::Start { charge_number, at } => {
                time_card.start_activity(charge_number.clone(), *at)
            }
            TimeCardEntry::Stop { at } => time_card.stop_active_activity(*at),
            TimeCardEntry::Reset => {
                time_card.reset();
                Ok(())
            }
        }
    }
}

/// Applies `entries` in order, stopping at the first failure.
pub fn replay<'a, I>(entries: I, time_card: &mut TimeCard) -> Result<(), ReplayError>
where
    I: IntoIterator<Item = &'a TimeCardEntry>,
{
    for (index, entry) in entries.into_iter().enumerate() {
        entry
            .apply(time_card)
            .map_err(|source| ReplayError { index, source })?;
    }

    Ok(())
}
