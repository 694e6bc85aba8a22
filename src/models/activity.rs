use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::ChargeNumber;
use crate::utils::duration::Duration;
use crate::utils::validation::{validate_stop_time, ModelError, ModelResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Active,
    Stopped,
}

/// A continuous period of billable work against one charge number.
///
/// The start time is inclusive and the stop time exclusive. An activity is
/// active until `stop` succeeds, after which it never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    charge_number: ChargeNumber,
    start_time: DateTime<Utc>,
    stop_time: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn start(charge_number: ChargeNumber, start_time: DateTime<Utc>) -> Self {
        Self {
            charge_number,
            start_time,
            stop_time: None,
        }
    }

    pub fn charge_number(&self) -> &ChargeNumber {
        &self.charge_number
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn stop_time(&self) -> ModelResult<DateTime<Utc>> {
        self.stop_time
            .ok_or_else(|| ModelError::invalid_state("cannot get stop time of an active activity"))
    }

    pub fn duration(&self) -> ModelResult<Duration> {
        let stop_time = self
            .stop_time
            .ok_or_else(|| ModelError::invalid_state("cannot get duration of an active activity"))?;
        Ok((stop_time - self.start_time).into())
    }

    pub fn is_active(&self) -> bool {
        self.stop_time.is_none()
    }

    pub fn status(&self) -> ActivityStatus {
        if self.is_active() {
            ActivityStatus::Active
        } else {
            ActivityStatus::Stopped
        }
    }

    pub fn stop(&mut self, stop_time: DateTime<Utc>) -> ModelResult<()> {
        validate_stop_time(self.start_time, stop_time)?;

        if self.stop_time.is_some() {
            return Err(ModelError::invalid_state("cannot stop an inactive activity"));
        }

        self.stop_time = Some(stop_time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn charge() -> ChargeNumber {
        ChargeNumber::from_string("C1")
    }

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_start_creates_active_activity() {
        let activity = Activity::start(charge(), start_time());

        assert!(activity.is_active());
        assert_eq!(activity.status(), ActivityStatus::Active);
        assert_eq!(activity.charge_number(), &charge());
        assert_eq!(activity.start_time(), start_time());
    }

    #[test]
    fn test_getters_fail_while_active() {
        let activity = Activity::start(charge(), start_time());

        assert!(activity.duration().unwrap_err().is_invalid_state());
        assert!(activity.stop_time().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_stop_deactivates_activity() {
        let mut activity = Activity::start(charge(), start_time());
        let stop_time = start_time() + ChronoDuration::minutes(90);

        activity.stop(stop_time).unwrap();

        assert!(!activity.is_active());
        assert_eq!(activity.status(), ActivityStatus::Stopped);
        assert_eq!(activity.stop_time().unwrap(), stop_time);
        assert_eq!(activity.duration().unwrap().to_milliseconds(), 90 * 60 * 1000);
        // values stay consistent across calls
        assert_eq!(activity.duration().unwrap(), activity.duration().unwrap());
    }

    #[test]
    fn test_stop_with_zero_duration() {
        let mut activity = Activity::start(charge(), start_time());

        activity.stop(start_time()).unwrap();

        assert_eq!(activity.duration().unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_stop_before_start_leaves_activity_active() {
        let mut activity = Activity::start(charge(), start_time());

        let err = activity
            .stop(start_time() - ChronoDuration::milliseconds(1))
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(activity.is_active());
        assert_eq!(activity, Activity::start(charge(), start_time()));
    }

    #[test]
    fn test_stop_twice_fails() {
        let mut activity = Activity::start(charge(), start_time());
        let stop_time = start_time() + ChronoDuration::hours(1);
        activity.stop(stop_time).unwrap();

        let err = activity.stop(stop_time + ChronoDuration::hours(1)).unwrap_err();

        assert!(err.is_invalid_state());
        assert_eq!(activity.stop_time().unwrap(), stop_time);
    }

    #[test]
    fn test_returned_timestamps_are_independent_copies() {
        let activity = Activity::start(charge(), start_time());

        let mut returned = activity.start_time();
        returned = returned + ChronoDuration::days(3);

        assert_ne!(returned, activity.start_time());
        assert_eq!(activity.start_time(), start_time());
    }
}
