use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use super::validation::{validate_date_range, ModelResult};

/// Length of one calendar day in milliseconds.
pub const MILLISECONDS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A range of timestamps, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Fails with `InvalidDateRange` when `end` precedes `begin`.
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> ModelResult<Self> {
        validate_date_range(begin, end)?;
        Ok(Self { begin, end })
    }

    /// The UTC calendar day containing `timestamp`, from 00:00:00.000 to
    /// 23:59:59.999.
    pub fn day_containing(timestamp: DateTime<Utc>) -> Self {
        let begin = start_of_day(timestamp);
        Self {
            begin,
            end: begin + Duration::milliseconds(MILLISECONDS_PER_DAY - 1),
        }
    }

    pub fn begin(&self) -> DateTime<Utc> {
        self.begin
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The day immediately after this one, or `None` past the last
    /// representable day. Only meaningful for day ranges.
    pub fn next_day(&self) -> Option<Self> {
        self.begin
            .checked_add_signed(Duration::milliseconds(MILLISECONDS_PER_DAY))
            .map(Self::day_containing)
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.begin <= timestamp && timestamp <= self.end
    }
}

pub fn start_of_day(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&timestamp.date_naive().and_time(NaiveTime::MIN))
}

pub fn end_of_day(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateRange::day_containing(timestamp).end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::ModelError;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_bounds() {
        assert!(DateRange::new(at(0), at(0)).is_ok());
        assert!(DateRange::new(at(0), at(1)).is_ok());
        assert!(matches!(
            DateRange::new(at(1), at(0)),
            Err(ModelError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_equality_over_both_bounds() {
        let range = DateRange::new(at(0), at(10)).unwrap();
        assert_eq!(range, DateRange::new(at(0), at(10)).unwrap());
        assert_ne!(range, DateRange::new(at(0), at(11)).unwrap());
        assert_ne!(range, DateRange::new(at(1), at(10)).unwrap());
    }

    #[test]
    fn test_day_containing() {
        let day = DateRange::day_containing(at(MILLISECONDS_PER_DAY + 5 * 3_600_000));
        assert_eq!(day.begin(), at(MILLISECONDS_PER_DAY));
        assert_eq!(day.end(), at(2 * MILLISECONDS_PER_DAY - 1));

        assert_eq!(DateRange::day_containing(at(0)).end(), at(86_399_999));
        assert_eq!(
            DateRange::day_containing(at(86_399_999)),
            DateRange::day_containing(at(0))
        );
    }

    #[test]
    fn test_next_day_and_contains() {
        let day = DateRange::day_containing(at(0));
        let next = day.next_day().unwrap();

        assert_eq!(next.begin(), at(MILLISECONDS_PER_DAY));
        assert!(day.contains(at(86_399_999)));
        assert!(!day.contains(at(MILLISECONDS_PER_DAY)));
        assert!(next.contains(at(MILLISECONDS_PER_DAY)));
    }

    #[test]
    fn test_next_day_after_last_representable_day() {
        let last_day = DateRange::day_containing(DateTime::<Utc>::MAX_UTC);

        assert_eq!(last_day.next_day(), None);
        assert!(last_day.contains(DateTime::<Utc>::MAX_UTC - Duration::milliseconds(1)));
    }

    #[test]
    fn test_start_and_end_of_day() {
        let noon = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 15).unwrap();
        assert_eq!(
            start_of_day(noon),
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );
        assert_eq!(
            end_of_day(noon),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() - Duration::milliseconds(1)
        );
    }
}
