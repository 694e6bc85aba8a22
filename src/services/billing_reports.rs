use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::{debug, trace};
use std::collections::BTreeMap;

use crate::models::{Activity, Bill, BillingReport, ChargeNumber, TimeCard};
use crate::utils::date_range::DateRange;
use crate::utils::duration::Duration;

/// Commonly used billing reports over a time card.
pub struct BillingReports;

impl BillingReports {
    /// One report per UTC calendar day holding billed time, in chronological
    /// order.
    ///
    /// Only stopped activities are billed; an active activity contributes
    /// nothing until it is stopped. Bills in each report are sorted by charge
    /// number.
    pub fn daily(time_card: &TimeCard) -> Vec<BillingReport> {
        let activities = time_card.inactive_activities();
        debug!("Generating daily billing reports for {} activities", activities.len());

        let mut reports = Vec::new();
        let mut durations: BTreeMap<ChargeNumber, Duration> = BTreeMap::new();
        let mut current_day: Option<DateRange> = None;

        for activity in &activities {
            let Ok(stop_time) = activity.stop_time() else {
                continue;
            };

            for day in activity_days(activity.start_time(), stop_time) {
                if let Some(previous) = current_day.filter(|previous| previous.begin() != day.begin()) {
                    reports.push(Self::flush(previous, &mut durations));
                }

                let start = activity.start_time().max(day.begin());
                // day.end() is inclusive while stop times are exclusive
                let stop = day
                    .end()
                    .checked_add_signed(ChronoDuration::milliseconds(1))
                    .map_or(stop_time, |day_stop| stop_time.min(day_stop));
                Self::accumulate(&mut durations, activity, start, stop);

                current_day = Some(day);
            }
        }

        if let Some(day) = current_day {
            if !durations.is_empty() {
                reports.push(Self::flush(day, &mut durations));
            }
        }

        debug!("Generated {} daily billing reports", reports.len());
        reports
    }

    fn accumulate(
        durations: &mut BTreeMap<ChargeNumber, Duration>,
        activity: &Activity,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    ) {
        let additional = (stop - start).num_milliseconds();
        trace!(
            "Billing {} ms to {} between {} and {}",
            additional,
            activity.charge_number(),
            start,
            stop
        );

        let total = durations
            .entry(activity.charge_number().clone())
            .or_insert(Duration::ZERO);
        *total = Duration::from_milliseconds(total.to_milliseconds() + additional);
    }

    /// Drains the accumulated durations into a report for `day`.
    fn flush(day: DateRange, durations: &mut BTreeMap<ChargeNumber, Duration>) -> BillingReport {
        let bills = std::mem::take(durations)
            .into_iter()
            .map(|(charge_number, duration)| Bill::new(charge_number, duration))
            .collect();

        debug!("Flushing billing report for {}", day.begin().format("%Y-%m-%d"));
        BillingReport::new(day, bills)
    }
}

/// The UTC days from the one holding `start_time` through the one holding
/// `stop_time`, both included.
///
/// A stop time falling exactly on midnight still pulls in the following day,
/// which then receives a zero-length share of the activity.
pub fn activity_days(start_time: DateTime<Utc>, stop_time: DateTime<Utc>) -> Vec<DateRange> {
    let mut days = Vec::new();
    let mut next = Some(DateRange::day_containing(start_time));

    while let Some(day) = next.filter(|day| day.begin() <= stop_time) {
        days.push(day);
        next = day.next_day();
    }

    days
}
