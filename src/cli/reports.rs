use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

use crate::cli::formatter::{
    format_activity_duration, format_bill_label, format_charge_number, format_date_range, format_hours,
    format_start_time, format_stop_time, CliFormatter,
};
use crate::models::{replay, Activity, BillingReport, Config, TimeCard, TimeCardEntry, TimeCardListener};
use crate::services::BillingReports;
use crate::utils::duration::Duration;

/// Logs every time card transition while a script is replayed.
pub struct LoggingListener;

impl TimeCardListener for LoggingListener {
    fn on_activity_started(&mut self, _time_card: &TimeCard, activity: &Activity) {
        info!(
            "Started activity for {} at {}",
            activity.charge_number(),
            activity.start_time()
        );
    }

    fn on_activity_stopped(&mut self, _time_card: &TimeCard, activity: &Activity) {
        match activity.duration() {
            Ok(duration) => info!(
                "Stopped activity for {} after {} ms",
                activity.charge_number(),
                duration.to_milliseconds()
            ),
            Err(e) => warn!("Stopped activity reported while still active: {}", e),
        }
    }

    fn on_reset(&mut self, time_card: &TimeCard) {
        info!("Time card reset ({} activities remain)", time_card.activities().len());
    }
}

/// Daily reports plus the activity that was still running, if any.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReportSet {
    pub reports: Vec<BillingReport>,
    pub excluded_active: Option<Activity>,
}

impl DailyReportSet {
    pub fn total_duration(&self) -> Duration {
        Duration::from_milliseconds(
            self.reports
                .iter()
                .map(|report| report.total_duration().to_milliseconds())
                .sum(),
        )
    }
}

pub struct ReportGenerator {
    config: Config,
}

impl ReportGenerator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn load_entries(&self, script_path: &Path) -> Result<Vec<TimeCardEntry>> {
        let contents = std::fs::read_to_string(script_path)
            .with_context(|| format!("Failed to read time card script {}", script_path.display()))?;
        let entries: Vec<TimeCardEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse time card script {}", script_path.display()))?;

        info!("Loaded {} entries from {}", entries.len(), script_path.display());
        Ok(entries)
    }

    /// Replays `entries` into a fresh time card with a logging listener.
    pub fn build_time_card(&self, entries: &[TimeCardEntry]) -> Result<TimeCard> {
        let mut time_card = TimeCard::new();
        time_card.set_listener(Some(Box::new(LoggingListener)));

        replay(entries, &mut time_card).context("Failed to replay time card script")?;

        time_card.set_listener(None);
        Ok(time_card)
    }

    pub fn generate_report(&self, script_path: &Path) -> Result<DailyReportSet> {
        let entries = self.load_entries(script_path)?;
        let time_card = self.build_time_card(&entries)?;

        let excluded_active = time_card.active_activity().ok().cloned();
        if let Some(active) = &excluded_active {
            warn!(
                "Activity for {} started at {} is still active and is not billed",
                active.charge_number(),
                active.start_time()
            );
        }

        Ok(DailyReportSet {
            reports: BillingReports::daily(&time_card),
            excluded_active,
        })
    }

    pub fn export_csv(&self, report_set: &DailyReportSet, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render_csv(report_set))
            .with_context(|| format!("Failed to write CSV report to {}", output_path.display()))?;
        Ok(())
    }

    pub fn export_json(&self, report_set: &DailyReportSet, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render_json(report_set)?)
            .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;
        Ok(())
    }

    pub fn render_csv(&self, report_set: &DailyReportSet) -> String {
        let mut csv = String::from("Date,Charge Number,Hours,Milliseconds\n");

        for report in &report_set.reports {
            let date = report
                .date_range()
                .begin()
                .format(&self.config.date_format)
                .to_string();
            for bill in report.bills() {
                csv.push_str(&format!(
                    "{},{},{},{}\n",
                    date,
                    csv_field(bill.charge_number().as_str()),
                    format_hours(bill.duration(), self.config.duration_precision),
                    bill.duration().to_milliseconds()
                ));
            }
        }

        csv
    }

    pub fn render_json(&self, report_set: &DailyReportSet) -> Result<String> {
        Ok(serde_json::to_string_pretty(report_set)?)
    }

    pub fn print_report(&self, report_set: &DailyReportSet) {
        let precision = self.config.duration_precision;

        if report_set.reports.is_empty() {
            CliFormatter::print_empty_state("No billed time in this time card");
        }

        for report in &report_set.reports {
            CliFormatter::print_section_header(&format_date_range(
                &report.date_range(),
                &self.config.date_format,
            ));
            for bill in report.bills() {
                CliFormatter::print_bill_entry(
                    &format_bill_label(bill.charge_number()),
                    &format_hours(bill.duration(), precision),
                );
            }
            CliFormatter::print_field(
                "Total",
                &format_hours(report.total_duration(), precision),
                Some("green"),
            );
        }

        if !report_set.reports.is_empty() {
            CliFormatter::print_summary(
                "Total billed hours",
                &format_hours(report_set.total_duration(), precision),
            );
        }

        if let Some(active) = &report_set.excluded_active {
            CliFormatter::print_warning(&format!(
                "{} is still active since {} and was not billed",
                active.charge_number(),
                format_start_time(active, &self.config.time_format)
            ));
        }
    }

    pub fn print_activities(&self, time_card: &TimeCard) {
        let activities = time_card.activities();
        if activities.is_empty() {
            CliFormatter::print_empty_state("No activities recorded");
            return;
        }

        CliFormatter::print_section_header("Activities");
        for activity in &activities {
            let period = format!(
                "{} → {}",
                format_start_time(activity, &self.config.time_format),
                format_stop_time(activity, &self.config.time_format)
            );
            CliFormatter::print_activity_entry(
                activity.status(),
                &format_charge_number(activity),
                &period,
                &format_activity_duration(activity, self.config.duration_precision),
            );
        }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityStatus;
    use crate::test_utils::{day_hour, start_entry, stop_entry, with_test_context};

    #[test]
    fn test_generate_report_from_script() {
        with_test_context(|ctx| {
            let script = ctx.write_script(
                "script.json",
                &[
                    start_entry("C1", day_hour(0, 23)),
                    stop_entry(day_hour(1, 2)),
                    start_entry("C2", day_hour(1, 4)),
                ],
            )?;
            let generator = ReportGenerator::new(Config::default());

            let report_set = generator.generate_report(&script)?;

            assert_eq!(report_set.reports.len(), 2);
            assert_eq!(report_set.total_duration().to_milliseconds(), 3 * 3_600_000);
            let active = report_set.excluded_active.expect("C2 should still be active");
            assert_eq!(active.charge_number().as_str(), "C2");
            Ok(())
        });
    }

    #[test]
    fn test_generate_report_fails_on_invalid_script() {
        with_test_context(|ctx| {
            let script = ctx.write_script("bad.json", &[stop_entry(day_hour(0, 1))])?;
            let generator = ReportGenerator::new(Config::default());

            let err = generator.generate_report(&script).unwrap_err();

            assert!(format!("{:#}", err).contains("Entry 0"));
            Ok(())
        });
    }

    #[test]
    fn test_render_csv() {
        let generator = ReportGenerator::new(Config::default());
        let time_card = generator
            .build_time_card(&[
                start_entry("C2", day_hour(0, 1)),
                start_entry("C1,x", day_hour(0, 3)),
                stop_entry(day_hour(0, 4)),
            ])
            .unwrap();
        let report_set = DailyReportSet {
            reports: BillingReports::daily(&time_card),
            excluded_active: None,
        };

        assert_eq!(
            generator.render_csv(&report_set),
            "Date,Charge Number,Hours,Milliseconds\n\
             1970-01-01,\"C1,x\",1.0,3600000\n\
             1970-01-01,C2,2.0,7200000\n"
        );
    }

    #[test]
    fn test_render_json() {
        let generator = ReportGenerator::new(Config::default());
        let time_card = generator
            .build_time_card(&[start_entry("C1", day_hour(0, 0)), stop_entry(day_hour(0, 1))])
            .unwrap();
        let report_set = DailyReportSet {
            reports: BillingReports::daily(&time_card),
            excluded_active: None,
        };

        let json: serde_json::Value =
            serde_json::from_str(&generator.render_json(&report_set).unwrap()).unwrap();

        assert_eq!(json["reports"][0]["bills"][0]["charge_number"], "C1");
        assert_eq!(json["reports"][0]["bills"][0]["duration"], 3_600_000);
        assert!(json["excluded_active"].is_null());
    }

    #[test]
    fn test_print_activities_with_active_and_stopped() {
        let generator = ReportGenerator::new(Config::default());
        let time_card = generator
            .build_time_card(&[start_entry("", day_hour(0, 1)), start_entry("C1", day_hour(0, 2))])
            .unwrap();

        let statuses: Vec<_> = time_card.activities().iter().map(Activity::status).collect();
        assert_eq!(statuses, vec![ActivityStatus::Stopped, ActivityStatus::Active]);
        generator.print_activities(&time_card);
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a\"b"), "\"a\"\"b\"");
    }
}
