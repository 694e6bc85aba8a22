use chrono::{DateTime, Utc};

use crate::models::{Activity, ActivityStatus, ChargeNumber};
use crate::utils::date_range::DateRange;
use crate::utils::duration::Duration;

const MILLISECONDS_PER_HOUR: f64 = 3_600_000.0;
const ACTIVE_LABEL: &str = "active";

pub struct CliFormatter;

impl CliFormatter {
    pub fn print_section_header(title: &str) {
        println!("\n{}", ansi_color("cyan", title, true));
        println!("{}", "─".repeat(title.chars().count()).dimmed());
    }

    pub fn print_field(label: &str, value: &str, color: Option<&str>) {
        let colored_value = match color {
            Some(c) => ansi_color(c, value, false),
            None => value.to_string(),
        };
        println!("  {:<12} {}", format!("{}:", label).dimmed(), colored_value);
    }

    pub fn print_bill_entry(charge_number: &str, hours: &str) {
        println!(
            "  {:<25} {}",
            ansi_color("yellow", &truncate_string(charge_number, 25), true),
            ansi_color("green", hours, true)
        );
    }

    pub fn print_activity_entry(status: ActivityStatus, charge_number: &str, period: &str, hours: &str) {
        let (symbol, color) = match status {
            ActivityStatus::Active => ("●", "green"),
            ActivityStatus::Stopped => ("○", "gray"),
        };

        println!(
            "  {} {:<20} {:<45} {}",
            ansi_color(color, symbol, false),
            ansi_color("yellow", &truncate_string(charge_number, 20), false),
            period.dimmed(),
            ansi_color("green", hours, false)
        );
    }

    pub fn print_summary(title: &str, total: &str) {
        println!("\n{}", ansi_color("white", title, true));
        println!("  {}", ansi_color("green", total, true));
    }

    pub fn print_empty_state(message: &str) {
        println!("\n  {}", message.dimmed());
    }

    pub fn print_success(message: &str) {
        println!(
            "  {} {}",
            ansi_color("green", "✓", true),
            ansi_color("green", message, false)
        );
    }

    pub fn print_warning(message: &str) {
        println!(
            "  {} {}",
            ansi_color("yellow", "⚠", true),
            ansi_color("yellow", message, false)
        );
    }
}

/// Decimal hours with `precision` places, e.g. 54 minutes at precision 1 is "0.9".
pub fn format_hours(duration: Duration, precision: usize) -> String {
    let hours = duration.to_milliseconds() as f64 / MILLISECONDS_PER_HOUR;
    format!("{:.*}", precision, hours)
}

pub fn format_charge_number(activity: &Activity) -> String {
    format_bill_label(activity.charge_number())
}

pub fn format_activity_duration(activity: &Activity, precision: usize) -> String {
    match activity.duration() {
        Ok(duration) => format_hours(duration, precision),
        Err(_) => ACTIVE_LABEL.to_string(),
    }
}

pub fn format_start_time(activity: &Activity, time_format: &str) -> String {
    format_timestamp(activity.start_time(), time_format)
}

pub fn format_stop_time(activity: &Activity, time_format: &str) -> String {
    match activity.stop_time() {
        Ok(stop_time) => format_timestamp(stop_time, time_format),
        Err(_) => ACTIVE_LABEL.to_string(),
    }
}

pub fn format_timestamp(timestamp: DateTime<Utc>, time_format: &str) -> String {
    timestamp.format(time_format).to_string()
}

/// A single-day range prints as its date, anything longer as "begin to end".
pub fn format_date_range(date_range: &DateRange, date_format: &str) -> String {
    let begin = date_range.begin().format(date_format).to_string();
    let end = date_range.end().format(date_format).to_string();

    if begin == end {
        begin
    } else {
        format!("{} to {}", begin, end)
    }
}

pub fn format_bill_label(charge_number: &ChargeNumber) -> String {
    if charge_number.as_str().is_empty() {
        "(no charge number)".to_string()
    } else {
        charge_number.to_string()
    }
}

// Helper functions
pub fn ansi_color(color: &str, text: &str, bold: bool) -> String {
    let color_code = match color {
        "red" => "31",
        "green" => "32",
        "yellow" => "33",
        "blue" => "34",
        "magenta" => "35",
        "cyan" => "36",
        "white" => "37",
        "gray" => "90",
        _ => "37",
    };

    if bold {
        format!("\x1b[1;{}m{}\x1b[0m", color_code, text)
    } else {
        format!("\x1b[{}m{}\x1b[0m", color_code, text)
    }
}

pub trait StringFormat {
    fn dimmed(&self) -> String;
}

impl StringFormat for str {
    fn dimmed(&self) -> String {
        format!("\x1b[2m{}\x1b[0m", self)
    }
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
