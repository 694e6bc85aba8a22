use super::{Commands, ConfigAction, ReportFormat};
use crate::cli::formatter::CliFormatter;
use crate::cli::reports::ReportGenerator;
use crate::models::Config;
use crate::utils::config::save_config;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

pub fn handle_command(command: Commands, config_path: &Path, config: Config) -> Result<()> {
    match command {
        Commands::Report {
            script,
            format,
            output,
        } => generate_report(&script, format, output, config),

        Commands::Activities { script } => list_activities(&script, config),

        Commands::Config { action } => handle_config_action(action, config_path, config),
    }
}

fn generate_report(
    script: &Path,
    format: ReportFormat,
    output: Option<PathBuf>,
    config: Config,
) -> Result<()> {
    let generator = ReportGenerator::new(config);
    let report_set = generator.generate_report(script)?;
    debug!("Generated {} daily reports", report_set.reports.len());

    match (format, output) {
        (ReportFormat::Text, None) => {
            generator.print_report(&report_set);
        }
        (ReportFormat::Text, Some(_)) => {
            anyhow::bail!("Text reports are printed only; use --format json or csv with --output");
        }
        (ReportFormat::Json, Some(path)) => {
            generator.export_json(&report_set, &path)?;
            CliFormatter::print_success(&format!("Report exported to {}", path.display()));
        }
        (ReportFormat::Csv, Some(path)) => {
            generator.export_csv(&report_set, &path)?;
            CliFormatter::print_success(&format!("Report exported to {}", path.display()));
        }
        (ReportFormat::Json, None) => {
            println!("{}", generator.render_json(&report_set)?);
        }
        (ReportFormat::Csv, None) => {
            print!("{}", generator.render_csv(&report_set));
        }
    }

    Ok(())
}

fn list_activities(script: &Path, config: Config) -> Result<()> {
    let generator = ReportGenerator::new(config);
    let entries = generator.load_entries(script)?;
    let time_card = generator.build_time_card(&entries)?;

    generator.print_activities(&time_card);
    Ok(())
}

fn handle_config_action(action: ConfigAction, config_path: &Path, config: Config) -> Result<()> {
    match action {
        ConfigAction::Show => {
            CliFormatter::print_section_header("Configuration");
            CliFormatter::print_field("file", &config_path.display().to_string(), None);
            for key in Config::KEYS {
                if let Some(value) = config.get(key) {
                    CliFormatter::print_field(key, &value, Some("cyan"));
                }
            }
            for (key, value) in &config.custom_settings {
                CliFormatter::print_field(key, value, Some("gray"));
            }
            Ok(())
        }

        ConfigAction::Set { key, value } => {
            let mut config = config;
            config
                .set(&key, &value)
                .with_context(|| format!("Failed to set '{}'", key))?;
            save_config(&config, config_path)?;
            info!("Updated config key {}", key);
            CliFormatter::print_success(&format!("Set {} = {}", key, value));
            Ok(())
        }

        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => anyhow::bail!("Unknown configuration key '{}'", key),
        },

        ConfigAction::Reset => {
            save_config(&Config::default(), config_path)?;
            CliFormatter::print_success("Configuration reset to defaults");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{day_hour, start_entry, stop_entry, with_test_context};
    use crate::utils::config::load_config;

    #[test]
    fn test_config_set_persists() {
        with_test_context(|ctx| {
            let config = load_config(&ctx.config_path)?;
            handle_command(
                Commands::Config {
                    action: ConfigAction::Set {
                        key: "duration_precision".to_string(),
                        value: "2".to_string(),
                    },
                },
                &ctx.config_path,
                config,
            )?;

            assert_eq!(load_config(&ctx.config_path)?.duration_precision, 2);
            Ok(())
        });
    }

    #[test]
    fn test_config_set_rejects_invalid_value() {
        with_test_context(|ctx| {
            let config = load_config(&ctx.config_path)?;
            let result = handle_command(
                Commands::Config {
                    action: ConfigAction::Set {
                        key: "duration_precision".to_string(),
                        value: "many".to_string(),
                    },
                },
                &ctx.config_path,
                config,
            );

            assert!(result.is_err());
            assert_eq!(load_config(&ctx.config_path)?.duration_precision, 1);
            Ok(())
        });
    }

    #[test]
    fn test_config_set_rejects_unrenderable_date_format() {
        with_test_context(|ctx| {
            let config = load_config(&ctx.config_path)?;
            let result = handle_command(
                Commands::Config {
                    action: ConfigAction::Set {
                        key: "date_format".to_string(),
                        value: "%Q".to_string(),
                    },
                },
                &ctx.config_path,
                config,
            );

            assert!(result.is_err());
            assert_eq!(load_config(&ctx.config_path)?.date_format, "%Y-%m-%d");
            Ok(())
        });
    }

    #[test]
    fn test_config_reset() {
        with_test_context(|ctx| {
            let mut config = load_config(&ctx.config_path)?;
            config.set("log_level", "debug")?;
            save_config(&config, &ctx.config_path)?;

            handle_command(
                Commands::Config {
                    action: ConfigAction::Reset,
                },
                &ctx.config_path,
                config,
            )?;

            assert_eq!(load_config(&ctx.config_path)?, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_report_export_to_file() {
        with_test_context(|ctx| {
            let script = ctx.write_script(
                "script.json",
                &[start_entry("C1", day_hour(0, 9)), stop_entry(day_hour(0, 11))],
            )?;
            let output = ctx.output_path("report.csv");

            handle_command(
                Commands::Report {
                    script,
                    format: ReportFormat::Csv,
                    output: Some(output.clone()),
                },
                &ctx.config_path,
                Config::default(),
            )?;

            let csv = std::fs::read_to_string(output)?;
            assert!(csv.contains("1970-01-01,C1,2.0,7200000"));
            Ok(())
        });
    }

    #[test]
    fn test_text_report_with_output_is_rejected() {
        with_test_context(|ctx| {
            let script = ctx.write_script("script.json", &[])?;

            let result = handle_command(
                Commands::Report {
                    script,
                    format: ReportFormat::Text,
                    output: Some(ctx.output_path("report.txt")),
                },
                &ctx.config_path,
                Config::default(),
            );

            assert!(result.is_err());
            Ok(())
        });
    }
}
