use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "beltime")]
#[command(about = "Time tracking with daily billing reports per charge number")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Beltime Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(long, short, global = true, help = "Verbose output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Generate daily billing reports from a time card script")]
    Report {
        #[arg(help = "JSON file of start/stop/reset entries")]
        script: PathBuf,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text, help = "Output format")]
        format: ReportFormat,

        #[arg(long, short, help = "Write the export to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    #[command(about = "List the activities recorded by a time card script")]
    Activities {
        #[arg(help = "JSON file of start/stop/reset entries")]
        script: PathBuf,
    },

    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show current configuration")]
    Show,

    #[command(about = "Set configuration value")]
    Set {
        #[arg(help = "Configuration key")]
        key: String,

        #[arg(help = "Configuration value")]
        value: String,
    },

    #[command(about = "Get configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },

    #[command(about = "Reset configuration to defaults")]
    Reset,
}
