use beltime::cli::{commands::handle_command, Cli, Parser};
use beltime::utils::config::{load_config, resolve_config_path};
use env_logger::Env;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = load_config(&config_path)?;

    // RUST_LOG wins over --verbose, which wins over the configured level
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    handle_command(cli.command, &config_path, config)
}
