use clap::Parser;
use tracing::debug;

use tax_ui::config::AppConfig;
use tax_ui::{Cli, execute, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging = logging::init_logging()?;

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // Flags win over the config file; RUST_LOG wins over the config file too.
    match &cli.log_level {
        Some(level) => logging.set_level(level)?,
        None if std::env::var_os("RUST_LOG").is_none() => logging.set_level(&config.log_level)?,
        None => {}
    }
    logging.set_console(!cli.quiet);
    if let Some(path) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        logging.log_to_file(path)?;
    }

    debug!(command = ?cli.command, "starting");
    let output = execute(&cli, &config)?;
    print!("{output}");

    Ok(())
}
