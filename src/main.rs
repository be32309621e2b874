use anyhow::Context;
use clap::Parser;
use smbscout::cli::{Cli, Commands};
use smbscout::config::AppSettings;
use smbscout::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    match &cli.command {
        None => cli.run.execute(&settings, cli.verbose, cli.quiet).await?,
        Some(Commands::Run(cmd)) => cmd.execute(&settings, cli.verbose, cli.quiet).await?,
        Some(Commands::Discover(cmd)) => cmd.execute(&settings, cli.verbose, cli.quiet).await?,
        Some(Commands::Interfaces(cmd)) => cmd.execute(&settings)?,
        Some(Commands::Config(cmd)) => cmd.execute(&settings, cli.config.as_deref())?,
    }

    Ok(())
}

/// Load settings, tolerating a broken file only for `config` so it can be rewritten.
fn load_settings(cli: &Cli) -> anyhow::Result<AppSettings> {
    let loaded = AppSettings::load_or_default(cli.config.as_deref());

    match (loaded, &cli.command) {
        (Ok(settings), _) => Ok(settings),
        (Err(e), Some(Commands::Config(_))) => {
            output::print_warning(&format!("{}; showing defaults", e));
            Ok(AppSettings::default())
        }
        (Err(e), _) => Err(e).context("failed to load settings"),
    }
}

/// Logs go to stderr so JSON and CSV output on stdout stays clean.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smbscout={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
