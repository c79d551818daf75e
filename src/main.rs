//! Wordlist Forge - exhaustive character-combination wordlist generator

use anyhow::{anyhow, Context};
use std::process;
use wordlist_forge::{cli::Cli, estimate::SystemSpaceProbe, CancellationToken};

fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads WORDLIST_* variables
    wordlist_forge::init().context("failed to initialize")?;
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))?;

    let cancel = CancellationToken::new();
    cancel.cancel_on_ctrl_c()?;

    if let Err(e) = wordlist_forge::cli::run(&cli, &SystemSpaceProbe, cancel) {
        eprintln!("{}", e.user_message());
        process::exit(e.exit_code());
    }

    Ok(())
}
