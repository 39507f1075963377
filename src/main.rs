use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod settings;
mod templates;
mod workflow;

use cli::{Command, RootArgs};
use settings::Settings;

fn main() -> Result<()> {
    if cli::citation_requested(std::env::args_os().skip(1)) {
        print!("{}", templates::CITATION_BIB);
        return Ok(());
    }

    let args = RootArgs::parse();
    init_tracing(args.verbose);

    if args.citation {
        print!("{}", templates::CITATION_BIB);
        return Ok(());
    }

    let Some(command) = args.command else {
        RootArgs::command().print_help()?;
        return Ok(());
    };

    let settings = Settings::resolve()?;
    tracing::debug!(version = settings.version(), "crispin starting");

    match command {
        Command::Run(run) => {
            let code = workflow::run_run(&run, &settings)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Command::Init(_) => workflow::run_init(&settings)?,
    }
    Ok(())
}

/// Logs go to stderr so the engine's stdout stays untouched.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
