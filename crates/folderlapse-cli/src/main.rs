mod cli;
mod commands;
mod config;
mod console;
mod environment;
mod error;
mod logging;
mod renderer;
mod utils;

use crate::cli::{Cli, Commands, RunArgs};
use crate::commands::Completion;
use crate::error::{CliError, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};

fn main() {
    let completion = run_app(Cli::parse());

    let code = match &completion.result {
        Ok(()) => 0,
        Err(e) => {
            error!("❌ Command failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            e.exit_code()
        }
    };

    if completion.pause_on_exit {
        wait_for_enter();
    }
    std::process::exit(code);
}

fn run_app(cli: Cli) -> Completion {
    if let Err(e) = init(&cli) {
        return Completion::immediate(Err(e));
    }

    info!("🚀 Folderlapse v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Commands::Env(args)) => {
            info!("Dispatching to 'env' command.");
            Completion::immediate(commands::env::run(args, config_path))
        }
        Some(Commands::Run(args)) => {
            info!("Dispatching to 'run' command.");
            commands::run::run(args, config_path)
        }
        None => {
            info!("No command given, dispatching to 'run' with defaults.");
            commands::run::run(RunArgs::default(), config_path)
        }
    }
}

fn init(cli: &Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));
    Ok(())
}

fn wait_for_enter() {
    print!("Press Enter to close...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
