//! Rendseq Demo — headless frame sequence capture.
//!
//! Animates a test scene in a single-threaded host loop and captures a frame
//! range to disk through the `rendseq-core` scheduler.

mod app;
mod cli;
mod config;
mod error;
mod host;
mod renderer;
mod scene;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::DemoError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run_cli(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(args: Cli) -> Result<(), DemoError> {
    let config = config::resolve(&args)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let window = (args.window_width, args.window_height);
    let stats = runtime.block_on(app::run(config, window, args.realtime))?;

    if stats.failed > 0 {
        tracing::warn!("{} frames could not be captured", stats.failed);
    }
    Ok(())
}
