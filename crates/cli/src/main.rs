mod config;
mod shell;

use std::io;

use clap::Parser;
use portfolio_tracker_core::PortfolioTracker;

use config::Args;
use shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = args.into_settings();
    let tracker = PortfolioTracker::from_settings(&settings)?;
    log::info!("using price provider {}", tracker.provider_name());

    let stdin = io::stdin();
    let mut shell = Shell::new(tracker, stdin.lock(), io::stdout());
    shell.run().await?;
    Ok(())
}
