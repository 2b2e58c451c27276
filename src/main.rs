// src/main.rs

use clap::Parser;

use scriptcast::cli::CliArgs;
use scriptcast::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_level)?;
    scriptcast::run(args).await
}
