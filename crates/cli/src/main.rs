use anyhow::Result;
use cardsmith_cli::cli::Cli;
use clap::Parser;
use env_logger::init;

fn main() -> Result<()> {
    init();
    Cli::parse().command.run()
}
