use anyhow::Result;
use clap::Parser;

use quickrun::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
