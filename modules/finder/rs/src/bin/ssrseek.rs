use clap::Parser;
use eyre::Result;

use ssrseek_finder_rs::cli::{run, Cli};

fn main() -> Result<()> {
    run(Cli::parse())
}
