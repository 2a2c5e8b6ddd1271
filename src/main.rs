//! Wordtally CLI: count word frequencies across the given files.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use wordtally::engine::arg_parser::Cli;
use wordtally::engine::handle_run;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
