//! CLI command handler: validate paths, run the pipeline, print the sorted table.

use anyhow::Result;
use log::{debug, info, warn};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::present::{render_json, render_table, sort_counts};
use crate::engine::progress::ConsoleObserver;
use crate::engine::validate::validate_paths;
use crate::pipeline::{LogObserver, PipelineObserver, collect_word_counts};
use crate::utils::{apply_file_to_opts, load_wordtally_toml, setup_logging};

/// Defaults, then `.wordtally.toml` in the working directory, then CLI flags.
fn setup_opts(cli: &Cli) -> Opts {
    let mut opts = Opts::default();
    let file = load_wordtally_toml(Path::new("."));
    if let Some(ref file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    cli.apply_to_opts(&mut opts);
    setup_logging(opts.verbose);
    if file.is_some() {
        debug!("Loaded settings file");
    }
    opts
}

fn wait_for_return_press() {
    println!();
    println!("Press Return key to exit...");
    let mut buf = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut buf) {
        warn!("Could not read from stdin: {}", e);
    }
}

fn run(cli: &Cli, opts: &Opts) -> Result<()> {
    validate_paths(&cli.files)?;

    let observer: Arc<dyn PipelineObserver> = if opts.progress {
        Arc::new(ConsoleObserver::new(cli.files.len()))
    } else {
        Arc::new(LogObserver)
    };
    let report = collect_word_counts(&cli.files, opts, observer)?;

    if !report.failed_files.is_empty() {
        warn!(
            "{} of {} files could not be fully read",
            report.failed_files.len(),
            cli.files.len()
        );
    }
    info!(
        "Counted {} words ({} distinct) from {} lines with {} parsers",
        report.tokens_counted,
        report.counts.len(),
        report.lines_parsed,
        report.num_workers
    );

    let sorted = sort_counts(&report.counts);
    if opts.json {
        println!("{}", render_json(&sorted, opts.top)?);
    } else {
        print!("{}", render_table(&sorted, opts.top));
    }
    Ok(())
}

/// Run a count over the CLI's files. With `--pause`, waits for Return before returning (also on error).
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli);
    let result = run(cli, &opts);
    if opts.pause {
        wait_for_return_press();
    }
    result
}
