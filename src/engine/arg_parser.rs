use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::Opts;

/// Concurrent word-frequency counter.
#[derive(Clone, Debug, Parser)]
#[command(name = "wordtally")]
#[command(about = "Count word frequencies across text files using a reader thread and a pool of parser threads.")]
pub struct Cli {
    /// Text files to count, read in the order given.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Number of parser threads. Default: logical CPU count.
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Line channel capacity (0 = unbounded). Default: 4 lines per parser thread.
    #[arg(long)]
    pub channel_cap: Option<usize>,

    /// Seconds between "still waiting" diagnostics while parsers finish.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub await_interval: Option<u64>,

    /// Print only the N most frequent words.
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    /// Print the result as JSON.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,

    /// Strict mode: fail when a parser thread dies instead of merging the rest.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Show a progress bar over the input files.
    #[arg(long, short = 'p', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,

    /// Wait for the Return key before exiting.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub pause: Option<bool>,
}

impl Cli {
    /// Apply flags given on the command line over `opts` (file config or defaults).
    pub fn apply_to_opts(&self, opts: &mut Opts) {
        if self.workers.is_some() {
            opts.num_workers = self.workers;
        }
        if self.channel_cap.is_some() {
            opts.channel_cap = self.channel_cap;
        }
        if let Some(secs) = self.await_interval {
            opts.await_interval = Duration::from_secs(secs);
        }
        if self.top.is_some() {
            opts.top = self.top;
        }
        if let Some(v) = self.json {
            opts.json = v;
        }
        if let Some(v) = self.strict {
            opts.strict = v;
        }
        if let Some(v) = self.verbose {
            opts.verbose = v;
        }
        if let Some(v) = self.progress {
            opts.progress = v;
        }
        if let Some(v) = self.pause {
            opts.pause = v;
        }
    }
}
