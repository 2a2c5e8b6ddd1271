//! Wordtally: concurrent word-frequency counter over a set of text files.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

use crate::pipeline::{LogObserver, PipelineObserver};

/// Result alias used by public wordtally API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Count words across `paths` and return the merged map.
///
/// Files are read in order by one reader thread; lines are tokenized by `opts.num_workers` parser
/// threads (default: logical CPUs). A file that fails to open or read is logged and skipped.
/// Paths are not validated here; see [`engine::validate_paths`] for the CLI's checks.
///
/// ```no_run
/// let counts = wordtally::count_words(&[std::path::PathBuf::from("a.txt")], &wordtally::TallyOpts::default())?;
/// # Ok::<(), wordtally::Error>(())
/// ```
pub fn count_words(paths: &[PathBuf], opts: &TallyOpts) -> Result<WordCounts> {
    let report = count_words_with_observer(paths, opts, Arc::new(LogObserver))?;
    Ok(report.counts)
}

/// Same as [`count_words`] but reports progress to `observer` and returns the full [`PipelineReport`]
/// (line totals, failed files, excluded workers).
pub fn count_words_with_observer(
    paths: &[PathBuf],
    opts: &TallyOpts,
    observer: Arc<dyn PipelineObserver>,
) -> Result<PipelineReport> {
    let opts = Opts::from(opts);
    let config_str = format!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    debug!("{}", config_str);
    pipeline::collect_word_counts(paths, &opts, observer)
}
