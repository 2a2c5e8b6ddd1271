//! Public and internal types for the wordtally API and pipeline.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::config::PipelineConsts;

/// A single line of input text, moved into the line channel by the reader and out of it by exactly one worker.
pub type Line = String;

/// Map of lower-cased word → occurrence count.
///
/// Used both for a worker's private accumulator and for the merged result returned by
/// [`count_words`](crate::count_words).
pub type WordCounts = HashMap<String, u64>;

/// A single parser worker's private accumulator. Same shape as [`WordCounts`]; only one thread ever mutates it.
pub type LocalCounts = WordCounts;

/// Lib-only options for [`count_words`](crate::count_words). Only the fields that affect the pipeline itself.
#[derive(Clone, Debug)]
pub struct TallyOpts {
    /// Override parser worker count. When None, uses the host's logical CPU count.
    pub num_workers: Option<usize>,
    /// Line channel capacity. `None` → `LINES_PER_WORKER × workers`; `Some(0)` → unbounded.
    pub channel_cap: Option<usize>,
    /// How long the orchestrator waits for workers before logging a "still waiting" diagnostic and waiting again.
    pub await_interval: Duration,
    /// Strict mode: a worker that dies without a result fails the whole run instead of being excluded from the merge.
    pub strict: bool,
}

impl Default for TallyOpts {
    fn default() -> Self {
        Self {
            num_workers: None,
            channel_cap: None,
            await_interval: PipelineConsts::AWAIT_INTERVAL,
            strict: false,
        }
    }
}

impl From<&TallyOpts> for Opts {
    fn from(o: &TallyOpts) -> Self {
        Opts {
            num_workers: o.num_workers,
            channel_cap: o.channel_cap,
            await_interval: o.await_interval,
            strict: o.strict,
            ..Opts::default()
        }
    }
}

/// Full options (CLI). Use [`TallyOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Override parser worker count. When None, uses the host's logical CPU count.
    pub num_workers: Option<usize>,
    /// Line channel capacity. `None` → `LINES_PER_WORKER × workers`; `Some(0)` → unbounded.
    pub channel_cap: Option<usize>,
    /// Re-check interval while awaiting workers.
    pub await_interval: Duration,
    /// Strict mode: fail the run when a worker result is missing.
    pub strict: bool,
    /// Verbose logging.
    pub verbose: bool,
    /// Show a progress bar over the input files.
    pub progress: bool,
    /// Only print the `top` most frequent words.
    pub top: Option<usize>,
    /// Print the result as JSON instead of a table.
    pub json: bool,
    /// Wait for the Return key before exiting.
    pub pause: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            num_workers: None,
            channel_cap: None,
            await_interval: PipelineConsts::AWAIT_INTERVAL,
            strict: false,
            verbose: false,
            progress: false,
            top: None,
            json: false,
            pause: false,
        }
    }
}

/// Everything a pipeline run produced: the merged counts plus the bookkeeping needed to check
/// that no line was lost or counted twice.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Merged word counts (the global map).
    pub counts: WordCounts,
    /// Lines the reader pushed onto the channel.
    pub lines_read: usize,
    /// Lines taken off the channel by workers whose results made it into the merge.
    pub lines_parsed: usize,
    /// Tokens counted by workers whose results made it into the merge.
    pub tokens_counted: u64,
    /// Files the reader could not open or finish, with the error message.
    pub failed_files: Vec<(PathBuf, String)>,
    /// Workers whose result was excluded from the merge, with the reason.
    pub failed_workers: Vec<(usize, String)>,
    /// Number of parser workers started.
    pub num_workers: usize,
}
