//! Reporting seam between the pipeline and whoever is watching it. The pipeline never prints;
//! it calls into a [`PipelineObserver`] and the caller decides what to do with each event.

use log::{debug, error, info, warn};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Lifecycle of one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    /// Reader and workers running concurrently.
    ReadingAndParsing,
    /// Reader done or failed; waiting for workers to drain the channel.
    Draining,
    Merging,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStage::Init => "init",
            PipelineStage::ReadingAndParsing => "reading+parsing",
            PipelineStage::Draining => "draining",
            PipelineStage::Merging => "merging",
            PipelineStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Events raised by the reader, the workers and the orchestrator. All methods default to no-ops
/// so an observer only implements what it cares about. Called from several threads at once.
pub trait PipelineObserver: Send + Sync {
    fn stage(&self, _stage: PipelineStage) {}

    fn file_started(&self, _path: &Path) {}

    fn file_finished(&self, _path: &Path, _lines: usize) {}

    /// Open or read failure. The rest of the file is skipped; the run continues.
    fn file_failed(&self, _path: &Path, _msg: &str) {}

    /// Every worker is gone so nothing can be pushed. Fatal for the reading phase of this run.
    fn reader_aborted(&self, _msg: &str) {}

    /// Reader thread died (panic). End of input was still signalled by the channel guard.
    fn reader_failed(&self, _msg: &str) {}

    /// Emitted once when the line channel closes.
    fn input_closed(&self, _lines_sent: usize) {}

    fn worker_finished(&self, _worker_id: usize, _lines: usize, _distinct_words: usize) {}

    /// Worker result missing; its counts are excluded from the merge.
    fn worker_failed(&self, _worker_id: usize, _msg: &str) {}

    /// Periodic diagnostic while the orchestrator waits for workers.
    fn still_waiting(&self, _pending: usize, _elapsed: Duration) {}
}

/// Default observer: route every event through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn stage(&self, stage: PipelineStage) {
        debug!("pipeline stage: {}", stage);
    }

    fn file_started(&self, path: &Path) {
        debug!("reading {}", path.display());
    }

    fn file_finished(&self, path: &Path, lines: usize) {
        debug!("finished {} ({} lines)", path.display(), lines);
    }

    fn file_failed(&self, path: &Path, msg: &str) {
        warn!("Exception in reading file: {}: {}", path.display(), msg);
    }

    fn reader_aborted(&self, msg: &str) {
        error!("Reader stopped early: {}", msg);
    }

    fn reader_failed(&self, msg: &str) {
        error!("Reader thread failed: {}", msg);
    }

    fn input_closed(&self, lines_sent: usize) {
        debug!("line channel closed after {} lines", lines_sent);
    }

    fn worker_finished(&self, worker_id: usize, lines: usize, distinct_words: usize) {
        debug!(
            "parser {} done: {} lines, {} distinct words",
            worker_id, lines, distinct_words
        );
    }

    fn worker_failed(&self, worker_id: usize, msg: &str) {
        warn!(
            "Parser {} produced no result, excluded from merge: {}",
            worker_id, msg
        );
    }

    fn still_waiting(&self, pending: usize, elapsed: Duration) {
        info!(
            "Still waiting for {} parser(s) after {:.1}s",
            pending,
            elapsed.as_secs_f64()
        );
    }
}
