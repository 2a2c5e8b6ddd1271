//! Progress bar over input files for the CLI.

use kdam::{Animation, Bar, BarExt};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pipeline::{LogObserver, PipelineObserver, PipelineStage};

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " files"
    )))
}

/// Update progress bar if available.
/// Uses try_lock so the reader never blocks on the display; a contended update is skipped.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Force a refresh of the bar (e.g. so it shows the final state before the table prints).
pub fn refresh_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.refresh();
        eprintln!();
    }
}

/// CLI observer: everything [`LogObserver`] does, plus one bar tick per input file.
pub struct ConsoleObserver {
    log: LogObserver,
    bar: ProgressBar,
}

impl ConsoleObserver {
    pub fn new(file_count: usize) -> Self {
        Self {
            log: LogObserver,
            bar: create_progress_bar(ProgressBarConfig::new(
                file_count,
                "Reading",
                Animation::Classic,
            )),
        }
    }
}

impl PipelineObserver for ConsoleObserver {
    fn stage(&self, stage: PipelineStage) {
        self.log.stage(stage);
        if stage == PipelineStage::Done {
            refresh_bar(&self.bar);
        }
    }

    fn file_started(&self, path: &Path) {
        self.log.file_started(path);
    }

    fn file_finished(&self, path: &Path, lines: usize) {
        self.log.file_finished(path, lines);
        update_progress_bar(&self.bar, 1);
    }

    fn file_failed(&self, path: &Path, msg: &str) {
        self.log.file_failed(path, msg);
        update_progress_bar(&self.bar, 1);
    }

    fn reader_aborted(&self, msg: &str) {
        self.log.reader_aborted(msg);
    }

    fn reader_failed(&self, msg: &str) {
        self.log.reader_failed(msg);
    }

    fn input_closed(&self, lines_sent: usize) {
        self.log.input_closed(lines_sent);
    }

    fn worker_finished(&self, worker_id: usize, lines: usize, distinct_words: usize) {
        self.log.worker_finished(worker_id, lines, distinct_words);
    }

    fn worker_failed(&self, worker_id: usize, msg: &str) {
        self.log.worker_failed(worker_id, msg);
    }

    fn still_waiting(&self, pending: usize, elapsed: Duration) {
        self.log.still_waiting(pending, elapsed);
    }
}
