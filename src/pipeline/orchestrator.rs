use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::debug;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::pipeline::{
    self, PipelineHandles, PipelineObserver, PipelineStage, PipelineTuning, ReaderSummary,
    WorkerOutput, check_for_failed_workers, panic_message,
};
use crate::{Opts, PipelineReport, WordCounts};

/// How one worker ended, as seen by the orchestrator.
#[derive(Debug)]
pub enum WorkerOutcome {
    Completed(WorkerOutput),
    Failed { worker_id: usize, reason: String },
}

/// Merged counts plus totals from the workers that contributed.
#[derive(Debug, Default)]
pub struct MergeResult {
    pub counts: WordCounts,
    pub lines_parsed: usize,
    pub tokens_counted: u64,
    pub failed_workers: Vec<(usize, String)>,
}

/// Start the reader + parser pipeline. Returns handles; caller must wait on
/// `reader_handle`, drain `result_rx` and join `worker_handles`.
pub fn run_pipeline(
    paths: &[PathBuf],
    opts: &Opts,
    observer: &Arc<dyn PipelineObserver>,
) -> Result<PipelineHandles> {
    let tuning = PipelineTuning::from_opts(opts);
    let channels = pipeline::create_pipeline_channels(&tuning, observer);

    let reader_handle =
        pipeline::spawn_reader(paths.to_vec(), channels.line_tx, Arc::clone(observer))?;

    let worker_handles = pipeline::spawn_parser_workers(
        channels.line_rx,
        &channels.result_tx,
        tuning.num_workers,
        observer,
    )?;

    // Dropping the last result sender closes the result channel once every worker is done.
    drop(channels.result_tx);
    observer.stage(PipelineStage::ReadingAndParsing);

    Ok(PipelineHandles {
        reader_handle,
        worker_handles,
        result_rx: channels.result_rx,
        tuning,
    })
}

/// Wait for the reader thread. A panicked reader is reported and treated as an aborted read;
/// its channel guard has already closed the line channel during unwinding.
pub fn await_reader(
    reader_handle: JoinHandle<ReaderSummary>,
    observer: &dyn PipelineObserver,
) -> ReaderSummary {
    match reader_handle.join() {
        Ok(summary) => summary,
        Err(payload) => {
            observer.reader_failed(&panic_message(payload.as_ref()));
            ReaderSummary {
                aborted: true,
                ..ReaderSummary::default()
            }
        }
    }
}

/// Wait for every worker. Polls `result_rx` with `await_interval`; each timeout raises
/// `still_waiting` and the wait continues (never gives up). Then joins the threads so a worker
/// that died without sending is reported as [`WorkerOutcome::Failed`].
pub fn await_workers(
    result_rx: &Receiver<WorkerOutput>,
    worker_handles: Vec<JoinHandle<()>>,
    await_interval: Duration,
    observer: &dyn PipelineObserver,
) -> Vec<WorkerOutcome> {
    let started = Instant::now();
    let total = worker_handles.len();
    let mut outputs: Vec<WorkerOutput> = Vec::with_capacity(total);
    loop {
        match result_rx.recv_timeout(await_interval) {
            Ok(out) => outputs.push(out),
            Err(RecvTimeoutError::Timeout) => {
                observer.still_waiting(total.saturating_sub(outputs.len()), started.elapsed())
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!(
        "main: result channel closed, {}/{} parser results in {:?}",
        outputs.len(),
        total,
        started.elapsed()
    );

    let reported: HashSet<usize> = outputs.iter().map(|o| o.worker_id).collect();
    let mut outcomes: Vec<WorkerOutcome> =
        outputs.into_iter().map(WorkerOutcome::Completed).collect();
    for (worker_id, handle) in worker_handles.into_iter().enumerate() {
        let joined = handle.join();
        if reported.contains(&worker_id) {
            continue;
        }
        let reason = match joined {
            Err(payload) => panic_message(payload.as_ref()),
            Ok(()) => "worker exited without a result".to_string(),
        };
        outcomes.push(WorkerOutcome::Failed { worker_id, reason });
    }
    outcomes
}

/// Additively merge every completed worker map into one global map. Failed workers are
/// reported and left out; in strict mode any failure fails the merge.
pub fn merge_worker_results(
    outcomes: Vec<WorkerOutcome>,
    strict: bool,
    observer: &dyn PipelineObserver,
) -> Result<MergeResult> {
    let mut merged = MergeResult::default();
    for outcome in outcomes {
        match outcome {
            WorkerOutcome::Completed(out) => {
                merged.lines_parsed += out.lines_parsed;
                merged.tokens_counted += out.tokens_counted;
                if merged.counts.is_empty() {
                    merged.counts = out.counts;
                    continue;
                }
                for (word, count) in out.counts {
                    *merged.counts.entry(word).or_insert(0) += count;
                }
            }
            WorkerOutcome::Failed { worker_id, reason } => {
                observer.worker_failed(worker_id, &reason);
                merged.failed_workers.push((worker_id, reason));
            }
        }
    }
    check_for_failed_workers(strict, &merged.failed_workers)?;
    Ok(merged)
}

/// Main orchestrator: count words across `paths` via the streaming pipeline.
/// Reader → line channel → parser workers → result channel → merged map.
pub fn collect_word_counts(
    paths: &[PathBuf],
    opts: &Opts,
    observer: Arc<dyn PipelineObserver>,
) -> Result<PipelineReport> {
    observer.stage(PipelineStage::Init);
    let PipelineHandles {
        reader_handle,
        worker_handles,
        result_rx,
        tuning,
    } = run_pipeline(paths, opts, &observer)?;

    observer.stage(PipelineStage::Draining);
    let reader = await_reader(reader_handle, observer.as_ref());
    let outcomes = await_workers(
        &result_rx,
        worker_handles,
        tuning.await_interval,
        observer.as_ref(),
    );

    observer.stage(PipelineStage::Merging);
    let merged = merge_worker_results(outcomes, opts.strict, observer.as_ref())?;
    debug!(
        "main: merged {} distinct words from {} lines",
        merged.counts.len(),
        merged.lines_parsed
    );

    observer.stage(PipelineStage::Done);
    Ok(PipelineReport {
        counts: merged.counts,
        lines_read: reader.lines_sent,
        lines_parsed: merged.lines_parsed,
        tokens_counted: merged.tokens_counted,
        failed_files: reader.failed_files,
        failed_workers: merged.failed_workers,
        num_workers: tuning.num_workers,
    })
}
