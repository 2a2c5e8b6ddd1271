//! Parser workers: pull lines off the shared channel, tokenize, and count into a private map.

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::observer::PipelineObserver;
use crate::utils::config::PackagePaths;
use crate::{Line, LocalCounts};

/// A finished worker's hand-off to the orchestrator. Owned by the orchestrator once sent.
#[derive(Clone, Debug, Default)]
pub struct WorkerOutput {
    pub worker_id: usize,
    pub lines_parsed: usize,
    pub tokens_counted: u64,
    pub counts: LocalCounts,
}

/// Word characters are Unicode alphanumerics and `_`; everything else separates tokens.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// One-to-one lower-casing: a char whose lowercase form is more than one char (e.g. `İ`) is kept as is.
#[inline]
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Split `line` on runs of non-word characters, drop empty pieces, lower-case the rest char by char.
pub fn tokenize(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().map(fold_char).collect::<String>())
}

/// Count every token of `line` into `counts`. Returns how many tokens were counted.
pub fn parse_line(line: &str, counts: &mut LocalCounts) -> usize {
    let mut n = 0;
    for word in tokenize(line) {
        *counts.entry(word).or_insert(0) += 1;
        n += 1;
    }
    n
}

/// Single worker: take lines until the channel is closed and drained, then return the local map.
/// `recv()` only fails once the reader's sender is gone and nothing is buffered, which is the end-of-input signal.
pub fn run_parser_loop(
    worker_id: usize,
    line_rx: &Receiver<Line>,
    observer: &dyn PipelineObserver,
) -> WorkerOutput {
    let mut out = WorkerOutput {
        worker_id,
        ..WorkerOutput::default()
    };
    while let Ok(line) = line_rx.recv() {
        out.tokens_counted += parse_line(&line, &mut out.counts) as u64;
        out.lines_parsed += 1;
    }
    observer.worker_finished(worker_id, out.lines_parsed, out.counts.len());
    out
}

/// Spawn `num_workers` parser threads sharing `line_rx`. Each sends its [`WorkerOutput`] on `result_tx` when done.
/// Caller must drop its own `result_tx` after this so the result channel closes once every worker has exited.
pub fn spawn_parser_workers(
    line_rx: Receiver<Line>,
    result_tx: &Sender<WorkerOutput>,
    num_workers: usize,
    observer: &Arc<dyn PipelineObserver>,
) -> Result<Vec<JoinHandle<()>>> {
    (0..num_workers)
        .map(|worker_id| {
            let line_rx = line_rx.clone();
            let result_tx = result_tx.clone();
            let observer = Arc::clone(observer);
            thread::Builder::new()
                .name(PackagePaths::get().thread_name(&format!("parser-{worker_id}")))
                .spawn(move || {
                    let out = run_parser_loop(worker_id, &line_rx, observer.as_ref());
                    // Orchestrator gone means nobody wants the result; nothing else to do with it.
                    let _ = result_tx.send(out);
                })
                .with_context(|| format!("spawn parser worker {worker_id}"))
        })
        .collect()
}
