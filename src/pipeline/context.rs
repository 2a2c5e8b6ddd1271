//! Pipeline context and tuning: per-run channels, thread handles and worker settings.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::channel::{LineSender, line_channel};
use super::observer::PipelineObserver;
use super::parser::WorkerOutput;
use super::reader::ReaderSummary;
use crate::utils::config::{PipelineConsts, WorkerThreadLimits};
use crate::{Line, Opts};

/// Worker count, channel capacity and await interval resolved for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineTuning {
    pub num_workers: usize,
    /// `None` means unbounded.
    pub channel_cap: Option<usize>,
    pub await_interval: Duration,
}

impl PipelineTuning {
    /// Resolve from opts: workers default to logical CPUs; capacity defaults to `LINES_PER_WORKER × workers`; `Some(0)` → unbounded.
    /// The await interval is never below `MIN_AWAIT_INTERVAL`.
    pub fn from_opts(opts: &Opts) -> Self {
        let num_workers = WorkerThreadLimits::current().resolve(opts.num_workers);
        let channel_cap = match opts.channel_cap {
            Some(0) => None,
            Some(n) => Some(n),
            None => Some(PipelineConsts::LINES_PER_WORKER * num_workers),
        };
        let tuning = Self {
            num_workers,
            channel_cap,
            await_interval: opts.await_interval.max(PipelineConsts::MIN_AWAIT_INTERVAL),
        };
        debug!("Pipeline tuning: {:?}", tuning);
        tuning
    }
}

/// Channels for one run. The reader gets `line_tx`; workers get clones of `line_rx` and `result_tx`.
pub struct PipelineChannels {
    pub line_tx: LineSender,
    pub line_rx: Receiver<Line>,
    pub result_tx: Sender<WorkerOutput>,
    pub result_rx: Receiver<WorkerOutput>,
}

pub fn create_pipeline_channels(
    tuning: &PipelineTuning,
    observer: &Arc<dyn PipelineObserver>,
) -> PipelineChannels {
    let (line_tx, line_rx) = line_channel(tuning.channel_cap, Arc::clone(observer));
    let (result_tx, result_rx) = unbounded::<WorkerOutput>();
    PipelineChannels {
        line_tx,
        line_rx,
        result_tx,
        result_rx,
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline). Owned by the orchestrator for the rest of the run;
/// nothing here outlives the run.
pub struct PipelineHandles {
    pub reader_handle: JoinHandle<ReaderSummary>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub result_rx: Receiver<WorkerOutput>,
    pub tuning: PipelineTuning,
}
