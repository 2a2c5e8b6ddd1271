//! Pipeline components: line channel, reader, parser workers, orchestrator, observer.

pub mod channel;
pub mod context;
pub mod error_handler;
pub mod observer;
pub mod orchestrator;
pub mod parser;
pub mod reader;

pub use channel::{ChannelClosed, LineSender, line_channel};
pub use context::{PipelineChannels, PipelineHandles, PipelineTuning, create_pipeline_channels};
pub use error_handler::{check_for_failed_workers, panic_message};
pub use observer::{LogObserver, PipelineObserver, PipelineStage};
pub use orchestrator::{
    MergeResult, WorkerOutcome, await_reader, await_workers, collect_word_counts,
    merge_worker_results, run_pipeline,
};
pub use parser::{
    WorkerOutput, fold_char, is_word_char, parse_line, run_parser_loop, spawn_parser_workers, tokenize,
};
pub use reader::{ReaderSummary, run_read_loop, spawn_reader, strip_line_terminator};
