//! The line channel: the only shared mutable resource between the reader and the parser workers.
//!
//! End of input is structural. [`LineSender`] owns the one and only sending half and is not
//! `Clone`; when it is dropped (normal return, early return or unwinding) the channel closes and
//! every worker's `recv()` returns `Err` once the buffered lines are drained. No in-band marker
//! value exists, so nothing in the input can be mistaken for end of input.

use crossbeam_channel::{Receiver, SendError, Sender, bounded, unbounded};
use std::fmt;
use std::sync::Arc;

use super::observer::PipelineObserver;
use crate::Line;

/// Push failed because every receiver is gone (all workers exited or died).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelClosed;

impl fmt::Display for ChannelClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("line channel has no receivers left")
    }
}

impl std::error::Error for ChannelClosed {}

/// Sending half of the line channel. Dropping it is the end-of-input signal.
pub struct LineSender {
    tx: Sender<Line>,
    lines_sent: usize,
    observer: Arc<dyn PipelineObserver>,
}

impl LineSender {
    /// Push one line. Blocks while a bounded channel is full.
    pub fn push(&mut self, line: Line) -> Result<(), ChannelClosed> {
        self.tx.send(line).map_err(|SendError(_)| ChannelClosed)?;
        self.lines_sent += 1;
        Ok(())
    }

    pub fn lines_sent(&self) -> usize {
        self.lines_sent
    }

    /// Signal end of input now instead of at scope exit.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for LineSender {
    fn drop(&mut self) {
        // `tx` is dropped right after this, which disconnects the channel.
        self.observer.input_closed(self.lines_sent);
    }
}

/// Create the line channel. `cap == Some(0)` or `None` → unbounded; otherwise bounded (push blocks when full).
pub fn line_channel(
    cap: Option<usize>,
    observer: Arc<dyn PipelineObserver>,
) -> (LineSender, Receiver<Line>) {
    let (tx, rx) = match cap {
        Some(n) if n > 0 => bounded::<Line>(n),
        _ => unbounded::<Line>(),
    };
    (
        LineSender {
            tx,
            lines_sent: 0,
            observer,
        },
        rx,
    )
}
