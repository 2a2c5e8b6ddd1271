//! Line source: one thread that opens each input file in order and pushes every line onto the line channel.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::channel::{ChannelClosed, LineSender};
use super::observer::PipelineObserver;
use crate::utils::config::PackagePaths;

/// What the reader did. Returned from the reader thread's join.
#[derive(Clone, Debug, Default)]
pub struct ReaderSummary {
    /// Files read to the end without error.
    pub files_read: usize,
    /// Lines pushed onto the channel (across all files).
    pub lines_sent: usize,
    /// Files that failed to open or failed mid-read, with the error message.
    pub failed_files: Vec<(PathBuf, String)>,
    /// True when pushing stopped because every worker was gone.
    pub aborted: bool,
}

/// Why a single file stopped early.
enum FileOutcome {
    Done(usize),
    Failed(anyhow::Error),
    ChannelClosed,
}

/// Strip one trailing `\n` and then one trailing `\r`. Nothing else is trimmed.
pub fn strip_line_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

/// Stream one file into the channel. Lines already pushed before an error stay pushed.
/// Bytes that are not valid UTF-8 become U+FFFD; only real I/O errors stop the file.
fn push_file_lines(path: &Path, sender: &mut LineSender) -> FileOutcome {
    let file = match File::open(path).with_context(|| format!("open {}", path.display())) {
        Ok(f) => f,
        Err(e) => return FileOutcome::Failed(e),
    };
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut count = 0_usize;
    loop {
        buf.clear();
        match reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("read {} after line {}", path.display(), count))
        {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => return FileOutcome::Failed(e),
        }
        strip_line_terminator(&mut buf);
        let line = String::from_utf8_lossy(&buf).into_owned();
        if let Err(ChannelClosed) = sender.push(line) {
            return FileOutcome::ChannelClosed;
        }
        count += 1;
    }
    FileOutcome::Done(count)
}

/// Run the read loop over `paths` in order. Per-file failures are reported and skipped.
/// Consumes `sender`, so the channel is closed when this returns (or unwinds) no matter how reading ended.
pub fn run_read_loop(
    paths: &[PathBuf],
    mut sender: LineSender,
    observer: &dyn PipelineObserver,
) -> ReaderSummary {
    let mut summary = ReaderSummary::default();
    for path in paths {
        observer.file_started(path);
        match push_file_lines(path, &mut sender) {
            FileOutcome::Done(lines) => {
                summary.files_read += 1;
                observer.file_finished(path, lines);
            }
            FileOutcome::Failed(err) => {
                let msg = format!("{:#}", err);
                observer.file_failed(path, &msg);
                summary.failed_files.push((path.clone(), msg));
            }
            FileOutcome::ChannelClosed => {
                summary.aborted = true;
                observer.reader_aborted(&format!(
                    "{} while reading {}",
                    ChannelClosed,
                    path.display()
                ));
                break;
            }
        }
    }
    summary.lines_sent = sender.lines_sent();
    sender.close();
    summary
}

/// Spawn the reader thread. The returned handle yields the [`ReaderSummary`].
pub fn spawn_reader(
    paths: Vec<PathBuf>,
    sender: LineSender,
    observer: Arc<dyn PipelineObserver>,
) -> Result<JoinHandle<ReaderSummary>> {
    thread::Builder::new()
        .name(PackagePaths::get().thread_name("reader"))
        .spawn(move || run_read_loop(&paths, sender, observer.as_ref()))
        .context("spawn reader thread")
}
