//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;
use std::time::Duration;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    thread_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                thread_prefix: format!("{pkg}-"),
            }
        })
    }

    /// Name of the optional settings file looked up in the working directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Thread name for a pipeline role, e.g. `wordtally-reader`, `wordtally-parser-3`.
    pub fn thread_name(&self, role: &str) -> String {
        format!("{}{}", self.thread_prefix, role)
    }
}

// ---- Worker threads ----

/// Worker count limits.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the floor is const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Minimum parser workers for any run.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()` (logical CPUs).
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Worker count for a run: the override when given, otherwise all available threads; never below the floor.
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.all_threads).max(self.floor)
    }
}

// ---- Pipeline ----

/// Line channel and orchestrator tuning.
pub struct PipelineConsts;

impl PipelineConsts {
    /// Default channel capacity is this many lines per parser worker (enough slack that workers rarely idle).
    pub const LINES_PER_WORKER: usize = 4;
    /// Orchestrator re-check interval while waiting for workers.
    pub const AWAIT_INTERVAL: Duration = Duration::from_secs(5);
    /// Floor for the re-check interval so a zero from the lib API cannot turn the wait into a busy loop.
    pub const MIN_AWAIT_INTERVAL: Duration = Duration::from_millis(1);
}

// ---- Presentation ----

/// Result sets at least this large are sorted with rayon.
pub const PAR_SORT_THRESHOLD: usize = 50_000;

/// Rule line framing the printed table.
pub const LINE_BREAK: &str = "----------------------------------";
