//! Engine module: CLI glue around the pipeline (arguments, validation, presentation)

pub mod arg_parser;
pub mod cli;
pub mod present;
pub mod progress;
pub mod validate;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use present::{render_json, render_table, sort_counts};
pub use progress::ConsoleObserver;
pub use validate::{check_path, validate_paths};
