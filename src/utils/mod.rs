pub mod config;
pub mod logger;
pub mod wordtally_toml;

pub use config::*;
pub use logger::setup_logging;
pub use wordtally_toml::{apply_file_to_opts, load_wordtally_toml, parse_wordtally_toml};
