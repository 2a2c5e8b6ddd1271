//! Load `.wordtally.toml` from a directory (CLI only). Lib does not use this; the consuming program injects config via TallyOpts.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct WordtallyToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    workers: Option<usize>,
    channel_cap: Option<usize>,
    await_interval_secs: Option<u64>,
    strict: Option<bool>,
    top: Option<usize>,
    json: Option<bool>,
    verbose: Option<bool>,
}

/// Load the settings file from `dir` if present. Returns None if the file is missing, unreadable or malformed (malformed is logged).
pub fn load_wordtally_toml(dir: &Path) -> Option<WordtallyToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_wordtally_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

/// Parse settings file contents.
pub fn parse_wordtally_toml(s: &str) -> Result<WordtallyToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($idx:expr, $opts:expr, $idx_field:ident => $opts_field:ident) => {
        if let Some(v) = $idx.$idx_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &WordtallyToml, opts: &mut Opts) {
    let s = &file.settings;
    if s.workers.is_some() {
        opts.num_workers = s.workers;
    }
    if s.channel_cap.is_some() {
        opts.channel_cap = s.channel_cap;
    }
    if let Some(secs) = s.await_interval_secs {
        opts.await_interval = Duration::from_secs(secs.max(1));
    }
    if s.top.is_some() {
        opts.top = s.top;
    }
    apply_file_opt!(s, opts, strict => strict);
    apply_file_opt!(s, opts, json => json);
    apply_file_opt!(s, opts, verbose => verbose);
}
