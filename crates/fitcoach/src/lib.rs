//! Public surface for fitcoach.
//!
//! This crate re-exports the building blocks used by the `fitcoach` binary
//! and provides logging and journal-location helpers shared by front ends.

pub mod render;

/// Re-export for convenience.
pub use fitcoach_config as config;
pub use fitcoach_core as core;
/// Re-export for convenience.
pub use fitcoach_memory as memory;
/// Re-export for convenience.
pub use fitcoach_protocol as protocol;

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name of the default log journal.
pub const DEFAULT_JOURNAL_FILE: &str = "logs.jsonl";
/// File name of the chat transcript, stored beside the log journal.
pub const CHAT_TRANSCRIPT_FILE: &str = "chat.jsonl";

#[inline]
/// Initialize `env_logger` with millisecond timestamps and `RUST_LOG` filtering.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}

/// Journal location under the platform data directory.
pub fn default_journal_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "fitcoach", "fitcoach")
        .map(|dirs| dirs.data_dir().join(DEFAULT_JOURNAL_FILE))
}

/// Pick the journal path: explicit flag, then config, then the platform default.
pub fn resolve_journal_path(
    flag: Option<PathBuf>,
    configured: Option<&str>,
) -> Option<PathBuf> {
    flag.or_else(|| configured.map(PathBuf::from))
        .or_else(default_journal_path)
}

/// Chat transcript location: same directory as the journal.
pub fn chat_transcript_path(journal_path: &Path) -> PathBuf {
    journal_path.with_file_name(CHAT_TRANSCRIPT_FILE)
}
