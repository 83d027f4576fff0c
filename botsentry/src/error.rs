// botsentry/src/error.rs
//
// Fatal errors only. Per-line parse failures are not errors — they are
// counted under a SkipReason (parser.rs) and the run continues.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    /// The activity log could not be opened or read. A caller holding this
    /// never saw a result — distinct from a run that found zero bots.
    #[error("cannot read activity log {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A per-user analysis task died before reporting. The run is aborted
    /// rather than returning a partial bot list as if it were complete.
    #[error("analysis worker failed: {0}")]
    Worker(String),
}
