// botsentry/src/loader.rs
//
// Line source over the activity log. Lazy and non-restartable: one line at a
// time, so the log is never buffered whole.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use crate::error::DetectError;

pub struct LogLoader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl LogLoader {
    /// Open the log for reading. A missing or unreadable path is fatal.
    pub async fn open(path: &Path) -> Result<Self, DetectError> {
        let file = File::open(path).await.map_err(|source| DetectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("reading {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }

    /// Next raw line, or `None` at end of input. Mid-read I/O failures are
    /// fatal like open failures.
    pub async fn next_line(&mut self) -> Result<Option<String>, DetectError> {
        self.lines
            .next_line()
            .await
            .map_err(|source| DetectError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
