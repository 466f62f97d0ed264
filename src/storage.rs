//! Data log sinks
//!
//! The logger hands complete, newline-terminated lines to a [`LogSink`]. A
//! line either reaches storage in full or the append fails; there is no
//! partial-line recovery.

use crate::error::{KwLogError, Result};
use crate::logging::get_logger;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Append-only destination for log lines
#[async_trait::async_trait]
pub trait LogSink: Send {
    /// Append `line` verbatim. The text already ends with `\n`.
    async fn append_line(&mut self, line: &str) -> Result<()>;
}

/// Log file on local storage, flushed after every line
pub struct FileSink {
    file: File,
    path: PathBuf,
    logger: crate::logging::StructuredLogger,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed. If `path` is an
    /// existing directory a new `kwlog_<timestamp>.csv` file is created in it.
    pub async fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let logger = get_logger("storage");
        let mut path = path.as_ref().to_path_buf();
        if tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            path = path.join(session_file_name(chrono::Local::now()));
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                KwLogError::storage(format!("Cannot open {}: {}", path.display(), e))
            })?;

        logger.info(&format!("Writing data log to {}", path.display()));
        Ok(Self { file, path, logger })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name for a session started at `now`
pub fn session_file_name<Tz: chrono::TimeZone>(now: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("kwlog_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

#[async_trait::async_trait]
impl LogSink for FileSink {
    async fn append_line(&mut self, line: &str) -> Result<()> {
        let res = async {
            self.file.write_all(line.as_bytes()).await?;
            self.file.flush().await
        }
        .await;

        res.map_err(|e| {
            let msg = format!("Append to {} failed: {}", self.path.display(), e);
            self.logger.error(&msg);
            KwLogError::storage(msg)
        })
    }
}
