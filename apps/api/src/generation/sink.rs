//! Document output sink.
//!
//! The only async boundary in the generation pipeline. `FileSink` writes the
//! finished document through a named temp file in the target directory and
//! persists it atomically: a failure at any point drops the temp file, so no
//! partial artifact is ever left behind.

use std::io::Write as _;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Where finished documents go. Trait seam so tests can substitute a slow or
/// failing sink.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Writes `contents` under `filename`, returning the final path.
    async fn write(&self, filename: &str, contents: Bytes) -> Result<PathBuf, AppError>;
}

/// Writes documents into a configured output directory.
pub struct FileSink {
    output_dir: PathBuf,
}

impl FileSink {
    pub fn new(output_dir: PathBuf) -> Self {
        FileSink { output_dir }
    }
}

#[async_trait]
impl DocumentSink for FileSink {
    async fn write(&self, filename: &str, contents: Bytes) -> Result<PathBuf, AppError> {
        let dir = self.output_dir.clone();
        let path = dir.join(filename);
        let final_path = path.clone();

        // Blocking filesystem work off the async executor.
        let written = tokio::task::spawn_blocking(move || -> anyhow::Result<PathBuf> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&contents)?;
            tmp.flush()?;
            // Atomic rename; on error the temp file is dropped and removed.
            tmp.persist(&path)?;
            Ok(path)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in sink: {e}")))?
        .map_err(|e| AppError::Generation(e.to_string()))?;

        info!("Document written to {}", written.display());
        Ok(final_path)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
