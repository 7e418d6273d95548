//! File-backed image delivery: temp-file writing and cleanup.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;

use pi_core::clipboard::MimeType;
use pi_core::ports::{TempStoreError, TempStorePort};

/// Reserved prefix identifying files created by the file-backed delivery
/// path. [`FileTempStore::clear`] removes exactly the files carrying it.
pub const TEMP_FILE_PREFIX: &str = "paste_";

pub struct FileTempStore {
    dir: PathBuf,
}

impl FileTempStore {
    /// Store backed by the OS temp directory.
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }

    /// Store backed by a caller-chosen writable directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for FileTempStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TempStorePort for FileTempStore {
    async fn write_image(&self, bytes: &[u8], mime: &MimeType) -> Result<PathBuf, TempStoreError> {
        let ext = mime
            .preferred_extension()
            .ok_or_else(|| TempStoreError::UnsupportedMime(mime.to_string()))?;

        // Corrupt bytes never make it onto disk; the caller treats this the
        // same as absent content.
        if image::guess_format(bytes).is_err() {
            return Err(TempStoreError::CorruptImage);
        }

        let stamp = chrono::Utc::now().timestamp_millis();
        let path = loop {
            let nonce: u32 = rand::rng().random_range(0..100_000);
            let candidate = self
                .dir
                .join(format!("{TEMP_FILE_PREFIX}{stamp}_{nonce}.{ext}"));
            if !candidate.exists() {
                break candidate;
            }
        };

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| TempStoreError::Write(e.to_string()))?;

        Ok(path)
    }

    async fn clear(&self) -> Result<usize, TempStoreError> {
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| TempStoreError::Write(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| TempStoreError::Write(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.starts_with(TEMP_FILE_PREFIX) {
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                Err(err) => {
                    log::warn!(
                        "failed to remove temp artifact {}: {}",
                        entry.path().display(),
                        err
                    );
                }
            }
        }

        Ok(removed)
    }
}
