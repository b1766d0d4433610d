//! Deletion archive stored as a pretty-printed JSON array on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use texnomart_core::lifecycle::{
    append_to_archive, decode_archive, ArchiveLog, ArchivedRecord, LifecycleError, Result,
};

/// Archive log backed by a single JSON file.
///
/// Every append reads the whole file, adds the batch and rewrites it once. Appends
/// from this process are serialized so concurrent deletions never drop records.
/// A missing file is an empty archive.
#[derive(Debug)]
pub struct JsonFileArchive {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_contents(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(LifecycleError::ArchiveRead(format!(
                "{}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl ArchiveLog for JsonFileArchive {
    async fn append_all(&self, records: &[ArchivedRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let _guard = self.write_lock.lock().await;

        let contents = self.read_contents().await?;
        let updated = append_to_archive(&contents, records)?;

        tokio::fs::write(&self.path, updated).await.map_err(|err| {
            LifecycleError::ArchiveWrite(format!("{}: {err}", self.path.display()))
        })?;

        for record in records {
            tracing::debug!(
                model = %record.model,
                id = ?record.data.id,
                path = %self.path.display(),
                "Archived record"
            );
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ArchivedRecord>> {
        let contents = self.read_contents().await?;
        decode_archive(&contents)
    }
}
