use crate::domain::ports::{DataEntry, DataSource, EntryKind};
use crate::utils::error::{AtlasError, Result};
use std::path::{Path, PathBuf};

/// Data corpus on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDataSource {
    base_path: PathBuf,
}

impl LocalDataSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.base_path.clone()
        } else {
            self.base_path.join(Path::new(relative))
        }
    }
}

impl DataSource for LocalDataSource {
    async fn list_entries(&self, dir: &str) -> Result<Vec<DataEntry>> {
        let full_path = self.resolve(dir);
        let mut reader = tokio::fs::read_dir(&full_path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            let name = entry.file_name().into_string().map_err(|raw| {
                AtlasError::DatasetShapeError {
                    path: full_path.display().to_string(),
                    message: format!("entry name {:?} is not valid UTF-8", raw),
                }
            })?;
            // Follows symlinks, so a linked day directory counts as a directory.
            let metadata = tokio::fs::metadata(entry.path()).await?;
            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(DataEntry { name, kind });
        }

        Ok(entries)
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }
}
