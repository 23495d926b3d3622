use crate::domain::model::DatasetFiles;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One immediate child of a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DataEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Read-only access to the dataset corpus. Paths are relative to the data
/// root and use `/` as separator; `""` is the root itself.
pub trait DataSource: Send + Sync {
    fn list_entries(
        &self,
        dir: &str,
    ) -> impl std::future::Future<Output = Result<Vec<DataEntry>>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Where the corpus lives and how its files are named.
pub trait ConfigProvider: Send + Sync {
    fn data_root(&self) -> &str;
    fn dataset_files(&self) -> DatasetFiles;
}
