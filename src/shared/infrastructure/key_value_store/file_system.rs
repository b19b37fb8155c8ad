// File backed implementation of the KeyValueStore port.
//
// Responsibilities
// - Store each key as `<dir>/<key>.json`.
// - Write through a temp file and rename so a reader never sees a half written value.
// - Treat a missing file as a missing key.

use crate::shared::infrastructure::key_value_store::{KeyValueStore, StorageError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "invalid key"),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp_path, value).await.map_err(io_err)?;
        fs::rename(&tmp_path, &path).await.map_err(io_err)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
