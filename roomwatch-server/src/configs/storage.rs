use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::StorageError;
use crate::models::Collection;

/// Whole-snapshot persistence, one document per collection.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns `None` when the collection was never saved.
    async fn load(&self, collection: Collection) -> Result<Option<Value>, StorageError>;

    /// Replaces the snapshot; concurrent readers see either the old or the new one.
    async fn save(&self, collection: Collection, document: &Value) -> Result<(), StorageError>;
}

pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub async fn new(directory: impl Into<PathBuf>) -> std::io::Result<Self> {
        let directory = directory.into();

        fs::create_dir_all(&directory).await?;

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.directory.join(collection.file_name())
    }

    async fn write_temporary(&self, temp_path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)
            .await?;

        file.write_all(content).await?;
        file.sync_all().await?;

        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self, collection: Collection) -> Result<Option<Value>, StorageError> {
        let content = match fs::read(self.path(collection)).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    collection: collection.name(),
                    source,
                });
            }
        };

        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|source| StorageError::Malformed {
                collection: collection.name(),
                source,
            })
    }

    async fn save(&self, collection: Collection, document: &Value) -> Result<(), StorageError> {
        let content =
            serde_json::to_vec_pretty(document).map_err(|source| StorageError::Malformed {
                collection: collection.name(),
                source,
            })?;

        let temp_path = self.directory.join(format!(
            ".{}.tmp-{}",
            collection.file_name(),
            Uuid::new_v4()
        ));

        let written = match self.write_temporary(&temp_path, &content).await {
            Ok(()) => fs::rename(&temp_path, self.path(collection)).await,
            Err(e) => Err(e),
        };

        if let Err(source) = written {
            let _ = fs::remove_file(&temp_path).await;

            return Err(StorageError::Io {
                collection: collection.name(),
                source,
            });
        }

        Ok(())
    }
}

#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryStorage;

#[cfg(any(test, feature = "mock"))]
mod memory {
    use std::collections::{HashMap, HashSet};
    use std::io;

    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::Mutex;

    use super::Storage;
    use crate::errors::StorageError;
    use crate::models::Collection;

    /// Storage kept in process memory, with switchable write failures.
    #[derive(Default)]
    pub struct MemoryStorage {
        snapshots: Mutex<HashMap<Collection, Value>>,
        failing: Mutex<HashSet<Collection>>,
        writes_left: Mutex<Option<usize>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_snapshot(mut self, collection: Collection, document: Value) -> Self {
            self.snapshots.get_mut().insert(collection, document);
            self
        }

        pub async fn snapshot(&self, collection: Collection) -> Option<Value> {
            self.snapshots.lock().await.get(&collection).cloned()
        }

        pub async fn fail_writes(&self, collection: Collection, failing: bool) {
            let mut guard = self.failing.lock().await;
            if failing {
                guard.insert(collection);
            } else {
                guard.remove(&collection);
            }
        }

        /// Lets `count` more writes through, then rejects every write.
        pub async fn fail_writes_after(&self, count: usize) {
            *self.writes_left.lock().await = Some(count);
        }
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn load(&self, collection: Collection) -> Result<Option<Value>, StorageError> {
            Ok(self.snapshots.lock().await.get(&collection).cloned())
        }

        async fn save(&self, collection: Collection, document: &Value) -> Result<(), StorageError> {
            let exhausted = match self.writes_left.lock().await.as_mut() {
                Some(0) => true,
                Some(left) => {
                    *left -= 1;
                    false
                }
                None => false,
            };

            if exhausted || self.failing.lock().await.contains(&collection) {
                return Err(StorageError::Io {
                    collection: collection.name(),
                    source: io::Error::other("write rejected"),
                });
            }

            self.snapshots
                .lock()
                .await
                .insert(collection, document.clone());

            Ok(())
        }
    }
}
