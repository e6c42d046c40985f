use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::configs::Storage;
use crate::errors::StorageError;
use crate::models::{Broker, Collection};

/// Typed access to the collection snapshots kept by a [`Storage`].
#[derive(Clone)]
pub struct SnapshotRepository {
    storage: Arc<dyn Storage>,
}

impl SnapshotRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn find_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StorageError> {
        match self.storage.load(collection).await? {
            Some(document) => {
                serde_json::from_value(document).map_err(|source| StorageError::Malformed {
                    collection: collection.name(),
                    source,
                })
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn find_broker(&self) -> Result<Option<Broker>, StorageError> {
        self.storage
            .load(Collection::Broker)
            .await?
            .map(serde_json::from_value)
            .transpose()
            .map_err(|source| StorageError::Malformed {
                collection: Collection::Broker.name(),
                source,
            })
    }

    pub async fn save_all<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), StorageError> {
        let document = serde_json::to_value(items).map_err(|source| StorageError::Malformed {
            collection: collection.name(),
            source,
        })?;

        self.storage.save(collection, &document).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::configs::MemoryStorage;
    use crate::models::Room;

    #[tokio::test]
    async fn test_absent_collection_is_empty() {
        let repository = SnapshotRepository::new(Arc::new(MemoryStorage::new()));

        let rooms: Vec<Room> = repository.find_all(Collection::Rooms).await.unwrap();

        assert!(rooms.is_empty());
        assert!(repository.find_broker().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed() {
        let storage = MemoryStorage::new()
            .with_snapshot(Collection::Rooms, json!({ "roomID": "not-a-list" }));
        let repository = SnapshotRepository::new(Arc::new(storage));

        let result = repository.find_all::<Room>(Collection::Rooms).await;

        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_broker_is_read() {
        let storage = MemoryStorage::new()
            .with_snapshot(Collection::Broker, json!({ "ip": "mqtt.local", "port": 1883 }));
        let repository = SnapshotRepository::new(Arc::new(storage));

        let broker = repository.find_broker().await.unwrap().unwrap();

        assert_eq!(broker.ip, "mqtt.local");
        assert_eq!(broker.port, 1883);
    }
}
