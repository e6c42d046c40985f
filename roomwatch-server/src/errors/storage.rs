use std::io;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access snapshot '{collection}': {source}")]
    Io {
        collection: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Malformed snapshot '{collection}': {source}")]
    Malformed {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
