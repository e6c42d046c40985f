pub mod settings;
pub mod storage;

pub use settings::{Logger, Server, Settings, Snapshot, Sweeper};
#[cfg(any(test, feature = "mock"))]
pub use storage::MemoryStorage;
pub use storage::{FileStorage, Storage};
