mod snapshot;

pub use snapshot::SnapshotRepository;
