pub mod json_file_store;
pub mod memory;
pub mod snapshot_store;

pub use json_file_store::JsonFileStore;
pub use memory::MemoryStore;
pub use snapshot_store::SnapshotStore;
