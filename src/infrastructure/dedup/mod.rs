mod file_dedup_store;
mod memory_dedup_store;

pub use file_dedup_store::FileDedupStore;
pub use memory_dedup_store::InMemoryDedupStore;
