mod local_store;
mod memory_store;

pub use local_store::LocalArtifactStore;
pub use memory_store::InMemoryArtifactStore;
