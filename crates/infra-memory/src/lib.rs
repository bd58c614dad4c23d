// Waitline Infrastructure - In-Memory Adapter
// Implements: QueueStore

mod queue_store;
mod seed;

pub use queue_store::InMemoryQueueStore;
pub use seed::SeedConfig;
