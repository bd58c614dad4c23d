// Application Layer - Use Cases and Business Logic

pub mod advancer;
pub mod queue;
pub mod simulation;

// Re-exports
pub use advancer::{shutdown_channel, QueueAdvancer, ShutdownSender, ShutdownToken};
pub use queue::QueueService;
pub use simulation::FallbackSimulator;
