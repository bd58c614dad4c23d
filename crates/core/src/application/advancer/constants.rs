// Advancer constants (No magic values)
use std::time::Duration;

/// How often the advancer visits every queue (3s)
pub const DEFAULT_ADVANCE_INTERVAL: Duration = Duration::from_secs(3);

/// Chance that a non-empty queue serves its head on one tick
pub const DEFAULT_SERVE_PROBABILITY: f64 = 0.2;
