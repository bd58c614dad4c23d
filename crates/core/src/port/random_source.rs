// Random Source Port (for deterministic testing)

use rand::Rng;

/// Source of randomness for seeding, serving and client simulation
pub trait RandomSource: Send + Sync {
    /// `true` with the given probability (clamped to 0.0..=1.0)
    fn chance(&self, probability: f64) -> bool;

    /// Uniform integer in `low..=high`. Returns `low` when the range is empty.
    fn between(&self, low: i64, high: i64) -> i64;
}

/// Thread-local RNG (production)
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn chance(&self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0))
    }

    fn between(&self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued answers, then falls back to fixed defaults.
    ///
    /// Fallbacks: `chance` returns `default_chance`, `between` returns `low`.
    pub struct ScriptedRandomSource {
        chances: Mutex<VecDeque<bool>>,
        values: Mutex<VecDeque<i64>>,
        default_chance: bool,
    }

    impl ScriptedRandomSource {
        pub fn new(default_chance: bool) -> Self {
            Self {
                chances: Mutex::new(VecDeque::new()),
                values: Mutex::new(VecDeque::new()),
                default_chance,
            }
        }

        pub fn with_chances(self, chances: impl IntoIterator<Item = bool>) -> Self {
            self.chances.lock().unwrap().extend(chances);
            self
        }

        pub fn with_values(self, values: impl IntoIterator<Item = i64>) -> Self {
            self.values.lock().unwrap().extend(values);
            self
        }
    }

    impl RandomSource for ScriptedRandomSource {
        fn chance(&self, _probability: f64) -> bool {
            self.chances
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.default_chance)
        }

        fn between(&self, low: i64, high: i64) -> i64 {
            self.values
                .lock()
                .unwrap()
                .pop_front()
                .map(|v| v.clamp(low, high.max(low)))
                .unwrap_or(low)
        }
    }
}
