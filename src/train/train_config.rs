use serde::{Serialize, Deserialize};

/// Knobs for a `Session`.
///
/// # Fields
/// - `learn_during_tests`   — when `true` every testing-pass and zero-case
///                            sample also updates the weights, so auto-train
///                            eventually fits the whole input space. When
///                            `false` those passes are read-only evaluation.
/// - `auto_train_streak`    — consecutive perfect rounds that end auto-train
/// - `auto_train_round_cap` — auto-train stops once this many rounds have run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub learn_during_tests: bool,
    pub auto_train_streak: u32,
    pub auto_train_round_cap: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            learn_during_tests: true,
            auto_train_streak: 3,
            auto_train_round_cap: 10_000_000,
        }
    }
}
