use serde::{Serialize, Deserialize};

/// Outcome of one example pushed through the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    pub input: u8,
    pub desired: u8,
    /// Output activations decoded to a byte at the 0.5 threshold.
    pub output: u8,
    /// Raw output activations, paired bit-for-bit with `desired`.
    pub activations: Vec<f64>,
    /// Tolerance-band accuracy in [0, 1] as returned by the network.
    pub accuracy: f64,
}

impl SampleReport {
    /// Absolute distance between the desired and decoded bytes.
    pub fn error(&self) -> u8 {
        self.desired.abs_diff(self.output)
    }

    pub fn is_correct(&self) -> bool {
        self.accuracy >= 1.0
    }
}

/// Per-round statistics emitted by `Session::auto_train`.
///
/// Accuracies over a whole set are percentages; the zero case is a single
/// example and stays a fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    /// Training rounds completed since the last reset.
    pub round: u64,
    pub training_accuracy: f64,
    pub testing_accuracy: f64,
    pub zero_case_accuracy: f64,
}

impl RoundStats {
    pub fn is_perfect(&self) -> bool {
        self.training_accuracy >= 100.0
            && self.testing_accuracy >= 100.0
            && self.zero_case_accuracy >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_absolute_difference() {
        let report = SampleReport { input: 3, desired: 6, output: 14, activations: vec![], accuracy: 0.5 };
        assert_eq!(report.error(), 8);
        assert!(!report.is_correct());
    }

    #[test]
    fn perfect_requires_all_three() {
        let mut stats = RoundStats { round: 1, training_accuracy: 100.0, testing_accuracy: 100.0, zero_case_accuracy: 1.0 };
        assert!(stats.is_perfect());
        stats.testing_accuracy = 99.9;
        assert!(!stats.is_perfect());
    }

    #[test]
    fn round_stats_serialize_as_json() {
        let stats = RoundStats { round: 7, training_accuracy: 96.0, testing_accuracy: 88.5, zero_case_accuracy: 1.0 };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"round\":7"));
        let back: RoundStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
