use tracing::{debug, info, warn};

use crate::codec::bits::{decode_byte, encode_byte, BYTE_SIZE};
use crate::error::{NetworkError, Result};
use crate::network::network::BackPropNetwork;
use crate::train::dataset::{testing_set, Example, TRAINING_SET};
use crate::train::round_stats::{RoundStats, SampleReport};
use crate::train::train_config::SessionConfig;

/// How an `auto_train` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoTrainOutcome {
    /// The required number of consecutive perfect rounds was reached.
    Converged { rounds: u64 },
    /// The round cap was hit first.
    RoundCapReached { rounds: u64 },
}

/// Drives a byte-in/byte-out `BackPropNetwork` through the doubling task and
/// keeps the running round count and accuracies between commands.
#[derive(Debug)]
pub struct Session {
    network: BackPropNetwork,
    config: SessionConfig,
    rounds: u64,
    training_accuracy: f64,
    testing_accuracy: f64,
}

impl Session {
    /// Wraps `network`, which must have exactly `BYTE_SIZE` input and output units.
    pub fn new(network: BackPropNetwork, config: SessionConfig) -> Result<Session> {
        let t = network.topology();
        for (what, actual) in [("input layer", t.inputs), ("output layer", t.outputs)] {
            if actual != BYTE_SIZE {
                return Err(NetworkError::DimensionMismatch { what, expected: BYTE_SIZE, actual });
            }
        }

        Ok(Session {
            network,
            config,
            rounds: 0,
            training_accuracy: 0.0,
            testing_accuracy: 0.0,
        })
    }

    pub fn network(&self) -> &BackPropNetwork { &self.network }
    pub fn config(&self) -> &SessionConfig { &self.config }
    pub fn rounds(&self) -> u64 { self.rounds }
    /// Mean accuracy of the last training round, as a percentage.
    pub fn training_accuracy(&self) -> f64 { self.training_accuracy }
    /// Mean accuracy of the last testing pass, as a percentage.
    pub fn testing_accuracy(&self) -> f64 { self.testing_accuracy }

    /// Runs `num_rounds` passes over the training table, updating the weights
    /// after every example. Returns the reports of the final round.
    pub fn run_training(&mut self, num_rounds: u64) -> Result<Vec<SampleReport>> {
        let mut reports = Vec::with_capacity(TRAINING_SET.len());

        for _ in 0..num_rounds {
            reports.clear();
            for example in TRAINING_SET {
                reports.push(self.run_example(example, true)?);
            }

            self.rounds += 1;
            self.training_accuracy = mean_percent(&reports);
            debug!(round = self.rounds, accuracy = self.training_accuracy, "training round");
        }

        Ok(reports)
    }

    /// One pass over every input the training table does not cover.
    pub fn run_tests(&mut self) -> Result<Vec<SampleReport>> {
        let learn = self.config.learn_during_tests;
        let reports = testing_set()
            .into_iter()
            .map(|example| self.run_example(example, learn))
            .collect::<Result<Vec<_>>>()?;

        self.testing_accuracy = mean_percent(&reports);
        debug!(accuracy = self.testing_accuracy, samples = reports.len(), "testing pass");
        Ok(reports)
    }

    /// Accuracy on input 0, which the training table never contains.
    pub fn test_zero(&mut self) -> Result<f64> {
        let learn = self.config.learn_during_tests;
        Ok(self.run_example(Example::doubling(0), learn)?.accuracy)
    }

    /// Repeats a training round, a testing pass and the zero case until
    /// `auto_train_streak` consecutive rounds are perfect or the round cap is
    /// reached. `observer` sees the stats of every iteration.
    pub fn auto_train<F>(&mut self, mut observer: F) -> Result<AutoTrainOutcome>
    where
        F: FnMut(&RoundStats),
    {
        let mut streak = 0;

        while streak < self.config.auto_train_streak && self.rounds < self.config.auto_train_round_cap {
            self.run_training(1)?;
            self.run_tests()?;
            let zero_case_accuracy = self.test_zero()?;

            let stats = RoundStats {
                round: self.rounds,
                training_accuracy: self.training_accuracy,
                testing_accuracy: self.testing_accuracy,
                zero_case_accuracy,
            };
            observer(&stats);

            if stats.is_perfect() {
                streak += 1;
            } else {
                streak = 0;
            }
        }

        if streak >= self.config.auto_train_streak {
            info!(rounds = self.rounds, "auto-train converged");
            Ok(AutoTrainOutcome::Converged { rounds: self.rounds })
        } else {
            warn!(rounds = self.rounds, cap = self.config.auto_train_round_cap, "auto-train hit the round cap");
            Ok(AutoTrainOutcome::RoundCapReached { rounds: self.rounds })
        }
    }

    /// Re-randomises the weights and clears the round count and accuracies.
    pub fn reset(&mut self) {
        self.network.reset();
        self.rounds = 0;
        self.training_accuracy = 0.0;
        self.testing_accuracy = 0.0;
    }

    pub fn summary(&self) -> String {
        format!(
            "Summary: {} Rounds, Accuracy: Training={:.6}%, Testing={:.6}%",
            self.rounds, self.training_accuracy, self.testing_accuracy
        )
    }

    fn run_example(&mut self, example: Example, learn: bool) -> Result<SampleReport> {
        self.network.set_input(&encode_byte(example.input))?;
        self.network.set_desired(&encode_byte(example.desired))?;

        let accuracy = if learn {
            self.network.train_one()
        } else {
            self.network.test_one()
        };

        let activations = self.network.output().to_vec();
        Ok(SampleReport {
            input: example.input,
            desired: example.desired,
            output: decode_byte(&activations),
            activations,
            accuracy,
        })
    }
}

fn mean_percent(reports: &[SampleReport]) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    reports.iter().map(|r| r.accuracy).sum::<f64>() / reports.len() as f64 * 100.0
}
