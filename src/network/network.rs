use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::activation::activation::{sigmoid, slope};
use crate::error::{NetworkError, Result};
use crate::math::matrix::{try_zeroed_vec, Matrix};
use crate::network::spec::{NetworkSpec, Topology};

/// A three-layer (input, hidden, output) feed-forward network trained one
/// example at a time by back-propagation.
///
/// The caller loads `input` and `desired` with `set_input`/`set_desired`,
/// then calls `query`, `train_one` or `test_one`. Every buffer other than the
/// two weight matrices is scratch that the next call overwrites.
#[derive(Debug)]
pub struct BackPropNetwork {
    topology: Topology,
    learning_rate: f64,
    error_margin: f64,
    seed: Option<u64>,
    rng: StdRng,

    /// I×J input-to-hidden weights.
    w_ij: Matrix,
    /// J×K hidden-to-output weights.
    w_jk: Matrix,
    delta_w_ij: Matrix,
    delta_w_jk: Matrix,

    // Allocated for shape compatibility; neither layer adds a bias.
    bias_hidden: Vec<f64>,
    bias_output: Vec<f64>,

    beta_hidden: Vec<f64>,
    beta_output: Vec<f64>,

    input: Vec<f64>,
    hidden: Vec<f64>,
    output: Vec<f64>,
    desired: Vec<f64>,
}

impl BackPropNetwork {
    /// Validates `spec`, allocates every buffer and randomises the weights.
    ///
    /// Fails with `NetworkError::Allocation` if any buffer cannot be reserved;
    /// callers are expected to treat that as fatal.
    pub fn new(spec: &NetworkSpec) -> Result<BackPropNetwork> {
        spec.validate()?;
        let Topology { inputs, hidden, outputs } = spec.topology;

        let vector = |what: &'static str, len: usize| {
            try_zeroed_vec(len).map_err(|_| NetworkError::Allocation { what, rows: 1, cols: len })
        };

        let mut network = BackPropNetwork {
            topology: spec.topology,
            learning_rate: spec.learning_rate,
            error_margin: spec.error_margin,
            seed: spec.seed,
            rng: StdRng::seed_from_u64(spec.seed.unwrap_or_default()),
            w_ij: Matrix::try_zeros("Wij", inputs, hidden)?,
            w_jk: Matrix::try_zeros("Wjk", hidden, outputs)?,
            delta_w_ij: Matrix::try_zeros("deltaWij", inputs, hidden)?,
            delta_w_jk: Matrix::try_zeros("deltaWjk", hidden, outputs)?,
            bias_hidden: vector("bias_hidden", hidden)?,
            bias_output: vector("bias_output", outputs)?,
            beta_hidden: vector("beta_hidden", hidden)?,
            beta_output: vector("beta_output", outputs)?,
            input: vector("input", inputs)?,
            hidden: vector("hidden", hidden)?,
            output: vector("output", outputs)?,
            desired: vector("desired", outputs)?,
        };

        info!(
            inputs,
            hidden,
            outputs,
            learning_rate = spec.learning_rate,
            error_margin = spec.error_margin,
            "network allocated"
        );

        network.reset();
        Ok(network)
    }

    /// Reseeds the RNG and draws every weight uniformly from {0.20, 0.21, ..., 0.69}.
    ///
    /// With a fixed seed every reset yields the same weights.
    pub fn reset(&mut self) {
        self.rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let rng = &mut self.rng;
        self.w_ij.fill_with(|| initial_weight(rng));
        self.w_jk.fill_with(|| initial_weight(rng));

        info!(seeded = self.seed.is_some(), "weights reset");
    }

    pub fn set_input(&mut self, input: &[f64]) -> Result<()> {
        copy_checked("input", input, &mut self.input)
    }

    pub fn set_desired(&mut self, desired: &[f64]) -> Result<()> {
        copy_checked("desired", desired, &mut self.desired)
    }

    /// Forward pass over the current input. Overwrites the hidden and output
    /// activations and returns the latter.
    pub fn query(&mut self) -> &[f64] {
        for j in 0..self.topology.hidden {
            let eta: f64 = self.input.iter()
                .zip(self.w_ij.data.iter())
                .map(|(o, row)| o * row[j])
                .sum();
            self.hidden[j] = sigmoid(eta);
        }

        for k in 0..self.topology.outputs {
            let eta: f64 = self.hidden.iter()
                .zip(self.w_jk.data.iter())
                .map(|(o, row)| o * row[k])
                .sum();
            self.output[k] = sigmoid(eta);
        }

        &self.output
    }

    /// Fraction of output units whose activation lies within `error_margin`
    /// of the desired value, with the band clamped to [0, 1].
    ///
    /// This is a tolerance measure, not a decoded-bit match: an output of 0.6
    /// against a desired 1.0 decodes to the right bit but still scores wrong.
    pub fn compute_accuracy(&self) -> f64 {
        let correct = self.output.iter()
            .zip(self.desired.iter())
            .filter(|(&o, &d)| {
                let lo = (d - self.error_margin).max(0.0);
                let hi = (d + self.error_margin).min(1.0);
                o >= lo && o <= hi
            })
            .count();

        correct as f64 / self.topology.outputs as f64
    }

    /// One online back-propagation step on the current input/desired pair.
    ///
    /// Returns the accuracy of the forward output computed *before* the
    /// weights were updated.
    pub fn train_one(&mut self) -> f64 {
        self.query();

        for k in 0..self.topology.outputs {
            self.beta_output[k] = self.desired[k] - self.output[k];
        }

        for j in 0..self.topology.hidden {
            self.beta_hidden[j] = self.w_jk.row(j).iter()
                .zip(self.output.iter())
                .zip(self.beta_output.iter())
                .map(|((w, &o), b)| w * slope(o) * b)
                .sum();
        }

        let r = self.learning_rate;
        for (i, &oi) in self.input.iter().enumerate() {
            for j in 0..self.topology.hidden {
                let d = r * oi * slope(self.hidden[j]) * self.beta_hidden[j];
                self.delta_w_ij.set(i, j, d);
            }
        }
        for (j, &oj) in self.hidden.iter().enumerate() {
            for k in 0..self.topology.outputs {
                let d = r * oj * slope(self.output[k]) * self.beta_output[k];
                self.delta_w_jk.set(j, k, d);
            }
        }

        self.w_ij.add_assign(&self.delta_w_ij);
        self.w_jk.add_assign(&self.delta_w_jk);

        let accuracy = self.compute_accuracy();
        debug!(accuracy, "trained one example");
        accuracy
    }

    /// Forward pass and accuracy without touching the weights.
    pub fn test_one(&mut self) -> f64 {
        self.query();
        self.compute_accuracy()
    }

    pub fn topology(&self) -> Topology { self.topology }
    pub fn learning_rate(&self) -> f64 { self.learning_rate }
    pub fn error_margin(&self) -> f64 { self.error_margin }

    pub fn weights_ij(&self) -> &Matrix { &self.w_ij }
    pub fn weights_jk(&self) -> &Matrix { &self.w_jk }
    pub fn delta_weights_ij(&self) -> &Matrix { &self.delta_w_ij }
    pub fn delta_weights_jk(&self) -> &Matrix { &self.delta_w_jk }

    pub fn bias_hidden(&self) -> &[f64] { &self.bias_hidden }
    pub fn bias_output(&self) -> &[f64] { &self.bias_output }
    pub fn beta_hidden(&self) -> &[f64] { &self.beta_hidden }
    pub fn beta_output(&self) -> &[f64] { &self.beta_output }

    pub fn input(&self) -> &[f64] { &self.input }
    pub fn hidden(&self) -> &[f64] { &self.hidden }
    pub fn output(&self) -> &[f64] { &self.output }
    pub fn desired(&self) -> &[f64] { &self.desired }

    #[cfg(test)]
    pub(crate) fn weights_ij_mut(&mut self) -> &mut Matrix { &mut self.w_ij }
    #[cfg(test)]
    pub(crate) fn weights_jk_mut(&mut self) -> &mut Matrix { &mut self.w_jk }
    #[cfg(test)]
    pub(crate) fn output_mut(&mut self) -> &mut [f64] { &mut self.output }
}

fn initial_weight(rng: &mut StdRng) -> f64 {
    rng.gen_range(20u32..70) as f64 / 100.0
}

fn copy_checked(what: &'static str, src: &[f64], dst: &mut [f64]) -> Result<()> {
    if src.len() != dst.len() {
        return Err(NetworkError::DimensionMismatch {
            what,
            expected: dst.len(),
            actual: src.len(),
        });
    }
    dst.copy_from_slice(src);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn network(seed: u64) -> BackPropNetwork {
        BackPropNetwork::new(&NetworkSpec::default().with_seed(seed)).unwrap()
    }

    fn assert_weights_in_init_range(net: &BackPropNetwork) {
        for w in net.weights_ij().iter().chain(net.weights_jk().iter()) {
            assert!((0.20..=0.69).contains(&w), "weight {w} outside init range");
            let cents = w * 100.0;
            assert_relative_eq!(cents, cents.round(), epsilon = 1e-9);
        }
    }

    #[test]
    fn new_allocates_every_buffer_to_topology() {
        let spec = NetworkSpec { topology: Topology::new(3, 5, 2), ..Default::default() };
        let net = BackPropNetwork::new(&spec).unwrap();
        assert_eq!((net.weights_ij().rows, net.weights_ij().cols), (3, 5));
        assert_eq!((net.weights_jk().rows, net.weights_jk().cols), (5, 2));
        assert_eq!((net.delta_weights_ij().rows, net.delta_weights_ij().cols), (3, 5));
        assert_eq!((net.delta_weights_jk().rows, net.delta_weights_jk().cols), (5, 2));
        assert_eq!(net.bias_hidden().len(), 5);
        assert_eq!(net.bias_output().len(), 2);
        assert_eq!(net.beta_hidden().len(), 5);
        assert_eq!(net.beta_output().len(), 2);
        assert_eq!(net.input().len(), 3);
        assert_eq!(net.hidden().len(), 5);
        assert_eq!(net.output().len(), 2);
        assert_eq!(net.desired().len(), 2);
    }

    #[test]
    fn new_rejects_invalid_spec() {
        let spec = NetworkSpec { topology: Topology::new(0, 16, 8), ..Default::default() };
        assert!(matches!(BackPropNetwork::new(&spec), Err(NetworkError::InvalidTopology(_))));
    }

    #[test]
    fn reset_keeps_weights_in_range_and_shape() {
        let mut net = network(1);
        assert_weights_in_init_range(&net);
        net.set_input(&[1.0; 8]).unwrap();
        net.set_desired(&[0.0; 8]).unwrap();
        for _ in 0..50 {
            net.train_one();
        }
        net.reset();
        assert_weights_in_init_range(&net);
        assert_eq!((net.weights_ij().rows, net.weights_ij().cols), (8, 16));
        assert_eq!((net.weights_jk().rows, net.weights_jk().cols), (16, 8));
    }

    #[test]
    fn seeded_reset_is_reproducible() {
        let mut a = network(99);
        let b = network(99);
        assert_eq!(a.weights_ij(), b.weights_ij());
        assert_eq!(a.weights_jk(), b.weights_jk());

        let before = a.weights_jk().clone();
        a.set_input(&[1.0; 8]).unwrap();
        a.train_one();
        assert_ne!(a.weights_jk(), &before);
        a.reset();
        assert_eq!(a.weights_jk(), &before);
    }

    #[test]
    fn set_input_checks_length() {
        let mut net = network(0);
        let err = net.set_input(&[1.0; 7]).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { what: "input", expected: 8, actual: 7 }));
        assert!(net.set_desired(&[0.0; 9]).is_err());
    }

    #[test]
    fn query_is_deterministic_and_bounded() {
        let mut net = network(5);
        net.set_input(&[1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
        let first = net.query().to_vec();
        let second = net.query().to_vec();
        assert_eq!(first, second);
        assert!(first.iter().all(|&o| o > 0.0 && o < 1.0));
    }

    #[test]
    fn query_matches_hand_computation() {
        let spec = NetworkSpec { topology: Topology::new(2, 1, 1), ..Default::default() };
        let mut net = BackPropNetwork::new(&spec).unwrap();
        net.weights_ij_mut().data = vec![vec![0.5], vec![-0.25]];
        net.weights_jk_mut().data = vec![vec![2.0]];
        net.set_input(&[1.0, 1.0]).unwrap();

        let hidden = sigmoid(0.25);
        let expected = sigmoid(2.0 * hidden);
        assert_relative_eq!(net.query()[0], expected);
        assert_relative_eq!(net.hidden()[0], hidden);
    }

    #[test]
    fn zero_input_gives_half_hidden_activations() {
        let mut net = network(3);
        net.set_input(&[0.0; 8]).unwrap();
        net.query();
        for &h in net.hidden() {
            assert_relative_eq!(h, 0.5);
        }
    }

    #[test]
    fn accuracy_band_clamps_at_one() {
        let mut net = network(0);
        net.set_desired(&[1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        net.output_mut().copy_from_slice(&[0.89, 0.91, 0.05, 0.11, 1.0, 0.92, 0.95, 0.99]);
        // 0.89 and 0.11 fall outside; everything else is in band.
        assert_relative_eq!(net.compute_accuracy(), 6.0 / 8.0);
    }

    #[test]
    fn accuracy_is_one_only_when_every_unit_is_in_band() {
        let mut net = network(0);
        net.set_desired(&[0.0; 8]).unwrap();
        net.output_mut().copy_from_slice(&[0.05; 8]);
        assert_relative_eq!(net.compute_accuracy(), 1.0);
        net.output_mut()[3] = 0.2;
        assert!(net.compute_accuracy() < 1.0);
    }

    #[test]
    fn train_one_follows_the_delta_rule() {
        let mut net = network(11);
        let input = [0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
        let desired = [1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
        net.set_input(&input).unwrap();
        net.set_desired(&desired).unwrap();

        let w_ij = net.weights_ij().clone();
        let w_jk = net.weights_jk().clone();
        let out = net.query().to_vec();
        let hid = net.hidden().to_vec();

        net.train_one();

        let r = net.learning_rate();
        for k in 0..8 {
            assert_relative_eq!(net.beta_output()[k], desired[k] - out[k]);
        }
        for j in 0..16 {
            let beta: f64 = (0..8)
                .map(|k| w_jk.get(j, k) * slope(out[k]) * (desired[k] - out[k]))
                .sum();
            assert_relative_eq!(net.beta_hidden()[j], beta, epsilon = 1e-12);
            for k in 0..8 {
                let d = r * hid[j] * slope(out[k]) * (desired[k] - out[k]);
                assert_relative_eq!(net.delta_weights_jk().get(j, k), d, epsilon = 1e-12);
                assert_relative_eq!(net.weights_jk().get(j, k), w_jk.get(j, k) + d, epsilon = 1e-12);
            }
            for i in 0..8 {
                let d = r * input[i] * slope(hid[j]) * beta;
                assert_relative_eq!(net.delta_weights_ij().get(i, j), d, epsilon = 1e-12);
                assert_relative_eq!(net.weights_ij().get(i, j), w_ij.get(i, j) + d, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn train_one_reports_pre_update_accuracy() {
        let mut net = network(21);
        net.set_input(&[1.0; 8]).unwrap();
        net.set_desired(&[0.0; 8]).unwrap();
        let pre = net.test_one();
        let reported = net.train_one();
        assert_relative_eq!(reported, pre);
    }

    #[test]
    fn train_one_moves_output_toward_desired() {
        let mut net = network(8);
        net.set_input(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
        net.set_desired(&[1.0; 8]).unwrap();

        let before: Vec<f64> = net.query().to_vec();
        let eta_before: Vec<f64> = (0..8)
            .map(|k| (0..16).map(|j| net.hidden()[j] * net.weights_jk().get(j, k)).sum::<f64>())
            .collect();
        net.train_one();

        // Every output starts below 1.0, so every delta feeding it is positive.
        for k in 0..8 {
            assert!(before[k] < 1.0);
            let aggregate: f64 = (0..16)
                .map(|j| net.beta_output()[k] * net.delta_weights_jk().get(j, k))
                .sum();
            assert!(aggregate > 0.0);
        }
        let hidden = net.hidden().to_vec();
        for k in 0..8 {
            let eta_after: f64 = (0..16).map(|j| hidden[j] * net.weights_jk().get(j, k)).sum();
            assert!(eta_after > eta_before[k]);
        }
    }

    #[test]
    fn test_one_leaves_weights_alone() {
        let mut net = network(4);
        net.set_input(&[1.0; 8]).unwrap();
        net.set_desired(&[0.0; 8]).unwrap();
        let w_ij = net.weights_ij().clone();
        let w_jk = net.weights_jk().clone();
        let accuracy = net.test_one();
        assert!((0.0..=1.0).contains(&accuracy));
        assert_eq!(net.weights_ij(), &w_ij);
        assert_eq!(net.weights_jk(), &w_jk);
    }
}
