use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Unit counts of the three layers.
///
/// Fields:
/// - `inputs`  — input units (I)
/// - `hidden`  — hidden units (J)
/// - `outputs` — output units (K)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Topology {
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Self {
        Topology { inputs, hidden, outputs }
    }
}

impl Default for Topology {
    /// One byte in, sixteen hidden units, one byte out.
    fn default() -> Self {
        Topology::new(8, 16, 8)
    }
}

/// Hyperparameters a `BackPropNetwork` is built from.
///
/// `NetworkSpec` is the only thing this crate reads from or writes to disk;
/// trained weights are never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSpec {
    pub topology: Topology,
    /// Step size applied to every weight delta. Must be finite and > 0.
    pub learning_rate: f64,
    /// Half-width of the per-output tolerance band used for accuracy, in [0, 1].
    pub error_margin: f64,
    /// Fixed seed for weight initialisation. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec {
            topology: Topology::default(),
            learning_rate: 0.5,
            error_margin: 0.10,
            seed: None,
        }
    }
}

impl NetworkSpec {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.topology;
        if t.inputs == 0 || t.hidden == 0 || t.outputs == 0 {
            return Err(NetworkError::InvalidTopology(format!(
                "every layer needs at least one unit (I={}, J={}, K={})",
                t.inputs, t.hidden, t.outputs
            )));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.error_margin) {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "error_margin must lie in [0, 1], got {}",
                self.error_margin
            )));
        }
        Ok(())
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads and validates a spec written by `save_json` (or by hand).
    /// Missing fields fall back to their defaults.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
