use std::f64::consts::E;

/// Logistic activation used by both the hidden and output layers.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Sigmoid derivative expressed in terms of the activation `o = sigmoid(x)`.
///
/// Back-propagation only ever has the activations at hand, so this avoids
/// recomputing the exponential.
pub fn slope(o: f64) -> f64 {
    o * (1.0 - o)
}
