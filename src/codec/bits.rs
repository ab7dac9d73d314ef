/// Bits per encoded value; also the width of the network's input and output layers.
pub const BYTE_SIZE: usize = 8;

/// Expands `value` into one float per bit, most-significant bit first.
pub fn encode_byte(value: u8) -> Vec<f64> {
    (0..BYTE_SIZE)
        .map(|b| ((value >> (BYTE_SIZE - 1 - b)) & 1) as f64)
        .collect()
}

/// Collapses activations back into a byte: bit `b` is set iff `activations[b] >= 0.5`.
///
/// Only the first `BYTE_SIZE` activations are read.
pub fn decode_byte(activations: &[f64]) -> u8 {
    let mut value = 0u8;
    for (b, &a) in activations.iter().take(BYTE_SIZE).enumerate() {
        if a >= 0.5 {
            value |= 1 << (BYTE_SIZE - 1 - b);
        }
    }
    value
}
