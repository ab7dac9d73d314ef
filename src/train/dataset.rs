/// One labelled (value, doubled value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub input: u8,
    pub desired: u8,
}

impl Example {
    pub const fn new(input: u8, desired: u8) -> Self {
        Example { input, desired }
    }

    /// The doubling example for `input`, truncated to eight bits.
    pub fn doubling(input: u8) -> Self {
        Example::new(input, input.wrapping_mul(2))
    }
}

/// Inputs are drawn from the lower half of the byte range so that doubling
/// never overflows.
pub const INPUT_SPACE: u8 = 0x80;

pub const TRAINING_SET: [Example; 25] = [
    Example::new(2, 4),
    Example::new(6, 12),
    Example::new(40, 80),
    Example::new(5, 10),
    Example::new(3, 6),
    Example::new(15, 30),
    Example::new(100, 200),
    Example::new(50, 100),
    Example::new(1, 2),
    Example::new(75, 150),
    Example::new(4, 8),
    Example::new(8, 16),
    Example::new(16, 32),
    Example::new(32, 64),
    Example::new(64, 128),
    Example::new(70, 140),
    Example::new(60, 120),
    Example::new(80, 160),
    Example::new(23, 46),
    Example::new(113, 226),
    Example::new(94, 188),
    Example::new(110, 220),
    Example::new(43, 86),
    Example::new(45, 90),
    Example::new(9, 18),
];

pub fn is_training_input(value: u8) -> bool {
    TRAINING_SET.iter().any(|e| e.input == value)
}

/// Every value in `[0, INPUT_SPACE)` that the training table does not cover,
/// in ascending order.
pub fn testing_set() -> Vec<Example> {
    (0..INPUT_SPACE)
        .filter(|&v| !is_training_input(v))
        .map(Example::doubling)
        .collect()
}
