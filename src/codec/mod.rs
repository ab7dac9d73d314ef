pub mod bits;

pub use bits::{decode_byte, encode_byte, BYTE_SIZE};
