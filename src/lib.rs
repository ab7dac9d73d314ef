pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod codec;
pub mod train;
pub mod command;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use network::network::BackPropNetwork;
pub use network::spec::{NetworkSpec, Topology};
pub use codec::bits::{decode_byte, encode_byte};
pub use train::session::{AutoTrainOutcome, Session};
pub use train::train_config::SessionConfig;
pub use command::{Command, CommandError};
