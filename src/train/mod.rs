pub mod dataset;
pub mod round_stats;
pub mod session;
pub mod train_config;

pub use dataset::{testing_set, Example, TRAINING_SET};
pub use round_stats::{RoundStats, SampleReport};
pub use session::{AutoTrainOutcome, Session};
pub use train_config::SessionConfig;
