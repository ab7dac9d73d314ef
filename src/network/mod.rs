pub mod dump;
pub mod network;
pub mod spec;

pub use dump::dump;
pub use network::BackPropNetwork;
pub use spec::{NetworkSpec, Topology};
