mod lifecycle;
mod recompute;
mod service;
mod stats;
mod store;
mod throttle;

pub use lifecycle::*;
pub use recompute::*;
pub use service::*;
pub use stats::*;
pub use store::*;
pub use throttle::*;
