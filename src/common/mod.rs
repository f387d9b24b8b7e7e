//! Shared plumbing: error taxonomy, the console log bridge and a stopwatch.

pub mod error;
pub mod logging;
pub mod perf_timer;

pub use error::{PhysicsError, PhysicsResult};
pub use logging::init_logging;
pub use perf_timer::PerfTimer;
