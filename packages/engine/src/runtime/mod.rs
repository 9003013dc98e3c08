//! Seams between the engine and the host: time, scheduling and logging.

pub mod clock;
pub mod logging;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{ExternalScheduler, ManualScheduler, PendingTick, Scheduler};
