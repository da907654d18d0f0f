//! Elapsed-time measurement
//!
//! - [`timestamp`] - caller-owned START/STOP measurement in microseconds
//! - [`counter`] - uptime counter advanced by the timer interrupt
//! - [`context`] - execution-context queries

pub mod context;
pub mod counter;
pub mod timestamp;

pub use context::FixedContext;
#[cfg(feature = "cortex-m")]
pub use context::CortexMContext;
pub use counter::UptimeCounter;
pub use timestamp::{elapsed_ticks, ticks_to_us, Stopwatch, Timestamp, TimestampOp};
