//! Elapsed time in microseconds
//!
//! Measurements keep their start tick in a caller-owned value, so nested
//! and concurrent measurements do not disturb each other. The counter is
//! read through the accessor matching the caller's execution context.
//!
//! ```ignore
//! let mut ts = Timestamp::new();
//! ts.timestamp(TimestampOp::Start, &UPTIME, ExecutionContext::Thread);
//! // ...
//! let us = ts.timestamp(TimestampOp::Stop, &UPTIME, ExecutionContext::Thread);
//! ```

use dsps_hal::time::{ContextQuery, ExecutionContext, TickSource};

/// Timestamp operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimestampOp {
    Start,
    Stop,
}

/// Ticks from `start` to `stop` on a counter `bits` wide
///
/// Wrapping subtraction masked to the counter width, so a single
/// rollover between the two reads still yields the true distance.
pub const fn elapsed_ticks(start: u64, stop: u64, bits: u32) -> u64 {
    let mask = if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    };
    stop.wrapping_sub(start) & mask
}

/// Convert ticks at `hz` to microseconds, saturating at `u64::MAX`
pub const fn ticks_to_us(ticks: u64, hz: u32) -> u64 {
    if hz == 0 {
        return 0;
    }
    let us = (ticks as u128 * 1_000_000) / hz as u128;
    if us > u64::MAX as u128 {
        u64::MAX
    } else {
        us as u64
    }
}

/// Running measurement started at a known tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopwatch {
    start: u64,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start<T: TickSource>(ticks: &T, ctx: ExecutionContext) -> Self {
        Self {
            start: ticks.ticks_in(ctx),
        }
    }

    /// Tick value the measurement started at
    pub fn start_tick(&self) -> u64 {
        self.start
    }

    pub fn elapsed_ticks<T: TickSource>(&self, ticks: &T, ctx: ExecutionContext) -> u64 {
        elapsed_ticks(self.start, ticks.ticks_in(ctx), T::COUNTER_BITS)
    }

    pub fn elapsed_us<T: TickSource>(&self, ticks: &T, ctx: ExecutionContext) -> u64 {
        ticks_to_us(self.elapsed_ticks(ticks, ctx), T::TICK_HZ)
    }
}

/// START/STOP timestamp pair
///
/// `Start` records the current tick and returns 0. `Stop` returns the
/// microseconds since the last `Start`, or 0 if there was none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    running: Option<Stopwatch>,
}

impl Timestamp {
    pub const fn new() -> Self {
        Self { running: None }
    }

    pub fn timestamp<T: TickSource>(
        &mut self,
        op: TimestampOp,
        ticks: &T,
        ctx: ExecutionContext,
    ) -> u64 {
        match op {
            TimestampOp::Start => {
                self.running = Some(Stopwatch::start(ticks, ctx));
                0
            }
            TimestampOp::Stop => self
                .running
                .map(|sw| sw.elapsed_us(ticks, ctx))
                .unwrap_or(0),
        }
    }

    /// Like [`Timestamp::timestamp`], asking `query` for the context
    pub fn timestamp_queried<T: TickSource, Q: ContextQuery>(
        &mut self,
        op: TimestampOp,
        ticks: &T,
        query: &Q,
    ) -> u64 {
        self.timestamp(op, ticks, query.current())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}
