//! Uptime tick sources and execution context
//!
//! The uptime counter is wider than the bus, so a read can tear if the
//! timer interrupt updates it halfway through. Tick sources therefore
//! expose a thread-context read and an interrupt-context read, and
//! callers pick one through [`ExecutionContext`].

/// Context the caller is executing in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExecutionContext {
    /// Foreground code (main loop, OS task)
    Thread,
    /// Exception or interrupt handler
    Interrupt,
}

/// Monotonic uptime counter
pub trait TickSource {
    /// Counter frequency in Hz
    const TICK_HZ: u32;

    /// Width of the counter in bits; elapsed values wrap at this width
    const COUNTER_BITS: u32 = 64;

    /// Read the counter from thread context
    fn uptime_ticks(&self) -> u64;

    /// Read the counter from interrupt context
    fn uptime_ticks_from_isr(&self) -> u64;

    /// Read the counter with the accessor matching `ctx`
    fn ticks_in(&self, ctx: ExecutionContext) -> u64 {
        match ctx {
            ExecutionContext::Thread => self.uptime_ticks(),
            ExecutionContext::Interrupt => self.uptime_ticks_from_isr(),
        }
    }
}

/// Tells the caller which context it is running in
pub trait ContextQuery {
    fn current(&self) -> ExecutionContext;
}
