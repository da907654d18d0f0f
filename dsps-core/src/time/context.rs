//! Execution-context queries

use dsps_hal::time::{ContextQuery, ExecutionContext};

/// Context known up front by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedContext(pub ExecutionContext);

impl FixedContext {
    pub const THREAD: Self = Self(ExecutionContext::Thread);
    pub const INTERRUPT: Self = Self(ExecutionContext::Interrupt);
}

impl ContextQuery for FixedContext {
    fn current(&self) -> ExecutionContext {
        self.0
    }
}

/// Context read from the Cortex-M active exception number
#[cfg(feature = "cortex-m")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CortexMContext;

#[cfg(feature = "cortex-m")]
impl ContextQuery for CortexMContext {
    fn current(&self) -> ExecutionContext {
        match cortex_m::peripheral::SCB::vect_active() {
            cortex_m::peripheral::scb::VectActive::ThreadMode => ExecutionContext::Thread,
            _ => ExecutionContext::Interrupt,
        }
    }
}
