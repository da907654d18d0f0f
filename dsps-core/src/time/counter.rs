//! Uptime counter shared between the timer interrupt and everyone else
//!
//! The 64-bit count is stored as two 32-bit halves plus a sequence
//! number. The timer interrupt is the only writer. Thread-context reads
//! take a short critical section; interrupt-context reads never mask
//! interrupts and instead retry if the writer ran in between.

use core::cell::Cell;
use core::sync::atomic::fence;

use critical_section::Mutex;
use dsps_hal::time::TickSource;
use portable_atomic::{AtomicU32, Ordering};

/// Uptime counter ticking at `HZ`
pub struct UptimeCounter<const HZ: u32> {
    /// Even while stable, odd while an update is in progress
    seq: AtomicU32,
    hi: AtomicU32,
    lo: AtomicU32,
    /// Updates seen, for diagnostics
    updates: Mutex<Cell<u32>>,
}

impl<const HZ: u32> Default for UptimeCounter<HZ> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const HZ: u32> UptimeCounter<HZ> {
    pub const fn new() -> Self {
        Self {
            seq: AtomicU32::new(0),
            hi: AtomicU32::new(0),
            lo: AtomicU32::new(0),
            updates: Mutex::new(Cell::new(0)),
        }
    }

    /// Advance the count by `ticks`
    ///
    /// Call from the timer interrupt only.
    pub fn advance(&self, ticks: u32) {
        critical_section::with(|cs| {
            let seq = self.seq.load(Ordering::Relaxed);
            self.seq.store(seq.wrapping_add(1), Ordering::Relaxed);
            fence(Ordering::Release);

            let (lo, carry) = self.lo.load(Ordering::Relaxed).overflowing_add(ticks);
            if carry {
                let hi = self.hi.load(Ordering::Relaxed).wrapping_add(1);
                self.hi.store(hi, Ordering::Relaxed);
            }
            self.lo.store(lo, Ordering::Relaxed);

            self.seq.store(seq.wrapping_add(2), Ordering::Release);

            let updates = self.updates.borrow(cs);
            updates.set(updates.get().wrapping_add(1));
        });
    }

    /// Set the count, e.g. after restoring it from the sleep timer on wake-up
    pub fn set(&self, ticks: u64) {
        critical_section::with(|_| {
            let seq = self.seq.load(Ordering::Relaxed);
            self.seq.store(seq.wrapping_add(1), Ordering::Relaxed);
            fence(Ordering::Release);
            self.hi.store((ticks >> 32) as u32, Ordering::Relaxed);
            self.lo.store(ticks as u32, Ordering::Relaxed);
            self.seq.store(seq.wrapping_add(2), Ordering::Release);
        });
    }

    /// Number of `advance` calls so far
    pub fn updates(&self) -> u32 {
        critical_section::with(|cs| self.updates.borrow(cs).get())
    }

    fn load(&self) -> u64 {
        let hi = self.hi.load(Ordering::Relaxed) as u64;
        let lo = self.lo.load(Ordering::Relaxed) as u64;
        (hi << 32) | lo
    }
}

impl<const HZ: u32> TickSource for UptimeCounter<HZ> {
    const TICK_HZ: u32 = HZ;

    fn uptime_ticks(&self) -> u64 {
        critical_section::with(|_| self.load())
    }

    fn uptime_ticks_from_isr(&self) -> u64 {
        loop {
            let before = self.seq.load(Ordering::Acquire);
            if before % 2 != 0 {
                continue;
            }
            let value = self.load();
            fence(Ordering::Acquire);
            if self.seq.load(Ordering::Relaxed) == before {
                return value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_carries_into_high_word() {
        let counter = UptimeCounter::<32_768>::new();
        counter.set(u32::MAX as u64 - 1);

        counter.advance(3);
        assert_eq!(counter.uptime_ticks(), u32::MAX as u64 + 2);
        assert_eq!(counter.uptime_ticks_from_isr(), u32::MAX as u64 + 2);
        assert_eq!(counter.updates(), 1);
    }

    #[test]
    fn test_both_accessors_agree() {
        let counter = UptimeCounter::<32_768>::new();
        for _ in 0..1000 {
            counter.advance(4096);
        }
        assert_eq!(counter.uptime_ticks(), 4_096_000);
        assert_eq!(counter.uptime_ticks(), counter.uptime_ticks_from_isr());
        assert_eq!(UptimeCounter::<32_768>::TICK_HZ, 32_768);
    }

    #[test]
    fn test_concurrent_reads_never_tear() {
        use std::sync::Arc;

        let counter = Arc::new(UptimeCounter::<1_000_000>::new());
        counter.set(u32::MAX as u64 - 500);

        let writer = {
            let counter = Arc::clone(&counter);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    counter.advance(1);
                }
            })
        };

        // Reads must be monotonic and never jump by a whole high word
        let mut last = 0;
        for _ in 0..10_000 {
            let now = counter.uptime_ticks_from_isr();
            assert!(now >= last);
            assert!(now <= u32::MAX as u64 + 500);
            last = now;
        }
        writer.join().unwrap();
    }
}
