//! Power-domain controller wake entries
//!
//! The power-domain controller (PDC) keeps a small lookup table of
//! trigger sources. When a listed GPIO changes to its trigger level the
//! PDC powers up the selected master, even if that master was completely
//! switched off.

use crate::gpio::PinId;

/// Level on which a wake trigger fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerPolarity {
    ActiveHigh,
    ActiveLow,
}

/// Master powered up by a wake trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeTarget {
    /// Application processor
    #[default]
    ApplicationCore,
    /// BLE radio controller core
    RadioCore,
    /// Sensor node controller
    SensorNode,
}

/// One PDC table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeEntry {
    pub pin: PinId,
    pub polarity: TriggerPolarity,
    pub target: WakeTarget,
}

/// Every trigger slot is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotsExhausted;

/// Power-domain controller entry table
///
/// The table is a singleton shared with other subsystems. Callers
/// serialize access; implementations do no locking.
pub trait WakeController {
    /// Total number of trigger slots
    fn capacity(&self) -> usize;

    /// Add an entry, returning the slot it occupies
    fn add_entry(&mut self, entry: WakeEntry) -> Result<u8, SlotsExhausted>;

    /// Free a slot returned by `add_entry`
    fn remove_entry(&mut self, slot: u8);
}
