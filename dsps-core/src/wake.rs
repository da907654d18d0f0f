//! Wake source registration
//!
//! Every pin of a list becomes a power-domain controller trigger, so an
//! edge on that pin powers the selected master back up from full sleep.
//! The trigger level follows the level of the pin's `on` state: a pin
//! whose `on` level is high triggers on high, a pin whose `on` level is
//! low triggers on low.
//!
//! The controller table is a shared singleton. Register from thread
//! context during boot or a power transition, with no other subsystem
//! touching the table at the same time.

use dsps_hal::gpio::{PinId, PinMask};
use dsps_hal::wake::{SlotsExhausted, TriggerPolarity, WakeController, WakeEntry, WakeTarget};
use heapless::Vec;

use crate::config::PinDescriptor;

/// Most wake sources one registration pass can report
pub const MAX_WAKE_SOURCES: usize = 16;

/// Wake registration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeError {
    /// Pin is not bonded out; nothing was registered
    InvalidPin(PinId),
    /// Pin listed twice; nothing was registered
    DuplicatePin(PinId),
    /// List longer than one pass can report; nothing was registered
    TooManyPins,
    /// Controller ran out of trigger slots
    ///
    /// `registered` pins fitted before the table filled up and `failed`
    /// did not. The slots taken by the fitted pins were freed again, so
    /// the table is left as it was before the call.
    TableExhausted { registered: usize, failed: usize },
}

/// Slots taken by one registration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeReport {
    slots: Vec<(PinId, u8), MAX_WAKE_SOURCES>,
}

impl WakeReport {
    /// Number of pins registered
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot taken by `pin`, if it was registered
    pub fn slot_of(&self, pin: PinId) -> Option<u8> {
        self.slots.iter().find(|(p, _)| *p == pin).map(|(_, slot)| *slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PinId, u8)> {
        self.slots.iter()
    }
}

/// Build the controller entry for one pin
pub fn wake_entry(desc: &PinDescriptor, target: WakeTarget) -> WakeEntry {
    let polarity = if desc.on.level.is_high() {
        TriggerPolarity::ActiveHigh
    } else {
        TriggerPolarity::ActiveLow
    };
    WakeEntry {
        pin: desc.id,
        polarity,
        target,
    }
}

/// Register every pin in `list` as a wake source for the application core
pub fn register_wake_sources<W: WakeController>(
    pdc: &mut W,
    list: &[PinDescriptor],
) -> Result<WakeReport, WakeError> {
    register_wake_sources_for(pdc, list, WakeTarget::ApplicationCore)
}

/// Register every pin in `list` as a wake source for `target`
///
/// The list is checked for bad and duplicate pins before anything is
/// submitted. If the controller fills up part way, the slots already
/// taken are released and the call reports how many pins were left out.
pub fn register_wake_sources_for<W: WakeController>(
    pdc: &mut W,
    list: &[PinDescriptor],
    target: WakeTarget,
) -> Result<WakeReport, WakeError> {
    if list.len() > MAX_WAKE_SOURCES {
        return Err(WakeError::TooManyPins);
    }
    let mut seen = PinMask::new();
    for desc in list {
        if !desc.id.is_valid() {
            return Err(WakeError::InvalidPin(desc.id));
        }
        if !seen.insert(desc.id) {
            return Err(WakeError::DuplicatePin(desc.id));
        }
    }

    let mut report = WakeReport::default();
    for desc in list {
        match pdc.add_entry(wake_entry(desc, target)) {
            Ok(slot) => {
                // Cannot overflow, list length was checked above
                let _ = report.slots.push((desc.id, slot));
            }
            Err(SlotsExhausted) => {
                let registered = report.len();
                release_wake_sources(pdc, report);
                return Err(WakeError::TableExhausted {
                    registered,
                    failed: list.len() - registered,
                });
            }
        }
    }
    Ok(report)
}

/// Free every slot taken by an earlier registration pass
pub fn release_wake_sources<W: WakeController>(pdc: &mut W, report: WakeReport) {
    for &(_, slot) in report.iter() {
        pdc.remove_entry(slot);
    }
}
