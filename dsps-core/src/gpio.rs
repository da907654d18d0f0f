//! Bulk pin configuration
//!
//! Applies the on or off state of every pin in a list and selects the
//! supply rail for the whole set. Application is all-or-nothing: the
//! previous state of every listed pin is captured first and restored if
//! any pad refuses its new state.
//!
//! Not interrupt safe. Call at boot or during a power-domain transition.

use dsps_hal::gpio::{PadControl, PadError, PinId, PinMask, PinState};
use dsps_hal::power::PowerLevel;
use heapless::Vec;

use crate::config::{PinDescriptor, TargetState, UartBus};

/// Most distinct pins one call can configure
pub const MAX_PIN_SET: usize = 32;

/// Bulk configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// List holds more distinct pins than can be rolled back
    TooManyPins,
    /// Pin is not bonded out; nothing was written
    InvalidPin(PinId),
    /// A pad refused its state; every pin was restored
    Pad { pin: PinId, error: PadError },
    /// The supply rail could not be selected; every pin was restored
    Power(PadError),
    /// A pad refused its state and could not be restored either
    RollbackFailed { pin: PinId, error: PadError },
}

type Snapshot = Vec<(PinId, PinState), MAX_PIN_SET>;

/// Apply the `target` state of every pin in `list` and power them from `power`
///
/// Pins are written in list order, so a later entry for the same pin
/// overrides an earlier one. Each pad is latched right after it is written.
/// The rail is selected once, after all pins.
pub fn apply_pin_set<P: PadControl>(
    pads: &mut P,
    list: &[PinDescriptor],
    power: PowerLevel,
    target: TargetState,
) -> Result<(), ConfigError> {
    let mut mask = PinMask::new();
    for desc in list {
        if !desc.id.is_valid() {
            return Err(ConfigError::InvalidPin(desc.id));
        }
        mask.insert(desc.id);
    }
    if mask.len() > MAX_PIN_SET {
        return Err(ConfigError::TooManyPins);
    }

    let snapshot = take_snapshot(pads, list)?;

    for (written, desc) in list.iter().enumerate() {
        if let Err(error) = pads.configure(desc.id, desc.state(target)) {
            restore(pads, &snapshot, &list[..written])?;
            return Err(ConfigError::Pad { pin: desc.id, error });
        }
        pads.latch(desc.id);
    }

    if let Err(error) = pads.set_power(&mask, power) {
        restore(pads, &snapshot, list)?;
        return Err(ConfigError::Power(error));
    }

    Ok(())
}

/// Apply the `target` state of every pin of a UART bus on the bus rail
pub fn apply_bus<P: PadControl>(
    pads: &mut P,
    bus: &UartBus,
    target: TargetState,
) -> Result<(), ConfigError> {
    apply_pin_set(pads, &bus.pins(), bus.voltage_level, target)
}

fn take_snapshot<P: PadControl>(
    pads: &P,
    list: &[PinDescriptor],
) -> Result<Snapshot, ConfigError> {
    let mut snapshot = Snapshot::new();
    for desc in list {
        if snapshot.iter().any(|(pin, _)| *pin == desc.id) {
            continue;
        }
        let state = pads
            .read_state(desc.id)
            .map_err(|error| ConfigError::Pad { pin: desc.id, error })?;
        snapshot
            .push((desc.id, state))
            .map_err(|_| ConfigError::TooManyPins)?;
    }
    Ok(snapshot)
}

/// Put back the captured state of every pin in `written`
fn restore<P: PadControl>(
    pads: &mut P,
    snapshot: &Snapshot,
    written: &[PinDescriptor],
) -> Result<(), ConfigError> {
    let mut failure = None;
    // Keep restoring after a failure so as many pins as possible recover
    for &(pin, state) in snapshot.iter() {
        if !written.iter().any(|desc| desc.id == pin) {
            continue;
        }
        match pads.configure(pin, state) {
            Ok(()) => pads.latch(pin),
            Err(error) => {
                if failure.is_none() {
                    failure = Some(ConfigError::RollbackFailed { pin, error });
                }
            }
        }
    }
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
