//! UART bus descriptors
//!
//! A bus groups the pins that together form one UART: the data lines and,
//! when hardware flow control is fitted, the RTS/CTS pair. All pins share
//! the bus supply rail.

use core::ops::Deref;

use dsps_hal::power::PowerLevel;

use super::pin::{DescriptorError, PinDescriptor};

/// Most pins a single bus can carry (RX, TX, RTS, CTS)
pub const MAX_BUS_PINS: usize = 4;

/// Flow-control lines of a bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowControlPins {
    /// Data lines only
    None,
    /// RTS/CTS handshake lines
    Hardware {
        rts: PinDescriptor,
        cts: PinDescriptor,
    },
}

impl FlowControlPins {
    pub const fn is_hardware(&self) -> bool {
        matches!(self, FlowControlPins::Hardware { .. })
    }
}

/// UART pin wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartBus {
    pub rx: PinDescriptor,
    pub tx: PinDescriptor,
    pub flow: FlowControlPins,
    /// Supply rail shared by every pin of the bus
    pub voltage_level: PowerLevel,
}

impl UartBus {
    /// Pins of the bus in wiring order (RX, TX, RTS, CTS)
    pub const fn pins(&self) -> BusPins {
        match self.flow {
            FlowControlPins::None => BusPins {
                pins: [self.rx, self.tx, self.rx, self.tx],
                len: 2,
            },
            FlowControlPins::Hardware { rts, cts } => BusPins {
                pins: [self.rx, self.tx, rts, cts],
                len: 4,
            },
        }
    }

    /// Check every pin and the flow-control safety rules
    ///
    /// RTS is driven by the device. Leaving it floating while asleep lets
    /// the host keep sending into a UART that is no longer listening, so
    /// neither RTS state may be a bare input.
    pub const fn validate(&self) -> Result<(), DescriptorError> {
        let pins = self.pins();
        if let Err(e) = super::pin::validate_pin_list(pins.as_slice()) {
            return Err(e);
        }
        if let FlowControlPins::Hardware { rts, .. } = self.flow {
            if rts.on.mode.is_floating() || rts.off.mode.is_floating() {
                return Err(DescriptorError::FloatingFlowControl(rts.id));
            }
        }
        Ok(())
    }
}

/// Fixed-capacity list of the pins of one bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusPins {
    pins: [PinDescriptor; MAX_BUS_PINS],
    len: usize,
}

impl BusPins {
    pub const fn as_slice(&self) -> &[PinDescriptor] {
        self.pins.as_slice().split_at(self.len).0
    }
}

impl Deref for BusPins {
    type Target = [PinDescriptor];

    fn deref(&self) -> &[PinDescriptor] {
        self.as_slice()
    }
}
