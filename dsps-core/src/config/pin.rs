//! Pin descriptors
//!
//! A pin descriptor names one pad and the two states it alternates
//! between: `on` while its peripheral is active and `off` while asleep.

use dsps_hal::gpio::{PinId, PinState};
use dsps_hal::uart::UartId;

/// Which of the two declared states to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetState {
    /// Peripheral active
    On,
    /// Peripheral asleep
    Off,
}

/// Errors found while validating static descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    /// Pin number not bonded out on its port
    InvalidPin(PinId),
    /// On and off states are the same drive configuration
    IdenticalStates(PinId),
    /// A state routes a function the drive mode cannot carry
    DirectionMismatch(PinId),
    /// A flow-control line would be left floating
    FloatingFlowControl(PinId),
    /// A pin appears twice in one table
    DuplicatePin(PinId),
    /// A pin's on-state routes a function of another peripheral
    WrongFunction(PinId),
    /// Bus flow-control pins disagree with the driver's flow-control mode
    FlowControlMismatch,
    /// Hardware flow control requested on a UART without RTS/CTS
    FlowControlUnsupported(UartId),
    /// Both DMA directions share a channel
    SharedDmaChannel,
    /// DMA channel used for the wrong direction
    DmaDirection,
    /// FIFO trigger or DMA burst level out of range
    InvalidLevel,
    /// Baud rate of zero
    InvalidBaudRate,
    /// Two controllers drive the same UART instance
    DuplicateController(UartId),
}

/// One pad and its active/sleep states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinDescriptor {
    pub id: PinId,
    /// State while the owning peripheral is active
    pub on: PinState,
    /// State while the owning peripheral is asleep
    pub off: PinState,
}

impl PinDescriptor {
    pub const fn new(id: PinId, on: PinState, off: PinState) -> Self {
        Self { id, on, off }
    }

    /// State selected by `target`
    pub const fn state(&self, target: TargetState) -> PinState {
        match target {
            TargetState::On => self.on,
            TargetState::Off => self.off,
        }
    }

    /// Check the descriptor is electrically consistent
    ///
    /// Runs in const context so board tables can be checked at build time:
    ///
    /// ```ignore
    /// const _: () = assert!(UART_RX.validate().is_ok());
    /// ```
    pub const fn validate(&self) -> Result<(), DescriptorError> {
        if !self.id.is_valid() {
            return Err(DescriptorError::InvalidPin(self.id));
        }
        if self.on.same_as(&self.off) {
            return Err(DescriptorError::IdenticalStates(self.id));
        }
        if !self.on.function.accepts(self.on.mode) || !self.off.function.accepts(self.off.mode) {
            return Err(DescriptorError::DirectionMismatch(self.id));
        }
        Ok(())
    }
}

/// Validate every descriptor of a pin table and reject duplicate pins
pub const fn validate_pin_list(list: &[PinDescriptor]) -> Result<(), DescriptorError> {
    let mut i = 0;
    while i < list.len() {
        if let Err(e) = list[i].validate() {
            return Err(e);
        }
        let mut j = i + 1;
        while j < list.len() {
            if list[i].id.same_as(list[j].id) {
                return Err(DescriptorError::DuplicatePin(list[j].id));
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsps_hal::gpio::{Level, PinFunction, PinMode, Port};

    const RX: PinDescriptor = PinDescriptor::new(
        PinId::new(Port::P0, 8),
        PinState::new(PinMode::Input, PinFunction::Uart2Rx, Level::Low),
        PinState::new(PinMode::Input, PinFunction::Gpio, Level::High),
    );

    // Checked at build time
    const _: () = assert!(RX.validate().is_ok());

    #[test]
    fn test_state_selection() {
        assert_eq!(RX.state(TargetState::On).function, PinFunction::Uart2Rx);
        assert_eq!(RX.state(TargetState::Off).function, PinFunction::Gpio);
    }

    #[test]
    fn test_identical_states_rejected() {
        let desc = PinDescriptor::new(RX.id, RX.on, RX.on);
        assert_eq!(desc.validate(), Err(DescriptorError::IdenticalStates(RX.id)));
    }

    #[test]
    fn test_direction_mismatch_rejected() {
        let desc = PinDescriptor::new(
            RX.id,
            PinState::new(PinMode::Output, PinFunction::Uart2Rx, Level::Low),
            RX.off,
        );
        assert_eq!(desc.validate(), Err(DescriptorError::DirectionMismatch(RX.id)));
    }

    #[test]
    fn test_invalid_pin_rejected() {
        let id = PinId::new(Port::P1, 30);
        let desc = PinDescriptor::new(id, RX.on, RX.off);
        assert_eq!(desc.validate(), Err(DescriptorError::InvalidPin(id)));
    }

    #[test]
    fn test_duplicate_pins_rejected() {
        let other = PinDescriptor::new(PinId::new(Port::P0, 9), RX.on, RX.off);
        assert!(validate_pin_list(&[RX, other]).is_ok());
        assert_eq!(
            validate_pin_list(&[RX, other, RX]),
            Err(DescriptorError::DuplicatePin(RX.id))
        );
    }
}
