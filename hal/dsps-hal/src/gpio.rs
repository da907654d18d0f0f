//! Pad (GPIO) abstractions
//!
//! Pins are identified by port and pin number. Each pad carries a drive
//! mode, a multiplexed function and an output level; together these form a
//! [`PinState`]. Backends implement [`PadControl`] to push states into the
//! pad registers.

use crate::power::PowerLevel;

/// Number of GPIO ports on the SoC
pub const PORT_COUNT: usize = 2;

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Port {
    P0 = 0,
    P1 = 1,
}

impl Port {
    /// Number of bonded pins on this port
    pub const fn pin_count(self) -> u8 {
        match self {
            Port::P0 => 32,
            Port::P1 => 23,
        }
    }

    /// Port as a table index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Create a port from its number
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Port::P0),
            1 => Some(Port::P1),
            _ => None,
        }
    }
}

/// Physical pin identity (port + pin number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: Port,
    pub pin: u8,
}

impl PinId {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Check the pin number is bonded out on its port
    pub const fn is_valid(self) -> bool {
        self.pin < self.port.pin_count()
    }

    /// Compare two pin ids in const context
    pub const fn same_as(self, other: PinId) -> bool {
        self.port as u8 == other.port as u8 && self.pin == other.pin
    }
}

/// Pad drive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input, no pull resistor
    Input,
    /// Input with pull-up
    InputPullUp,
    /// Input with pull-down
    InputPullDown,
    /// Push-pull output
    Output,
    /// Open-drain output
    OutputOpenDrain,
}

impl PinMode {
    /// Pad drives the line
    pub const fn is_output(self) -> bool {
        matches!(self, PinMode::Output | PinMode::OutputOpenDrain)
    }

    /// Pad neither drives nor pulls the line
    pub const fn is_floating(self) -> bool {
        matches!(self, PinMode::Input)
    }
}

/// Direction a pad function requires from the pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FunctionDirection {
    Input,
    Output,
    /// Function works with any drive mode (GPIO, open-drain buses)
    Any,
}

/// Peripheral function multiplexed onto a pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinFunction {
    /// Plain GPIO, controlled by the pad data register
    Gpio,
    UartRx,
    UartTx,
    Uart2Rx,
    Uart2Tx,
    Uart2Ctsn,
    Uart2Rtsn,
    Uart3Rx,
    Uart3Tx,
    Uart3Ctsn,
    Uart3Rtsn,
    SpiDi,
    SpiDo,
    SpiClk,
    SpiEn,
    I2cScl,
    I2cSda,
}

impl PinFunction {
    pub const fn direction(self) -> FunctionDirection {
        match self {
            PinFunction::UartRx
            | PinFunction::Uart2Rx
            | PinFunction::Uart2Ctsn
            | PinFunction::Uart3Rx
            | PinFunction::Uart3Ctsn
            | PinFunction::SpiDi => FunctionDirection::Input,
            PinFunction::UartTx
            | PinFunction::Uart2Tx
            | PinFunction::Uart2Rtsn
            | PinFunction::Uart3Tx
            | PinFunction::Uart3Rtsn
            | PinFunction::SpiDo
            | PinFunction::SpiClk
            | PinFunction::SpiEn => FunctionDirection::Output,
            PinFunction::Gpio | PinFunction::I2cScl | PinFunction::I2cSda => {
                FunctionDirection::Any
            }
        }
    }

    /// Check the drive mode can carry this function
    pub const fn accepts(self, mode: PinMode) -> bool {
        match self.direction() {
            FunctionDirection::Input => !mode.is_output(),
            FunctionDirection::Output => mode.is_output(),
            FunctionDirection::Any => true,
        }
    }

    /// Compare two functions in const context
    pub const fn same_as(self, other: PinFunction) -> bool {
        self as u8 == other as u8
    }
}

/// Logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Complete electrical state of one pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinState {
    pub mode: PinMode,
    pub function: PinFunction,
    pub level: Level,
}

impl PinState {
    pub const fn new(mode: PinMode, function: PinFunction, level: Level) -> Self {
        Self {
            mode,
            function,
            level,
        }
    }

    /// Compare two states in const context
    pub const fn same_as(&self, other: &PinState) -> bool {
        self.mode as u8 == other.mode as u8
            && self.function.same_as(other.function)
            && self.level as u8 == other.level as u8
    }
}

/// Set of pins, one bit per pin per port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMask {
    ports: [u32; PORT_COUNT],
}

impl PinMask {
    pub const fn new() -> Self {
        Self {
            ports: [0; PORT_COUNT],
        }
    }

    /// Add a pin, returning false if it was already present
    pub fn insert(&mut self, pin: PinId) -> bool {
        let bit = 1u32 << pin.pin;
        let word = &mut self.ports[pin.port.index()];
        let fresh = *word & bit == 0;
        *word |= bit;
        fresh
    }

    pub fn contains(&self, pin: PinId) -> bool {
        self.ports[pin.port.index()] & (1u32 << pin.pin) != 0
    }

    /// Raw bitmask for one port
    pub fn port_bits(&self, port: Port) -> u32 {
        self.ports[port.index()]
    }

    pub fn len(&self) -> usize {
        self.ports.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.iter().all(|w| *w == 0)
    }
}

/// Errors reported by a pad backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PadError {
    /// Pin number not bonded out on the port
    InvalidPin,
    /// Function cannot be routed to this pad
    UnsupportedFunction,
    /// Pad is held by the retention latch and cannot change
    Locked,
}

/// Pad controller
///
/// Implementations own the pad mux, data and power-select registers.
/// `configure` stages a new state; the state reaches the pin once the pad
/// latch has been cycled with `latch`.
pub trait PadControl {
    /// Set mode, function and output level of one pad
    fn configure(&mut self, pin: PinId, state: PinState) -> Result<(), PadError>;

    /// Read back the state currently programmed into a pad
    fn read_state(&self, pin: PinId) -> Result<PinState, PadError>;

    /// Open and close the pad latch so the staged state reaches the pin
    fn latch(&mut self, pin: PinId);

    /// Select the supply rail for every pin in `pins`
    fn set_power(&mut self, pins: &PinMask, level: PowerLevel) -> Result<(), PadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_validity() {
        assert!(PinId::new(Port::P0, 31).is_valid());
        assert!(PinId::new(Port::P1, 22).is_valid());
        assert!(!PinId::new(Port::P1, 23).is_valid());
        assert_eq!(Port::from_u8(1), Some(Port::P1));
        assert_eq!(Port::from_u8(2), None);
    }

    #[test]
    fn test_function_direction() {
        assert!(PinFunction::Uart2Rx.accepts(PinMode::Input));
        assert!(PinFunction::Uart2Rx.accepts(PinMode::InputPullUp));
        assert!(!PinFunction::Uart2Rx.accepts(PinMode::Output));
        assert!(PinFunction::Uart2Rtsn.accepts(PinMode::Output));
        assert!(!PinFunction::Uart2Rtsn.accepts(PinMode::Input));
        assert!(PinFunction::Gpio.accepts(PinMode::Input));
        assert!(PinFunction::I2cSda.accepts(PinMode::OutputOpenDrain));
    }

    #[test]
    fn test_pin_mask() {
        let mut mask = PinMask::new();
        assert!(mask.is_empty());

        assert!(mask.insert(PinId::new(Port::P0, 8)));
        assert!(mask.insert(PinId::new(Port::P1, 8)));
        // Same pin again
        assert!(!mask.insert(PinId::new(Port::P0, 8)));

        assert_eq!(mask.len(), 2);
        assert!(mask.contains(PinId::new(Port::P1, 8)));
        assert!(!mask.contains(PinId::new(Port::P0, 9)));
        assert_eq!(mask.port_bits(Port::P0), 1 << 8);
    }

    #[test]
    fn test_state_compare() {
        let a = PinState::new(PinMode::Input, PinFunction::Gpio, Level::High);
        let b = PinState::new(PinMode::Input, PinFunction::Gpio, Level::Low);
        assert!(a.same_as(&a));
        assert!(!a.same_as(&b));
        assert_eq!(Level::from(true), Level::High);
    }
}
