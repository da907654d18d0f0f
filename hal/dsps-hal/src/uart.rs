//! UART framing vocabulary
//!
//! Only the types needed to describe how a UART is wired and clocked.
//! Moving bytes is the adapter's job.

use crate::gpio::PinFunction;

/// UART peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum UartId {
    Uart1 = 1,
    Uart2 = 2,
    Uart3 = 3,
}

impl UartId {
    /// Only UART2 and UART3 have RTS/CTS lines
    pub const fn has_flow_control(self) -> bool {
        matches!(self, UartId::Uart2 | UartId::Uart3)
    }

    pub const fn rx_function(self) -> PinFunction {
        match self {
            UartId::Uart1 => PinFunction::UartRx,
            UartId::Uart2 => PinFunction::Uart2Rx,
            UartId::Uart3 => PinFunction::Uart3Rx,
        }
    }

    pub const fn tx_function(self) -> PinFunction {
        match self {
            UartId::Uart1 => PinFunction::UartTx,
            UartId::Uart2 => PinFunction::Uart2Tx,
            UartId::Uart3 => PinFunction::Uart3Tx,
        }
    }

    pub const fn rts_function(self) -> Option<PinFunction> {
        match self {
            UartId::Uart1 => None,
            UartId::Uart2 => Some(PinFunction::Uart2Rtsn),
            UartId::Uart3 => Some(PinFunction::Uart3Rtsn),
        }
    }

    pub const fn cts_function(self) -> Option<PinFunction> {
        match self {
            UartId::Uart1 => None,
            UartId::Uart2 => Some(PinFunction::Uart2Ctsn),
            UartId::Uart3 => Some(PinFunction::Uart3Ctsn),
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(UartId::Uart1),
            2 => Some(UartId::Uart2),
            3 => Some(UartId::Uart3),
            _ => None,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// DMA channel
///
/// Even channels serve peripheral-to-memory, odd channels
/// memory-to-peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DmaChannel {
    Ch0 = 0,
    Ch1 = 1,
    Ch2 = 2,
    Ch3 = 3,
    Ch4 = 4,
    Ch5 = 5,
    Ch6 = 6,
    Ch7 = 7,
}

impl DmaChannel {
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DmaChannel::Ch0),
            1 => Some(DmaChannel::Ch1),
            2 => Some(DmaChannel::Ch2),
            3 => Some(DmaChannel::Ch3),
            4 => Some(DmaChannel::Ch4),
            5 => Some(DmaChannel::Ch5),
            6 => Some(DmaChannel::Ch6),
            7 => Some(DmaChannel::Ch7),
            _ => None,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Channel moves data from a peripheral into memory
    pub const fn is_rx_channel(self) -> bool {
        self.as_u8() % 2 == 0
    }
}
