//! UART driver descriptors
//!
//! Operating parameters handed to the UART adapter: rate, framing,
//! flow control, FIFO thresholds and DMA channel assignment.

use dsps_hal::uart::{DataBits, DmaChannel, Parity, StopBits};

use super::pin::DescriptorError;

/// Highest FIFO trigger level (FIFO 1/2 full)
pub const MAX_FIFO_TRIGGER_LEVEL: u8 = 3;

/// Highest DMA burst level (8 transfers)
pub const MAX_DMA_BURST_LEVEL: u8 = 2;

/// Flow-control mode
///
/// Hardware and software flow control are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowControl {
    None,
    /// RTS/CTS handled by the UART block (auto flow control)
    Hardware,
    /// XON/XOFF handled in software on the data lines
    Software,
}

impl FlowControl {
    /// Auto flow control bit of the UART block
    pub const fn auto_flow_control(self) -> bool {
        matches!(self, FlowControl::Hardware)
    }
}

/// FIFO trigger levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoConfig {
    pub tx_trigger_level: u8,
    pub rx_trigger_level: u8,
}

/// DMA channel assignment and burst sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaConfig {
    pub tx_channel: DmaChannel,
    pub rx_channel: DmaChannel,
    pub tx_burst_level: u8,
    pub rx_burst_level: u8,
}

/// UART hardware operating parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartDriverConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    pub data: DataBits,
    pub parity: Parity,
    pub stop: StopBits,
    pub flow_control: FlowControl,
    /// FIFO thresholds, `None` to run without the FIFO
    pub fifo: Option<FifoConfig>,
    /// DMA assignment, `None` for interrupt-driven transfers
    pub dma: Option<DmaConfig>,
}

impl UartDriverConfig {
    pub const fn validate(&self) -> Result<(), DescriptorError> {
        if self.baud_rate == 0 {
            return Err(DescriptorError::InvalidBaudRate);
        }
        if let Some(fifo) = self.fifo {
            if fifo.tx_trigger_level > MAX_FIFO_TRIGGER_LEVEL
                || fifo.rx_trigger_level > MAX_FIFO_TRIGGER_LEVEL
            {
                return Err(DescriptorError::InvalidLevel);
            }
        }
        if let Some(dma) = self.dma {
            if dma.tx_channel.as_u8() == dma.rx_channel.as_u8() {
                return Err(DescriptorError::SharedDmaChannel);
            }
            if !dma.rx_channel.is_rx_channel() || dma.tx_channel.is_rx_channel() {
                return Err(DescriptorError::DmaDirection);
            }
            if dma.tx_burst_level > MAX_DMA_BURST_LEVEL
                || dma.rx_burst_level > MAX_DMA_BURST_LEVEL
            {
                return Err(DescriptorError::InvalidLevel);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::uart_driver;

    #[test]
    fn test_valid_driver() {
        let drv = uart_driver(FlowControl::Hardware);
        assert!(drv.validate().is_ok());
        assert!(drv.flow_control.auto_flow_control());
        assert!(!FlowControl::Software.auto_flow_control());
    }

    #[test]
    fn test_shared_dma_channel_rejected() {
        let mut drv = uart_driver(FlowControl::None);
        drv.dma = Some(DmaConfig {
            tx_channel: DmaChannel::Ch2,
            rx_channel: DmaChannel::Ch2,
            tx_burst_level: 0,
            rx_burst_level: 0,
        });
        assert_eq!(drv.validate(), Err(DescriptorError::SharedDmaChannel));
    }

    #[test]
    fn test_swapped_dma_channels_rejected() {
        let mut drv = uart_driver(FlowControl::None);
        drv.dma = Some(DmaConfig {
            tx_channel: DmaChannel::Ch2,
            rx_channel: DmaChannel::Ch3,
            tx_burst_level: 0,
            rx_burst_level: 0,
        });
        assert_eq!(drv.validate(), Err(DescriptorError::DmaDirection));
    }

    #[test]
    fn test_levels_checked() {
        let mut drv = uart_driver(FlowControl::None);
        drv.fifo = Some(FifoConfig {
            tx_trigger_level: 4,
            rx_trigger_level: 0,
        });
        assert_eq!(drv.validate(), Err(DescriptorError::InvalidLevel));

        let mut drv = uart_driver(FlowControl::None);
        drv.baud_rate = 0;
        assert_eq!(drv.validate(), Err(DescriptorError::InvalidBaudRate));
    }

    #[test]
    fn test_software_flow_without_dma() {
        let mut drv = uart_driver(FlowControl::Software);
        drv.dma = None;
        drv.fifo = None;
        assert!(drv.validate().is_ok());
    }
}
