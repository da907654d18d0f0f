//! Mock peripherals shared by the unit tests

use std::boxed::Box;
use std::vec::Vec;

use dsps_hal::gpio::{
    Level, PadControl, PadError, PinFunction, PinId, PinMask, PinMode, PinState, Port,
};
use dsps_hal::power::{PowerDomain, PowerDomains, PowerLevel};
use dsps_hal::time::TickSource;
use dsps_hal::uart::{DataBits, DmaChannel, Parity, StopBits};
use dsps_hal::wake::{SlotsExhausted, WakeController, WakeEntry};

use crate::config::{
    DmaConfig, FifoConfig, FlowControl, FlowControlPins, PinDescriptor, UartBus, UartDriverConfig,
};

/// Give a test value the `'static` lifetime descriptors require
pub fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

pub const RESET_STATE: PinState = PinState::new(PinMode::Input, PinFunction::Gpio, Level::Low);

pub const UART_RX: PinDescriptor = PinDescriptor::new(
    PinId::new(Port::P0, 8),
    PinState::new(PinMode::Input, PinFunction::Uart2Rx, Level::Low),
    PinState::new(PinMode::Input, PinFunction::Gpio, Level::High),
);

pub const UART_TX: PinDescriptor = PinDescriptor::new(
    PinId::new(Port::P0, 9),
    PinState::new(PinMode::Output, PinFunction::Uart2Tx, Level::Low),
    PinState::new(PinMode::Input, PinFunction::Gpio, Level::High),
);

pub const UART_RTS: PinDescriptor = PinDescriptor::new(
    PinId::new(Port::P0, 7),
    PinState::new(PinMode::Output, PinFunction::Uart2Rtsn, Level::Low),
    PinState::new(PinMode::Output, PinFunction::Gpio, Level::High),
);

pub const UART_CTS: PinDescriptor = PinDescriptor::new(
    PinId::new(Port::P0, 6),
    PinState::new(PinMode::Input, PinFunction::Uart2Ctsn, Level::Low),
    PinState::new(PinMode::Input, PinFunction::Gpio, Level::High),
);

pub fn uart2_bus() -> UartBus {
    UartBus {
        rx: UART_RX,
        tx: UART_TX,
        flow: FlowControlPins::Hardware {
            rts: UART_RTS,
            cts: UART_CTS,
        },
        voltage_level: PowerLevel::V3_3,
    }
}

pub fn uart2_bus_no_flow() -> UartBus {
    UartBus {
        flow: FlowControlPins::None,
        ..uart2_bus()
    }
}

pub fn uart_driver(flow_control: FlowControl) -> UartDriverConfig {
    UartDriverConfig {
        baud_rate: 115_200,
        data: DataBits::Eight,
        parity: Parity::None,
        stop: StopBits::One,
        flow_control,
        fifo: Some(FifoConfig {
            tx_trigger_level: 0,
            rx_trigger_level: 0,
        }),
        dma: Some(DmaConfig {
            tx_channel: DmaChannel::Ch3,
            rx_channel: DmaChannel::Ch2,
            tx_burst_level: 0,
            rx_burst_level: 0,
        }),
    }
}

/// Pad controller backed by plain arrays
pub struct MockPads {
    states: [[PinState; 32]; 2],
    power: [[Option<PowerLevel>; 32]; 2],
    pub latches: Vec<PinId>,
    pub power_calls: usize,
    /// Refuse to configure this pin
    pub fail_on: Option<PinId>,
    /// Refuse to select the power rail
    pub fail_power: bool,
    /// Refuse to read back this pin
    pub fail_read: Option<PinId>,
}

impl MockPads {
    pub fn new() -> Self {
        Self {
            states: [[RESET_STATE; 32]; 2],
            power: [[None; 32]; 2],
            latches: Vec::new(),
            power_calls: 0,
            fail_on: None,
            fail_power: false,
            fail_read: None,
        }
    }

    pub fn state(&self, pin: PinId) -> PinState {
        self.states[pin.port.index()][pin.pin as usize]
    }

    pub fn power(&self, pin: PinId) -> Option<PowerLevel> {
        self.power[pin.port.index()][pin.pin as usize]
    }
}

impl PadControl for MockPads {
    fn configure(&mut self, pin: PinId, state: PinState) -> Result<(), PadError> {
        if !pin.is_valid() {
            return Err(PadError::InvalidPin);
        }
        if self.fail_on == Some(pin) {
            return Err(PadError::Locked);
        }
        self.states[pin.port.index()][pin.pin as usize] = state;
        Ok(())
    }

    fn read_state(&self, pin: PinId) -> Result<PinState, PadError> {
        if !pin.is_valid() {
            return Err(PadError::InvalidPin);
        }
        if self.fail_read == Some(pin) {
            return Err(PadError::Locked);
        }
        Ok(self.state(pin))
    }

    fn latch(&mut self, pin: PinId) {
        self.latches.push(pin);
    }

    fn set_power(&mut self, pins: &PinMask, level: PowerLevel) -> Result<(), PadError> {
        self.power_calls += 1;
        if self.fail_power {
            return Err(PadError::Locked);
        }
        for port in [Port::P0, Port::P1] {
            for pin in 0..port.pin_count() {
                let id = PinId::new(port, pin);
                if pins.contains(id) {
                    self.power[port.index()][pin as usize] = Some(level);
                }
            }
        }
        Ok(())
    }
}

/// Power-domain switch recording every transition
#[derive(Default)]
pub struct MockDomains {
    pub log: Vec<(PowerDomain, bool)>,
}

impl PowerDomains for MockDomains {
    fn enable(&mut self, domain: PowerDomain) {
        self.log.push((domain, true));
    }

    fn disable(&mut self, domain: PowerDomain) {
        self.log.push((domain, false));
    }
}

/// Power-domain controller with a fixed number of slots
pub struct MockWake {
    slots: Vec<Option<WakeEntry>>,
    pub entries: Vec<WakeEntry>,
}

impl MockWake {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: std::vec![None; capacity],
            entries: Vec::new(),
        }
    }

    fn sync(&mut self) {
        self.entries = self.slots.iter().flatten().copied().collect();
    }
}

impl WakeController for MockWake {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn add_entry(&mut self, entry: WakeEntry) -> Result<u8, SlotsExhausted> {
        let slot = self
            .slots
            .iter()
            .position(|s| s.is_none())
            .ok_or(SlotsExhausted)?;
        self.slots[slot] = Some(entry);
        self.sync();
        Ok(slot as u8)
    }

    fn remove_entry(&mut self, slot: u8) {
        if let Some(s) = self.slots.get_mut(slot as usize) {
            *s = None;
        }
        self.sync();
    }
}

/// Tick source returning preset values, recording which accessor ran
pub struct MockTicks<const BITS: u32> {
    pub thread: core::cell::Cell<u64>,
    pub isr: core::cell::Cell<u64>,
    pub isr_reads: core::cell::Cell<usize>,
}

impl<const BITS: u32> MockTicks<BITS> {
    pub fn new(now: u64) -> Self {
        Self {
            thread: core::cell::Cell::new(now),
            isr: core::cell::Cell::new(now),
            isr_reads: core::cell::Cell::new(0),
        }
    }

    pub fn set(&self, now: u64) {
        self.thread.set(now);
        self.isr.set(now);
    }
}

impl<const BITS: u32> TickSource for MockTicks<BITS> {
    // 1 MHz keeps ticks and microseconds equal
    const TICK_HZ: u32 = 1_000_000;
    const COUNTER_BITS: u32 = BITS;

    fn uptime_ticks(&self) -> u64 {
        self.thread.get()
    }

    fn uptime_ticks_from_isr(&self) -> u64 {
        self.isr_reads.set(self.isr_reads.get() + 1);
        self.isr.get()
    }
}
