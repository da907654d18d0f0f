//! Static descriptor tables of the board
//!
//! Built in const context from the generated board constants and
//! validated at compile time: a table that is electrically inconsistent
//! fails the build instead of the boot.

use dsps_core::button::ActiveLevel;
use dsps_core::config::{
    validate_controllers, validate_pin_list, DmaConfig, FifoConfig, FlowControlPins, PinDescriptor,
    UartBus, UartController, UartDriverConfig, MAX_BUS_PINS,
};
use dsps_hal::gpio::{Level, PinFunction, PinMode, PinState};
use dsps_hal::uart::{DataBits, Parity, StopBits};
use heapless::Vec;

use crate::config::*;

const UART_RX_PIN: PinDescriptor = PinDescriptor::new(
    UART_RX,
    PinState::new(PinMode::Input, UART_INSTANCE.rx_function(), Level::Low),
    // Pulled up while asleep so a start bit from the host wakes us
    PinState::new(PinMode::InputPullUp, PinFunction::Gpio, Level::High),
);

const UART_TX_PIN: PinDescriptor = PinDescriptor::new(
    UART_TX,
    PinState::new(PinMode::Output, UART_INSTANCE.tx_function(), Level::Low),
    PinState::new(PinMode::InputPullUp, PinFunction::Gpio, Level::High),
);

const UART_FLOW: FlowControlPins = match (
    UART_FLOW_PINS,
    UART_INSTANCE.rts_function(),
    UART_INSTANCE.cts_function(),
) {
    (Some((rts, cts)), Some(rts_function), Some(cts_function)) => FlowControlPins::Hardware {
        // Held high (not ready) while asleep
        rts: PinDescriptor::new(
            rts,
            PinState::new(PinMode::Output, rts_function, Level::Low),
            PinState::new(PinMode::Output, PinFunction::Gpio, Level::High),
        ),
        cts: PinDescriptor::new(
            cts,
            PinState::new(PinMode::Input, cts_function, Level::Low),
            PinState::new(PinMode::InputPullUp, PinFunction::Gpio, Level::High),
        ),
    },
    _ => FlowControlPins::None,
};

/// UART wiring
pub const UART_BUS: UartBus = UartBus {
    rx: UART_RX_PIN,
    tx: UART_TX_PIN,
    flow: UART_FLOW,
    voltage_level: PIN_POWER,
};

/// UART operating parameters
pub const UART_DRIVER: UartDriverConfig = UartDriverConfig {
    baud_rate: UART_BAUD_RATE,
    data: DataBits::Eight,
    parity: Parity::None,
    stop: StopBits::One,
    flow_control: UART_FLOW_CONTROL,
    fifo: Some(FifoConfig {
        tx_trigger_level: UART_FIFO_TX_TRIGGER,
        rx_trigger_level: UART_FIFO_RX_TRIGGER,
    }),
    dma: Some(DmaConfig {
        tx_channel: UART_DMA_TX,
        rx_channel: UART_DMA_RX,
        tx_burst_level: UART_DMA_TX_BURST,
        rx_burst_level: UART_DMA_RX_BURST,
    }),
};

pub const UART_DEVICE: UartController = UartController::new(UART_INSTANCE, &UART_BUS, &UART_DRIVER);

/// Serial port handed to the UART adapter
pub static SERIAL_DEVICE: UartController = UART_DEVICE;

/// User button, read as a GPIO input and used as a wake source
pub const BUTTON: PinDescriptor = match BUTTON_ACTIVE {
    ActiveLevel::Low => PinDescriptor::new(
        BUTTON_PIN,
        PinState::new(PinMode::InputPullUp, PinFunction::Gpio, Level::Low),
        PinState::new(PinMode::InputPullUp, PinFunction::Gpio, Level::High),
    ),
    ActiveLevel::High => PinDescriptor::new(
        BUTTON_PIN,
        PinState::new(PinMode::InputPullDown, PinFunction::Gpio, Level::High),
        PinState::new(PinMode::InputPullDown, PinFunction::Gpio, Level::Low),
    ),
};

/// Application pins outside the UART bus
pub const APP_PINS: [PinDescriptor; 1] = [BUTTON];

/// Most pins the board configures
pub const BOARD_PIN_COUNT: usize = MAX_BUS_PINS + APP_PINS.len();

const fn disjoint(bus: &UartBus, pins: &[PinDescriptor]) -> bool {
    let bus_pins = bus.pins();
    let bus_pins = bus_pins.as_slice();
    let mut i = 0;
    while i < bus_pins.len() {
        let mut j = 0;
        while j < pins.len() {
            if bus_pins[i].id.same_as(pins[j].id) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(validate_controllers(&[&UART_DEVICE]).is_ok(), "invalid UART controller");
const _: () = assert!(validate_pin_list(&APP_PINS).is_ok(), "invalid application pin");
const _: () = assert!(disjoint(&UART_BUS, &APP_PINS), "application pin overlaps the UART bus");
const _: () = assert!(
    UART_BUS.voltage_level as u8 == PIN_POWER as u8,
    "UART bus and application pins must share one rail"
);

/// UART bus pins followed by the application pins
///
/// All of them sit on the `PIN_POWER` rail, so they are applied as one set
/// and roll back together.
pub fn board_pins() -> Vec<PinDescriptor, BOARD_PIN_COUNT> {
    UART_BUS.pins().iter().chain(APP_PINS.iter()).copied().collect()
}

/// Every pin that wakes the application core
///
/// Only lines driven from outside: the UART inputs (RX, CTS) and the
/// application pins. TX and RTS are driven by the device itself.
pub fn wake_sources() -> Vec<PinDescriptor, BOARD_PIN_COUNT> {
    board_pins()
        .into_iter()
        .filter(|desc| !desc.on.mode.is_output())
        .collect()
}
