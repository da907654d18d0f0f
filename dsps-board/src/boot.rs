//! Boot and power-transition sequencing
//!
//! At boot and after every wake-up the pins go to their on states and
//! the wake sources are registered again. Before sleep the pins go to
//! their off states. The registered wake sources stay in place while
//! asleep.

use dsps_core::button::UserButton;
use dsps_core::config::{SerialAdapter, TargetState};
use dsps_core::debug::DebugStrobe;
use dsps_core::gpio::{apply_pin_set, ConfigError};
use dsps_core::time::{Stopwatch, UptimeCounter};
use dsps_core::wake::{register_wake_sources, release_wake_sources, WakeError, WakeReport};
use dsps_hal::gpio::{Level, PadControl, PadError};
use dsps_hal::power::{PowerDomain, PowerDomains};
use dsps_hal::time::ExecutionContext;
use dsps_hal::wake::WakeController;
use embedded_hal::digital::InputPin;

use crate::config::{BUTTON_ACTIVE, DEBUG_STROBE, PIN_POWER};
use crate::devices::{board_pins, wake_sources, SERIAL_DEVICE};

/// Sleep timer rate
pub const UPTIME_HZ: u32 = 32_768;

/// System uptime, advanced by the sleep timer interrupt
pub static UPTIME: UptimeCounter<UPTIME_HZ> = UptimeCounter::new();

/// Boot sequence failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    Pins(ConfigError),
    Wake(WakeError),
}

impl From<ConfigError> for BootError {
    fn from(e: ConfigError) -> Self {
        BootError::Pins(e)
    }
}

impl From<WakeError> for BootError {
    fn from(e: WakeError) -> Self {
        BootError::Wake(e)
    }
}

/// Board peripherals owned by the boot sequencer
pub struct Board<P, W, D> {
    pads: P,
    pdc: W,
    domains: D,
    wake: Option<WakeReport>,
    strobe: Option<DebugStrobe>,
}

impl<P: PadControl, W: WakeController, D: PowerDomains> Board<P, W, D> {
    pub fn new(pads: P, pdc: W, domains: D) -> Self {
        Self {
            pads,
            pdc,
            domains,
            wake: None,
            strobe: DEBUG_STROBE.map(DebugStrobe::new),
        }
    }

    /// Bring the pins up and register the wake sources
    ///
    /// Any error aborts boot. On a pin error every board pin is back in its
    /// previous state; on a wake error the pins stay on and no wake slot
    /// is held.
    pub fn init(&mut self) -> Result<(), BootError> {
        let watch = Stopwatch::start(&UPTIME, ExecutionContext::Thread);

        self.domains.enable(PowerDomain::Communication);
        self.apply(TargetState::On)?;
        debug!("pins on");

        if let Some(old) = self.wake.take() {
            release_wake_sources(&mut self.pdc, old);
        }
        let report = register_wake_sources(&mut self.pdc, &wake_sources()).map_err(|e| {
            error!("wake source registration failed: {}", e);
            e
        })?;
        info!(
            "board up: {} wake sources of {} slots, {} us",
            report.len(),
            self.pdc.capacity(),
            watch.elapsed_us(&UPTIME, ExecutionContext::Thread)
        );
        self.wake = Some(report);
        Ok(())
    }

    /// Put every pin in its sleep state and power down the communication domain
    pub fn enter_sleep(&mut self) -> Result<(), BootError> {
        if self.wake.is_none() {
            warn!("entering sleep without wake sources");
        }
        self.apply(TargetState::Off)?;
        self.domains.disable(PowerDomain::Communication);
        debug!("pins off");
        Ok(())
    }

    /// Restore the pins after a wake-up
    pub fn wake(&mut self) -> Result<(), BootError> {
        debug!("waking");
        self.init()
    }

    /// Drive the debug strobe, if the board has one
    pub fn strobe(&mut self, level: Level) -> Result<(), PadError> {
        match self.strobe {
            Some(strobe) => strobe.set(&mut self.pads, &mut self.domains, level),
            None => Ok(()),
        }
    }

    /// Slots held by the current wake sources
    pub fn wake_report(&self) -> Option<&WakeReport> {
        self.wake.as_ref()
    }

    pub fn pads(&self) -> &P {
        &self.pads
    }

    pub fn pdc(&self) -> &W {
        &self.pdc
    }

    pub fn domains(&self) -> &D {
        &self.domains
    }

    /// Give the peripherals back
    pub fn release(self) -> (P, W, D) {
        (self.pads, self.pdc, self.domains)
    }

    fn apply(&mut self, target: TargetState) -> Result<(), ConfigError> {
        apply_pin_set(&mut self.pads, &board_pins(), PIN_POWER, target).map_err(|e| {
            error!("board pins failed: {}", e);
            e
        })
    }
}

/// Open the board's serial port through `adapter`
///
/// The controller tables were checked when the crate was built.
pub fn open_serial<A: SerialAdapter>(adapter: &mut A) -> Result<A::Handle, A::Error> {
    info!("opening UART{} at {} baud", SERIAL_DEVICE.id as u8, SERIAL_DEVICE.driver.baud_rate);
    adapter.open(&SERIAL_DEVICE)
}

/// Wrap the button input with the board's active level
pub fn user_button<I: InputPin>(pin: I) -> UserButton<I> {
    UserButton::new(pin, BUTTON_ACTIVE)
}
