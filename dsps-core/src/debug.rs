//! Debug strobe pin
//!
//! Drives a spare pin high or low around code whose latency is measured
//! with a scope or logic analyser. The pad latches sit in the
//! communication power domain, which is switched on only for the write.
//!
//! Without the `debug-io` feature every call is a no-op, so strobes can
//! stay in release code.

use dsps_hal::gpio::{Level, PadControl, PadError, PinId};
#[cfg(feature = "debug-io")]
use dsps_hal::gpio::{PinFunction, PinMode, PinState};
#[cfg(feature = "debug-io")]
use dsps_hal::power::PowerDomain;
use dsps_hal::power::PowerDomains;

/// Debug output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebugStrobe {
    pin: PinId,
}

impl DebugStrobe {
    pub const fn new(pin: PinId) -> Self {
        Self { pin }
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn high<P: PadControl, D: PowerDomains>(
        &self,
        pads: &mut P,
        domains: &mut D,
    ) -> Result<(), PadError> {
        self.set(pads, domains, Level::High)
    }

    pub fn low<P: PadControl, D: PowerDomains>(
        &self,
        pads: &mut P,
        domains: &mut D,
    ) -> Result<(), PadError> {
        self.set(pads, domains, Level::Low)
    }

    #[cfg(feature = "debug-io")]
    pub fn set<P: PadControl, D: PowerDomains>(
        &self,
        pads: &mut P,
        domains: &mut D,
        level: Level,
    ) -> Result<(), PadError> {
        domains.enable(PowerDomain::Communication);
        let state = PinState::new(PinMode::Output, PinFunction::Gpio, level);
        let result = pads.configure(self.pin, state);
        if result.is_ok() {
            pads.latch(self.pin);
        }
        domains.disable(PowerDomain::Communication);
        result
    }

    #[cfg(not(feature = "debug-io"))]
    pub fn set<P: PadControl, D: PowerDomains>(
        &self,
        _pads: &mut P,
        _domains: &mut D,
        _level: Level,
    ) -> Result<(), PadError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDomains, MockPads};
    use dsps_hal::gpio::Port;

    const STROBE: DebugStrobe = DebugStrobe::new(PinId::new(Port::P1, 2));

    #[cfg(feature = "debug-io")]
    #[test]
    fn test_strobe_drives_pin() {
        use dsps_hal::power::PowerDomain;

        let mut pads = MockPads::new();
        let mut domains = MockDomains::default();

        STROBE.high(&mut pads, &mut domains).unwrap();
        assert_eq!(pads.state(STROBE.pin()).level, Level::High);
        assert_eq!(pads.state(STROBE.pin()).mode, PinMode::Output);
        assert_eq!(pads.latches, [STROBE.pin()]);

        // Domain switched on for the write only
        assert_eq!(
            domains.log,
            [
                (PowerDomain::Communication, true),
                (PowerDomain::Communication, false)
            ]
        );

        STROBE.low(&mut pads, &mut domains).unwrap();
        assert_eq!(pads.state(STROBE.pin()).level, Level::Low);
    }

    #[cfg(feature = "debug-io")]
    #[test]
    fn test_strobe_failure_still_powers_down() {
        let mut pads = MockPads::new();
        pads.fail_on = Some(STROBE.pin());
        let mut domains = MockDomains::default();

        assert_eq!(STROBE.high(&mut pads, &mut domains), Err(PadError::Locked));
        assert_eq!(domains.log.len(), 2);
        assert!(pads.latches.is_empty());
    }

    #[cfg(not(feature = "debug-io"))]
    #[test]
    fn test_strobe_disabled_is_noop() {
        let mut pads = MockPads::new();
        let mut domains = MockDomains::default();

        STROBE.high(&mut pads, &mut domains).unwrap();
        assert_eq!(pads.state(STROBE.pin()), crate::mock::RESET_STATE);
        assert!(domains.log.is_empty());
    }
}
