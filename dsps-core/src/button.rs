//! User button query
//!
//! Point-in-time sample of the button input. Debouncing is left to the
//! pad's input filter; this is not an edge detector.

use embedded_hal::digital::InputPin;

/// Level the button pin reads while pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed pulls the pin low (button to ground, pull-up fitted)
    Low,
    /// Pressed drives the pin high
    High,
}

/// User push button on a dedicated input pin
pub struct UserButton<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> UserButton<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Button to ground with pull-up, as on the development kit motherboards
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    pub fn active_high(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// Check whether the button is held down right now
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(match self.active {
            ActiveLevel::High => high,
            ActiveLevel::Low => !high,
        })
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock input pin for testing
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_active_low_button() {
        let mut button = UserButton::active_low(MockPin { high: false });
        assert!(button.is_pressed().unwrap());

        let mut button = UserButton::active_low(button.release());
        button.pin.high = true;
        assert!(!button.is_pressed().unwrap());
    }

    #[test]
    fn test_active_high_button() {
        let mut button = UserButton::active_high(MockPin { high: true });
        assert!(button.is_pressed().unwrap());
        assert_eq!(button.active_level(), ActiveLevel::High);

        button.pin.high = false;
        assert!(!button.is_pressed().unwrap());
    }
}
