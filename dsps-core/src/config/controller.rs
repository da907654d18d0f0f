//! UART controller descriptors
//!
//! A controller binds one UART instance to its bus wiring and driver
//! parameters. It is the unit handed to the UART adapter when the serial
//! port is opened.

use dsps_hal::gpio::{PinFunction, PinId};
use dsps_hal::uart::UartId;

use super::bus::{FlowControlPins, UartBus};
use super::driver::{FlowControl, UartDriverConfig};
use super::pin::DescriptorError;

/// UART instance with its wiring and operating parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartController {
    pub id: UartId,
    pub bus: &'static UartBus,
    pub driver: &'static UartDriverConfig,
}

impl UartController {
    pub const fn new(id: UartId, bus: &'static UartBus, driver: &'static UartDriverConfig) -> Self {
        Self { id, bus, driver }
    }

    /// Check the bus, the driver, and that they agree with each other
    pub const fn validate(&self) -> Result<(), DescriptorError> {
        if let Err(e) = self.bus.validate() {
            return Err(e);
        }
        if let Err(e) = self.driver.validate() {
            return Err(e);
        }

        let hw_flow = matches!(self.driver.flow_control, FlowControl::Hardware);
        if hw_flow != self.bus.flow.is_hardware() {
            return Err(DescriptorError::FlowControlMismatch);
        }
        if hw_flow && !self.id.has_flow_control() {
            return Err(DescriptorError::FlowControlUnsupported(self.id));
        }

        let rx = self.bus.rx;
        if let Err(e) = check_function(rx.id, rx.on.function, self.id.rx_function()) {
            return Err(e);
        }
        let tx = self.bus.tx;
        if let Err(e) = check_function(tx.id, tx.on.function, self.id.tx_function()) {
            return Err(e);
        }
        if let FlowControlPins::Hardware { rts, cts } = self.bus.flow {
            if let Some(f) = self.id.rts_function() {
                if let Err(e) = check_function(rts.id, rts.on.function, f) {
                    return Err(e);
                }
            }
            if let Some(f) = self.id.cts_function() {
                if let Err(e) = check_function(cts.id, cts.on.function, f) {
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

const fn check_function(
    pin: PinId,
    actual: PinFunction,
    expected: PinFunction,
) -> Result<(), DescriptorError> {
    if actual.same_as(expected) {
        Ok(())
    } else {
        Err(DescriptorError::WrongFunction(pin))
    }
}

/// Validate every controller of a board and reject reused UART instances
pub const fn validate_controllers(controllers: &[&UartController]) -> Result<(), DescriptorError> {
    let mut i = 0;
    while i < controllers.len() {
        if let Err(e) = controllers[i].validate() {
            return Err(e);
        }
        let mut j = i + 1;
        while j < controllers.len() {
            if controllers[i].id as u8 == controllers[j].id as u8 {
                return Err(DescriptorError::DuplicateController(controllers[j].id));
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

/// UART adapter seam
///
/// The adapter programs the UART block, its FIFOs and DMA channels from
/// the controller descriptor when a serial port is opened.
pub trait SerialAdapter {
    /// Open port handle
    type Handle;
    /// Error opening the port
    type Error;

    fn open(&mut self, controller: &'static UartController) -> Result<Self::Handle, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{leak, uart2_bus, uart2_bus_no_flow, uart_driver};

    #[test]
    fn test_valid_controller() {
        let ctrl = UartController::new(
            UartId::Uart2,
            leak(uart2_bus()),
            leak(uart_driver(FlowControl::Hardware)),
        );
        assert!(ctrl.validate().is_ok());

        let ctrl = UartController::new(
            UartId::Uart2,
            leak(uart2_bus_no_flow()),
            leak(uart_driver(FlowControl::Software)),
        );
        assert!(ctrl.validate().is_ok());
    }

    #[test]
    fn test_flow_control_mismatch() {
        let ctrl = UartController::new(
            UartId::Uart2,
            leak(uart2_bus_no_flow()),
            leak(uart_driver(FlowControl::Hardware)),
        );
        assert_eq!(ctrl.validate(), Err(DescriptorError::FlowControlMismatch));

        let ctrl = UartController::new(
            UartId::Uart2,
            leak(uart2_bus()),
            leak(uart_driver(FlowControl::Software)),
        );
        assert_eq!(ctrl.validate(), Err(DescriptorError::FlowControlMismatch));
    }

    #[test]
    fn test_wrong_instance_functions() {
        let bus = leak(uart2_bus_no_flow());
        let ctrl = UartController::new(UartId::Uart3, bus, leak(uart_driver(FlowControl::None)));
        assert_eq!(ctrl.validate(), Err(DescriptorError::WrongFunction(bus.rx.id)));
    }

    #[test]
    fn test_duplicate_controllers() {
        let ctrl = leak(UartController::new(
            UartId::Uart2,
            leak(uart2_bus_no_flow()),
            leak(uart_driver(FlowControl::None)),
        ));
        assert!(validate_controllers(&[ctrl]).is_ok());
        assert_eq!(
            validate_controllers(&[ctrl, ctrl]),
            Err(DescriptorError::DuplicateController(UartId::Uart2))
        );
    }
}
