//! Board-agnostic pin state and power-domain logic for DSPS firmware
//!
//! This crate contains everything that does not depend on a specific
//! board or chip backend:
//!
//! - Static descriptors for pins, UART buses, UART drivers and controllers
//! - Compile-time validation of those descriptors
//! - Bulk pin configuration with rollback
//! - Wake source registration with the power-domain controller
//! - Interrupt-safe elapsed time measurement
//! - User button query and the debug strobe pin

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod button;
pub mod config;
pub mod debug;
pub mod gpio;
pub mod time;
pub mod wake;

#[cfg(test)]
pub(crate) mod mock;
