//! DSPS Hardware Abstraction Layer
//!
//! This crate defines the electrical vocabulary (ports, pins, drive modes,
//! pad functions, power rails) and the traits a chip-specific backend
//! implements so the pin-state logic in `dsps-core` stays board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Board (dsps-board: tables, boot)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dsps-core (configurator, registrar)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dsps-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!        pad registers / PDC / sleep timer
//! ```
//!
//! # Traits
//!
//! - [`gpio::PadControl`] - Pad mux, drive state, latch and power rail
//! - [`power::PowerDomains`] - Switching individual power domains
//! - [`wake::WakeController`] - Power-domain controller entry table
//! - [`time::TickSource`], [`time::ContextQuery`] - Uptime ticks

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod power;
pub mod time;
pub mod uart;
pub mod wake;

// Re-export key traits at crate root for convenience
pub use gpio::{Level, PadControl, PadError, PinFunction, PinId, PinMask, PinMode, PinState, Port};
pub use power::{PowerDomain, PowerDomains, PowerLevel};
pub use time::{ContextQuery, ExecutionContext, TickSource};
pub use uart::{DataBits, DmaChannel, Parity, StopBits, UartId};
pub use wake::{SlotsExhausted, TriggerPolarity, WakeController, WakeEntry, WakeTarget};
