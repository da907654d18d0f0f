//! DSPS board support
//!
//! Static pin tables for the serial port service board, generated from
//! `board.toml`, and the sequencing that applies them at boot and on
//! every power-domain transition.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod boot;
pub mod config;
pub mod devices;

pub use boot::{open_serial, user_button, Board, BootError, UPTIME};
pub use devices::{
    board_pins, wake_sources, APP_PINS, BUTTON, SERIAL_DEVICE, UART_BUS, UART_DRIVER,
};
