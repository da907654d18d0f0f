//! Board constants generated from `board.toml`
//!
//! See `build.rs` for the accepted keys and the checks applied.

use dsps_core::button::ActiveLevel;
use dsps_core::config::FlowControl;
use dsps_hal::gpio::{PinId, Port};
use dsps_hal::power::PowerLevel;
use dsps_hal::uart::{DmaChannel, UartId};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
