//! Configuration descriptors
//!
//! Static, immutable descriptions of how a peripheral is wired and clocked.
//! Every field is set explicitly; none of these types implement `Default`.

pub mod bus;
pub mod controller;
pub mod driver;
pub mod pin;

pub use bus::*;
pub use controller::*;
pub use driver::*;
pub use pin::*;
