// src/display/mod.rs

//! Display abstraction: a message-based driver protocol with X11 and
//! headless implementations.

pub mod driver;
pub mod drivers;
pub mod messages;

pub use driver::DisplayDriver;
pub use messages::{DisplayEvent, DriverRequest, DriverResponse};
