#![doc = include_str!("../README.md")]

mod error;

pub mod bridge;
pub mod calendar;
pub mod registers;
pub mod validity;

pub use bridge::{ClockBridge, HostClock, Transport};
pub use calendar::CalendarTime;
pub use error::{Error, Result};
pub use registers::{RegisterFields, TIME_REGISTER};
