//! `embedded-hal` driver for the Texas Instruments LP5024, a 24-channel
//! (8 RGB LED) constant current LED driver controlled over I2C.
//!
//! ```no_run
//! # use embedded_hal::{delay::DelayNs, i2c::I2c};
//! use lp5024::{AddressSelector, ColorOrder, Config, Hsb, LP5024};
//!
//! # fn demo<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Result<(), lp5024::LP5024Error> {
//! let mut leds = LP5024::new_with_i2c_bus(i2c, AddressSelector::A1GndA0Gnd, delay);
//!
//! leds.initialize(&Config::default())?;
//! leds.set_rgb_led_color_hsb(ColorOrder::Grb, 0, Hsb::new(200.0, 80.0, 50.0))?;
//! # Ok(())
//! # }
//! ```
//!
//! Every bus transaction is retried according to a [`RetryPolicy`] when the
//! bus reports it as busy. Single bits of the shared configuration registers
//! are changed with a read-modify-write so that the other bits survive.
#![no_std]

pub mod addressing;
pub mod color;
pub mod config;
pub mod i2c;
pub mod lp5024;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use color::{hsb_to_rgb, ColorOrder, Hsb, Rgb};
pub use config::{Config, MaxCurrent};
pub use i2c::{AddressSelector, I2cAdapter, RawDevice};
pub use lp5024::{LP5024Error, LP5024};
pub use transaction::RetryPolicy;
