//! Mapping of logical LED indices onto register addresses.

use crate::config::*;
use crate::lp5024::LP5024Error;

/// Brightness register of RGB LED `index` (0..=7).
pub fn rgb_led_brightness_register(index: u8) -> Result<u8, LP5024Error> {
    if index >= RGB_LED_COUNT {
        return Err(LP5024Error::InputOutOfRange);
    }
    Ok(RGB_LED_BRIGHTNESS_REGISTER_BASE + index)
}

/// Brightness register of output `index` (0..=23).
pub fn led_brightness_register(index: u8) -> Result<u8, LP5024Error> {
    if index >= LED_COUNT {
        return Err(LP5024Error::InputOutOfRange);
    }
    Ok(LED_BRIGHTNESS_REGISTER_BASE + index)
}

/// The three output registers driven by RGB LED `index`, in slot order.
pub fn rgb_led_color_registers(index: u8) -> Result<[u8; 3], LP5024Error> {
    if index >= RGB_LED_COUNT {
        return Err(LP5024Error::InputOutOfRange);
    }
    let first = LED_BRIGHTNESS_REGISTER_BASE + index * 3;

    Ok([first, first + 1, first + 2])
}

/// Bit of RGB LED `index` in the LED configuration register.
pub fn bank_enable_mask(index: u8) -> Result<u8, LP5024Error> {
    if index >= RGB_LED_COUNT {
        return Err(LP5024Error::InputOutOfRange);
    }
    Ok(1 << index)
}

/// Check that `len` consecutive registers starting at `start` stay inside a
/// group of `count` registers based at `base`, and return the first register.
pub fn register_range(
    base: u8,
    count: u8,
    start: u8,
    len: usize,
) -> Result<u8, LP5024Error> {
    if len == 0 || start as usize + len > count as usize {
        return Err(LP5024Error::InputOutOfRange);
    }
    Ok(base + start)
}

/// Reject addresses past the reset register, the last one of the device.
pub fn check_register(register: u8) -> Result<u8, LP5024Error> {
    if register > LAST_REGISTER {
        return Err(LP5024Error::InputOutOfRange);
    }
    Ok(register)
}
