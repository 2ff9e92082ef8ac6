use crate::addressing::*;
use crate::color::{ColorOrder, Hsb, Rgb};
use crate::config::*;
use crate::i2c::RawDevice;
use crate::transaction::{merge_bits, with_retry, RetryPolicy};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum LP5024Error {
    /// An argument was outside of its domain, nothing was sent to the device.
    InputOutOfRange,
    /// The bus stayed busy for every attempt, holds the last failure seen.
    Busy(ErrorKind),
    /// The bus reported a failure that retrying cannot fix.
    Fatal(ErrorKind),
}

impl Error for LP5024Error {
    fn kind(&self) -> ErrorKind {
        match self {
            LP5024Error::Busy(kind) | LP5024Error::Fatal(kind) => *kind,
            LP5024Error::InputOutOfRange => ErrorKind::Other,
        }
    }
}

impl core::fmt::Display for LP5024Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LP5024Error::InputOutOfRange => write!(f, "input out of range"),
            LP5024Error::Busy(kind) => write!(f, "bus busy: {}", kind),
            LP5024Error::Fatal(kind) => write!(f, "bus failure: {}", kind),
        }
    }
}

/// Driver for one LP5024.
///
/// The driver keeps no copy of the device registers: every partial update
/// reads the register from the device first. Operations touching several
/// registers are not atomic, after an error the device state is unknown.
pub struct LP5024<DEV, D> {
    device: DEV,
    delay: D,
    retry: RetryPolicy,
}

// General implementation
impl<DEV, D> LP5024<DEV, D> {
    /// Create a new LP5024 driver
    /// # Arguments
    /// * `device` - Register access to the device
    /// * `delay` - Used to wait between retried bus transactions
    ///
    /// # Returns
    /// A new LP5024 driver using the default [`RetryPolicy`]
    pub fn new(device: DEV, delay: D) -> Self {
        Self {
            device,
            delay,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn into_inner(self) -> DEV {
        self.device
    }

    pub fn inner(&self) -> &DEV {
        &self.device
    }

    pub fn inner_mut(&mut self) -> &mut DEV {
        &mut self.device
    }

    /// Give back the device and the delay.
    pub fn release(self) -> (DEV, D) {
        (self.device, self.delay)
    }
}

impl<DEV: RawDevice, D: DelayNs> LP5024<DEV, D> {
    fn write_retrying(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), LP5024Error> {
        with_retry(&self.retry, &mut self.delay, || {
            self.device.write(register, data)
        })
    }

    fn write_register_retrying(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), LP5024Error> {
        with_retry(&self.retry, &mut self.delay, || {
            self.device.write_register(register, value)
        })
    }

    fn read_register_retrying(
        &mut self,
        register: u8,
    ) -> Result<u8, LP5024Error> {
        with_retry(&self.retry, &mut self.delay, || {
            self.device.read_register(register)
        })
    }

    /// Read-modify-write of the bits in `mask`, `value` is right-aligned.
    /// The write is only attempted once the read succeeded.
    fn update_bits(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), LP5024Error> {
        let current = self.read_register_retrying(register)?;
        self.write_register_retrying(register, merge_bits(current, mask, value))
    }

    fn write_slots(
        &mut self,
        registers: [u8; 3],
        values: [u8; 3],
    ) -> Result<(), LP5024Error> {
        for (register, value) in registers.into_iter().zip(values) {
            self.write_register_retrying(register, value)?;
        }
        Ok(())
    }

    /// Read any register of the device
    ///
    /// # Arguments
    /// * `register` - Register address, at most 0x27
    pub fn read_register(&mut self, register: u8) -> Result<u8, LP5024Error> {
        let register = check_register(register)?;
        self.read_register_retrying(register)
    }

    /// Write any register of the device
    ///
    /// # Arguments
    /// * `register` - Register address, at most 0x27
    /// * `value` - The new register value
    pub fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), LP5024Error> {
        let register = check_register(register)?;
        self.write_register_retrying(register, value)
    }

    /// Reset every register to its power-on default.
    pub fn reset(&mut self) -> Result<(), LP5024Error> {
        self.write_register_retrying(RESET_REGISTER, RESET_COMMAND)
    }

    /// Initialize the device
    ///
    /// Resets the device, enables it and writes `config` to the
    /// configuration register.
    ///
    /// # Returns
    /// * Ok(()) if the device was initialized successfully
    /// * Err(LP5024Error) of the first step that failed
    pub fn initialize(&mut self, config: &Config) -> Result<(), LP5024Error> {
        self.reset()?;
        self.enable(true)?;
        self.configure(config)
    }

    /// Enable or disable the device
    ///
    /// # Arguments
    /// * `enable` - Whether the outputs are driven at all
    ///
    /// # Returns
    /// * Ok(()) if the enable bit was updated successfully
    pub fn enable(&mut self, enable: bool) -> Result<(), LP5024Error> {
        self.update_bits(
            DEVICE_CONFIG0_REGISTER,
            DEVICE_CONFIG0_CHIP_ENABLE,
            enable as u8,
        )
    }

    /// Overwrite the whole configuration register.
    pub fn configure(&mut self, config: &Config) -> Result<(), LP5024Error> {
        let value = config.to_register();
        self.write_register_retrying(DEVICE_CONFIG1_REGISTER, value)
    }

    /// Read back the configuration register.
    pub fn read_config(&mut self) -> Result<Config, LP5024Error> {
        let value = self.read_register_retrying(DEVICE_CONFIG1_REGISTER)?;
        Ok(Config::from_register(value))
    }

    /// Turn all outputs off, or let them follow their brightness settings
    /// again.
    pub fn set_led_global_off(&mut self, off: bool) -> Result<(), LP5024Error> {
        self.update_bits(
            DEVICE_CONFIG1_REGISTER,
            DEVICE_CONFIG1_LED_GLOBAL_OFF,
            off as u8,
        )
    }

    pub fn set_max_current(
        &mut self,
        current: MaxCurrent,
    ) -> Result<(), LP5024Error> {
        self.update_bits(
            DEVICE_CONFIG1_REGISTER,
            DEVICE_CONFIG1_MAX_CURRENT_OPTION,
            (current == MaxCurrent::Current35mA) as u8,
        )
    }

    pub fn set_pwm_dithering(
        &mut self,
        enable: bool,
    ) -> Result<(), LP5024Error> {
        self.update_bits(
            DEVICE_CONFIG1_REGISTER,
            DEVICE_CONFIG1_PWM_DITHERING_ENABLE,
            enable as u8,
        )
    }

    /// Auto increment has to stay enabled for the multi-register writes
    /// ([`Self::write_led_brightness`], [`Self::write_rgb_led_brightness`]).
    pub fn set_auto_increment(
        &mut self,
        enable: bool,
    ) -> Result<(), LP5024Error> {
        self.update_bits(
            DEVICE_CONFIG1_REGISTER,
            DEVICE_CONFIG1_AUTO_INCREMENT_ENABLE,
            enable as u8,
        )
    }

    pub fn set_auto_power_save(
        &mut self,
        enable: bool,
    ) -> Result<(), LP5024Error> {
        self.update_bits(
            DEVICE_CONFIG1_REGISTER,
            DEVICE_CONFIG1_POWER_SAVE_ENABLE,
            enable as u8,
        )
    }

    /// Select the logarithmic (`true`) or linear dimming curve.
    pub fn set_log_scale(&mut self, enable: bool) -> Result<(), LP5024Error> {
        self.update_bits(
            DEVICE_CONFIG1_REGISTER,
            DEVICE_CONFIG1_LOG_SCALE_ENABLE,
            enable as u8,
        )
    }

    /// Hand an RGB LED over to the bank registers, or back to its own
    /// registers
    ///
    /// # Arguments
    /// * `rgb_led` - The RGB LED, 0 to 7
    /// * `bank` - `true` if the LED follows the bank registers
    ///
    /// # Returns
    /// * Ok(()) if the LED configuration register was updated successfully
    /// * Err(LP5024Error::InputOutOfRange) if the LED does not exist
    pub fn set_bank_control(
        &mut self,
        rgb_led: u8,
        bank: bool,
    ) -> Result<(), LP5024Error> {
        let mask = bank_enable_mask(rgb_led)?;
        self.update_bits(LED_CONFIG0_REGISTER, mask, bank as u8)
    }

    /// Brightness shared by every RGB LED under bank control.
    pub fn set_total_brightness(
        &mut self,
        brightness: u8,
    ) -> Result<(), LP5024Error> {
        self.write_register_retrying(BANK_BRIGHTNESS_REGISTER, brightness)
    }

    /// Set the brightness of a single RGB LED
    ///
    /// # Arguments
    /// * `rgb_led` - The RGB LED, 0 to 7
    /// * `brightness` - The new brightness
    pub fn set_rgb_led_brightness(
        &mut self,
        rgb_led: u8,
        brightness: u8,
    ) -> Result<(), LP5024Error> {
        let register = rgb_led_brightness_register(rgb_led)?;
        self.write_register_retrying(register, brightness)
    }

    /// Set the brightness of a single output
    ///
    /// # Arguments
    /// * `led` - The output, 0 to 23
    /// * `brightness` - The new brightness
    pub fn set_led_brightness(
        &mut self,
        led: u8,
        brightness: u8,
    ) -> Result<(), LP5024Error> {
        let register = led_brightness_register(led)?;
        self.write_register_retrying(register, brightness)
    }

    /// Sets the brightness of consecutive outputs in one transaction,
    /// starting from a specific output.
    ///
    /// # Arguments
    /// * `start` - The first output to update
    /// * `brightness` - The new brightness of the outputs, one byte each
    ///
    /// # Returns
    /// * Ok(()) if the brightness was set successfully
    /// * Err(LP5024Error::InputOutOfRange) if the range leaves the 24 outputs
    pub fn write_led_brightness(
        &mut self,
        start: u8,
        brightness: &[u8],
    ) -> Result<(), LP5024Error> {
        let register = register_range(
            LED_BRIGHTNESS_REGISTER_BASE,
            LED_COUNT,
            start,
            brightness.len(),
        )?;
        self.write_retrying(register, brightness)
    }

    /// Same as [`Self::write_led_brightness`] for the RGB LED brightness
    /// registers.
    pub fn write_rgb_led_brightness(
        &mut self,
        start: u8,
        brightness: &[u8],
    ) -> Result<(), LP5024Error> {
        let register = register_range(
            RGB_LED_BRIGHTNESS_REGISTER_BASE,
            RGB_LED_COUNT,
            start,
            brightness.len(),
        )?;
        self.write_retrying(register, brightness)
    }

    /// Set the color of the banks
    ///
    /// The components are spread over bank A, B and C following `order`.
    /// Stops at the first bank that could not be written.
    pub fn set_total_color_rgb(
        &mut self,
        order: ColorOrder,
        color: Rgb,
    ) -> Result<(), LP5024Error> {
        self.write_slots(BANK_COLOR_REGISTERS, order.arrange(color))
    }

    pub fn set_total_color_hsb(
        &mut self,
        order: ColorOrder,
        color: Hsb,
    ) -> Result<(), LP5024Error> {
        let color = color.to_rgb()?;
        self.set_total_color_rgb(order, color)
    }

    /// Set the color of one RGB LED
    ///
    /// # Arguments
    /// * `order` - How the LED is wired to its three outputs
    /// * `rgb_led` - The RGB LED, 0 to 7
    /// * `color` - The new color
    ///
    /// # Returns
    /// * Ok(()) if all three outputs were written
    /// * Err(LP5024Error) of the first output that failed, later outputs are
    ///   left untouched
    pub fn set_rgb_led_color_rgb(
        &mut self,
        order: ColorOrder,
        rgb_led: u8,
        color: Rgb,
    ) -> Result<(), LP5024Error> {
        let registers = rgb_led_color_registers(rgb_led)?;
        self.write_slots(registers, order.arrange(color))
    }

    pub fn set_rgb_led_color_hsb(
        &mut self,
        order: ColorOrder,
        rgb_led: u8,
        color: Hsb,
    ) -> Result<(), LP5024Error> {
        let registers = rgb_led_color_registers(rgb_led)?;
        let color = color.to_rgb()?;
        self.write_slots(registers, order.arrange(color))
    }
}
