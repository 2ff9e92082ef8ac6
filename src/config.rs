/// Base 7-bit I2C address, the two lowest bits come from the A1/A0 straps.
pub const BASE_ADDRESS: u8 = 0x28;

pub const DEVICE_CONFIG0_REGISTER: u8 = 0x00;
pub const DEVICE_CONFIG1_REGISTER: u8 = 0x01;
pub const LED_CONFIG0_REGISTER: u8 = 0x02;
pub const BANK_BRIGHTNESS_REGISTER: u8 = 0x03;
pub const BANK_A_COLOR_REGISTER: u8 = 0x04;
pub const BANK_B_COLOR_REGISTER: u8 = 0x05;
pub const BANK_C_COLOR_REGISTER: u8 = 0x06;
pub const RGB_LED_BRIGHTNESS_REGISTER_BASE: u8 = 0x07;
pub const LED_BRIGHTNESS_REGISTER_BASE: u8 = 0x0f;
pub const RESET_REGISTER: u8 = 0x27;

pub const LAST_REGISTER: u8 = RESET_REGISTER;

pub const RGB_LED_COUNT: u8 = 8;
pub const LED_COUNT: u8 = 24;

pub const BANK_COLOR_REGISTERS: [u8; 3] = [
    BANK_A_COLOR_REGISTER,
    BANK_B_COLOR_REGISTER,
    BANK_C_COLOR_REGISTER,
];

// Channel addressing is `base + index`, which only holds while every group
// is contiguous and the groups follow each other without gaps.
const _: () = {
    assert!(BANK_B_COLOR_REGISTER == BANK_A_COLOR_REGISTER + 1);
    assert!(BANK_C_COLOR_REGISTER == BANK_B_COLOR_REGISTER + 1);
    assert!(RGB_LED_BRIGHTNESS_REGISTER_BASE == BANK_C_COLOR_REGISTER + 1);
    assert!(
        LED_BRIGHTNESS_REGISTER_BASE
            == RGB_LED_BRIGHTNESS_REGISTER_BASE + RGB_LED_COUNT
    );
    assert!(RESET_REGISTER == LED_BRIGHTNESS_REGISTER_BASE + LED_COUNT);
    assert!(LED_COUNT == RGB_LED_COUNT * 3);
};

pub const DEVICE_CONFIG0_CHIP_ENABLE: u8 = 0b0100_0000;

pub const DEVICE_CONFIG1_LED_GLOBAL_OFF: u8 = 0b0000_0001;
pub const DEVICE_CONFIG1_MAX_CURRENT_OPTION: u8 = 0b0000_0010;
pub const DEVICE_CONFIG1_PWM_DITHERING_ENABLE: u8 = 0b0000_0100;
pub const DEVICE_CONFIG1_AUTO_INCREMENT_ENABLE: u8 = 0b0000_1000;
pub const DEVICE_CONFIG1_POWER_SAVE_ENABLE: u8 = 0b0001_0000;
pub const DEVICE_CONFIG1_LOG_SCALE_ENABLE: u8 = 0b0010_0000;

/// Writing this value to the reset register restores every register to its
/// power-on default.
pub const RESET_COMMAND: u8 = 0xff;

/// Output current ceiling per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum MaxCurrent {
    #[default]
    Current25p5mA,
    /// Only valid when `Vcc >= 3.3V`.
    Current35mA,
}

/// Contents of the device configuration register (DEVICE_CONFIG1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Config {
    /// Force every output off regardless of brightness settings.
    pub global_off: bool,
    pub max_current: MaxCurrent,
    /// Stretch PWM resolution by dithering.
    pub pwm_dithering: bool,
    /// Advance the register pointer after each byte of a multi-byte access.
    pub auto_increment: bool,
    /// Enter power save automatically when all outputs are off.
    pub power_save: bool,
    /// Logarithmic instead of linear dimming curve.
    pub log_scale: bool,
}

impl Default for Config {
    // Matches the register value after a reset (0x3c)
    fn default() -> Self {
        Self {
            global_off: false,
            max_current: MaxCurrent::Current25p5mA,
            pwm_dithering: true,
            auto_increment: true,
            power_save: true,
            log_scale: true,
        }
    }
}

impl Config {
    pub fn to_register(&self) -> u8 {
        let mut value = 0;

        if self.global_off {
            value |= DEVICE_CONFIG1_LED_GLOBAL_OFF;
        }
        if self.max_current == MaxCurrent::Current35mA {
            value |= DEVICE_CONFIG1_MAX_CURRENT_OPTION;
        }
        if self.pwm_dithering {
            value |= DEVICE_CONFIG1_PWM_DITHERING_ENABLE;
        }
        if self.auto_increment {
            value |= DEVICE_CONFIG1_AUTO_INCREMENT_ENABLE;
        }
        if self.power_save {
            value |= DEVICE_CONFIG1_POWER_SAVE_ENABLE;
        }
        if self.log_scale {
            value |= DEVICE_CONFIG1_LOG_SCALE_ENABLE;
        }

        value
    }

    /// Decodes a raw register value, reserved bits are ignored.
    pub fn from_register(value: u8) -> Self {
        Self {
            global_off: value & DEVICE_CONFIG1_LED_GLOBAL_OFF != 0,
            max_current: if value & DEVICE_CONFIG1_MAX_CURRENT_OPTION != 0 {
                MaxCurrent::Current35mA
            } else {
                MaxCurrent::Current25p5mA
            },
            pwm_dithering: value & DEVICE_CONFIG1_PWM_DITHERING_ENABLE != 0,
            auto_increment: value & DEVICE_CONFIG1_AUTO_INCREMENT_ENABLE != 0,
            power_save: value & DEVICE_CONFIG1_POWER_SAVE_ENABLE != 0,
            log_scale: value & DEVICE_CONFIG1_LOG_SCALE_ENABLE != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reset_value() {
        assert_eq!(Config::default().to_register(), 0x3c);
        assert_eq!(Config::from_register(0x3c), Config::default());
    }

    #[test]
    fn config_register_decoding_test() {
        let config = Config {
            global_off: true,
            max_current: MaxCurrent::Current35mA,
            pwm_dithering: false,
            auto_increment: true,
            power_save: false,
            log_scale: false,
        };

        assert_eq!(config.to_register(), 0b0000_1011);
        assert_eq!(Config::from_register(0b1100_1011), config);
    }
}
