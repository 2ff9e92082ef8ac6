//! Color values and the HSB to RGB conversion.

use crate::lp5024::LP5024Error;

use libm::{fabsf, fmodf};

/// 8-bit brightness per color component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self { red, green, blue }
    }
}

/// Hue in degrees `[0, 360)`, saturation and brightness in percent
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Hsb {
    pub const fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Check every component against its domain. NaN is never valid.
    pub fn validate(&self) -> Result<(), LP5024Error> {
        let hue_valid = self.hue >= 0.0 && self.hue < 360.0;
        let saturation_valid =
            self.saturation >= 0.0 && self.saturation <= 100.0;
        let brightness_valid =
            self.brightness >= 0.0 && self.brightness <= 100.0;

        if hue_valid && saturation_valid && brightness_valid {
            Ok(())
        } else {
            Err(LP5024Error::InputOutOfRange)
        }
    }

    /// Validate and convert in one step.
    pub fn to_rgb(&self) -> Result<Rgb, LP5024Error> {
        self.validate()?;
        Ok(hsb_to_rgb(self.hue, self.saturation, self.brightness))
    }
}

/// Convert hue/saturation/brightness to 8-bit RGB.
///
/// Inputs are expected inside their documented domains; see
/// [`Hsb::validate`]. Components are truncated, not rounded.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb {
    let value = brightness / 100.0;
    let chroma = saturation / 100.0 * value;
    let m = value - chroma;
    let x = chroma * (1.0 - fabsf(fmodf(hue / 60.0, 2.0) - 1.0));

    let (r, g, b) = match hue {
        h if h < 60.0 => (chroma, x, 0.0),
        h if h < 120.0 => (x, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, x),
        h if h < 240.0 => (0.0, x, chroma),
        h if h < 300.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb {
        red: to_byte(r + m),
        green: to_byte(g + m),
        blue: to_byte(b + m),
    }
}

// `as` saturates, so float noise just above 1.0 still yields 255
fn to_byte(component: f32) -> u8 {
    (component * 255.0) as u8
}

/// Order in which the color components are wired to the three outputs of an
/// RGB LED (or to bank A, B and C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Bgr,
    Brg,
}

impl ColorOrder {
    /// Components in output slot order, first slot first.
    pub fn arrange(self, color: Rgb) -> [u8; 3] {
        let Rgb { red, green, blue } = color;

        match self {
            ColorOrder::Rgb => [red, green, blue],
            ColorOrder::Rbg => [red, blue, green],
            ColorOrder::Grb => [green, red, blue],
            ColorOrder::Gbr => [green, blue, red],
            ColorOrder::Bgr => [blue, green, red],
            ColorOrder::Brg => [blue, red, green],
        }
    }
}

impl TryFrom<u8> for ColorOrder {
    type Error = LP5024Error;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(ColorOrder::Rgb),
            1 => Ok(ColorOrder::Rbg),
            2 => Ok(ColorOrder::Grb),
            3 => Ok(ColorOrder::Gbr),
            4 => Ok(ColorOrder::Bgr),
            5 => Ok(ColorOrder::Brg),
            _ => Err(LP5024Error::InputOutOfRange),
        }
    }
}
