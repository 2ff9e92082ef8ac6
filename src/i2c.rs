use crate::config::BASE_ADDRESS;
use crate::lp5024::LP5024;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error, I2c, Operation};

/// Level of the A1/A0 address straps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum AddressSelector {
    #[default]
    A1GndA0Gnd,
    A1GndA0Vdd,
    A1VddA0Gnd,
    A1VddA0Vdd,
}

impl AddressSelector {
    /// The 7-bit bus address of a device strapped this way.
    pub fn address(self) -> u8 {
        BASE_ADDRESS + self as u8
    }
}

/// Register access to one LP5024, one bus transaction per call.
///
/// Failures are reported as they come; retrying them is up to the driver,
/// which is why the error has to expose an
/// [`ErrorKind`](embedded_hal::i2c::ErrorKind).
pub trait RawDevice {
    type Error: Error;

    /// Write `data` to consecutive registers starting at `register`, relying
    /// on the auto increment of the register pointer.
    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error>;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Self::Error> {
        self.write(register, &[value])
    }
}

impl<BUS: I2c, D: DelayNs> LP5024<I2cAdapter<BUS>, D> {
    /// Create a new LP5024 driver
    /// # Arguments
    /// * `i2c` - The I2C bus to use
    /// * `selector` - How the address pins of the device are strapped
    /// * `delay` - Used to wait between retried bus transactions
    ///
    /// # Returns
    /// A new LP5024 driver
    pub fn new_with_i2c_bus(
        i2c: BUS,
        selector: AddressSelector,
        delay: D,
    ) -> Self {
        Self::new(I2cAdapter::new(i2c, selector), delay)
    }
}

/// [`RawDevice`] over an I2C bus, addressing the device selected by its
/// address straps.
pub struct I2cAdapter<BUS: I2c> {
    i2c: BUS,
    address: u8,
}

impl<BUS: I2c> I2cAdapter<BUS> {
    pub fn new(i2c: BUS, selector: AddressSelector) -> Self {
        Self {
            i2c,
            address: selector.address(),
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn into_inner(self) -> BUS {
        self.i2c
    }
}

impl<BUS: I2c> RawDevice for I2cAdapter<BUS> {
    type Error = BUS::Error;

    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), BUS::Error> {
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[register]), Operation::Write(data)],
        )
    }

    fn read_register(&mut self, register: u8) -> Result<u8, BUS::Error> {
        let mut buffer = [0; 1];

        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[register]), Operation::Read(&mut buffer)],
        )?;

        Ok(buffer[0])
    }
}
