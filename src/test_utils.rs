use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{
    Error, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress,
};

#[derive(Debug)]
pub struct FakeI2cError(pub ErrorKind);

impl Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Emulates the register file of a device with an auto-incrementing
/// register pointer. Every byte written on the bus, register pointers
/// included, is appended to `write_data`.
pub struct FakeI2cBus<const N: usize> {
    pub registers: [u8; 256],
    pub write_data: heapless::Vec<u8, N>,
    pub transactions: usize,
    pub last_address: Option<SevenBitAddress>,
    outcomes: heapless::Deque<Option<ErrorKind>, 16>,
    always_fail: Option<ErrorKind>,
}

impl<const N: usize> ErrorType for FakeI2cBus<N> {
    type Error = FakeI2cError;
}

impl<const N: usize> FakeI2cBus<N> {
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            write_data: heapless::Vec::new(),
            transactions: 0,
            last_address: None,
            outcomes: heapless::Deque::new(),
            always_fail: None,
        }
    }

    pub fn new_with_registers(initial: &[(u8, u8)]) -> Self {
        let mut bus = Self::new();
        for &(register, value) in initial {
            bus.registers[register as usize] = value;
        }
        bus
    }

    /// Queue the outcome of the next transactions, `None` succeeds.
    pub fn script(&mut self, outcomes: &[Option<ErrorKind>]) {
        for outcome in outcomes {
            self.outcomes.push_back(*outcome).unwrap();
        }
    }

    pub fn fail_always(&mut self, kind: ErrorKind) {
        self.always_fail = Some(kind);
    }

    pub fn write_data_as_ref(&self) -> &[u8] {
        self.write_data.as_slice()
    }
}

impl<const N: usize> I2c for FakeI2cBus<N> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transactions += 1;
        self.last_address = Some(address);

        if let Some(kind) = self.always_fail {
            return Err(FakeI2cError(kind));
        }
        if let Some(Some(kind)) = self.outcomes.pop_front() {
            return Err(FakeI2cError(kind));
        }

        let mut pointer: Option<u8> = None;
        for operation in operations {
            match operation {
                Operation::Write(data) => {
                    for &byte in data.iter() {
                        self.write_data.push(byte).unwrap();
                        match pointer {
                            None => pointer = Some(byte),
                            Some(register) => {
                                self.registers[register as usize] = byte;
                                pointer = Some(register.wrapping_add(1));
                            }
                        }
                    }
                }
                Operation::Read(buffer) => {
                    let mut register = pointer.unwrap_or(0);
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[register as usize];
                        register = register.wrapping_add(1);
                    }
                    pointer = Some(register);
                }
            }
        }

        Ok(())
    }
}

/// Records every requested delay instead of waiting.
pub struct FakeDelay {
    pub delays_ms: heapless::Vec<u32, 32>,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self {
            delays_ms: heapless::Vec::new(),
        }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _ns: u32) {
        panic!("the driver only waits in whole milliseconds");
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms).unwrap();
    }
}
