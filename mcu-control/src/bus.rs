//! embedded-hal 1.0 view of the HAL's blocking I2C, which only implements the
//! 0.2 `Write`/`WriteRead` traits.

use core::fmt::Debug;

use embedded_hal::i2c::{self, ErrorKind, ErrorType, Operation, SevenBitAddress};
use embedded_hal_02::blocking::i2c::{Write, WriteRead};

#[derive(Debug)]
pub struct Bus<T>(T);

impl<T> Bus<T> {
    pub fn new(i2c: T) -> Self {
        Self(i2c)
    }
}

#[derive(Debug)]
pub enum BusError<E> {
    /// Error reported by the HAL
    I2c(E),
    /// Operation sequence other than a write or a write-then-read
    Unsupported,
}

impl<E: Debug> i2c::Error for BusError<E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl<T, E> ErrorType for Bus<T>
where
    T: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    type Error = BusError<E>;
}

impl<T, E> i2c::I2c<SevenBitAddress> for Bus<T>
where
    T: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        match operations {
            [Operation::Write(bytes)] => self.0.write(address, bytes).map_err(BusError::I2c),
            [Operation::Write(bytes), Operation::Read(buffer)] => self
                .0
                .write_read(address, bytes, buffer)
                .map_err(BusError::I2c),
            _ => Err(BusError::Unsupported),
        }
    }

    fn write(&mut self, address: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, bytes).map_err(BusError::I2c)
    }

    fn write_read(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, bytes, buffer).map_err(BusError::I2c)
    }
}
