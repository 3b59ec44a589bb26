#![deny(unsafe_code)]
#![no_std]

//! Register driver for up to two LIS3DH accelerometers sharing one I2C bus.
//!
//! The driver owns the bus, so register transactions to either device are
//! serialized through `&mut self`. Every operation is a single blocking
//! transaction (or, for samples, a fixed sequence of them) with no retries;
//! bus failures are handed straight back to the caller.

mod reg_map;
mod types;

use core::fmt;

use embedded_hal::i2c::{I2c, SevenBitAddress};

use reg_map::Register;
pub use types::{Acceleration, Axis, AxisSample, DeviceAddress, PowerMode, Status, Verified};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C bus error
    I2c(E),
    /// `WHO_AM_I` did not read back the LIS3DH identity
    IdentityMismatch { expected: u8, actual: u8 },
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "i2c bus error: {e:?}"),
            Error::IdentityMismatch { expected, actual } => write!(
                f,
                "unexpected WHO_AM_I value: expected {expected:#04x}, got {actual:#04x}"
            ),
        }
    }
}

#[derive(Debug)]
pub struct Lis3dh<I> {
    i2c: I,
}

impl<I, E> Lis3dh<I>
where
    I: I2c<SevenBitAddress, Error = E>,
{
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Gives the bus back
    pub fn release(self) -> I {
        self.i2c
    }

    /// Reads `WHO_AM_I` from `address` and checks it against the LIS3DH identity.
    pub fn identify(&mut self, address: DeviceAddress) -> Result<Verified, Error<E>> {
        let id = self.read_u8(address, Register::WhoAmI)?;

        if id != reg_map::WHO_AM_I_VALUE {
            Err(Error::IdentityMismatch {
                expected: reg_map::WHO_AM_I_VALUE,
                actual: id,
            })
        } else {
            Ok(Verified::new(address))
        }
    }

    /// Checks an already identified device again.
    ///
    /// The old handle is consumed, so after a mismatch or bus error there is
    /// nothing left to issue trusted operations with.
    ///
    /// ```compile_fail
    /// # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
    /// # use lis3dh::{DeviceAddress, Lis3dh, PowerMode};
    /// # let mut dev = Lis3dh::new(Mock::new(&[]));
    /// let device = dev.identify(DeviceAddress::Primary).unwrap();
    /// let _ = dev.reidentify(device);
    /// dev.set_power_mode(&device, PowerMode::Normal).unwrap();
    /// ```
    pub fn reidentify(&mut self, device: Verified) -> Result<Verified, Error<E>> {
        self.identify(device.address())
    }

    /// Writes the mode's pattern to `CTRL_REG1`. Nothing is read back.
    pub fn set_power_mode(&mut self, device: &Verified, mode: PowerMode) -> Result<(), Error<E>> {
        self.write_u8(device.address(), Register::CtrlReg1, mode.ctrl_reg1())
    }

    /// Sets BDU in `CTRL_REG4` so the output registers are not updated until
    /// both the low and high byte of a sample have been read.
    ///
    /// Issue this before [`read_axis`](Self::read_axis) whenever a torn sample
    /// would matter.
    pub fn enable_block_data_update(&mut self, device: &Verified) -> Result<(), Error<E>> {
        self.write_u8(device.address(), Register::CtrlReg4, reg_map::CTRL_REG4_BDU)
    }

    /// Enables the auxiliary ADC and routes the temperature sensor to ADC channel 3.
    pub fn enable_temperature_sensor(&mut self, device: &Verified) -> Result<(), Error<E>> {
        self.write_u8(device.address(), Register::TempCfg, reg_map::TEMP_CFG_ACTIVE)
    }

    /// Reads one axis, low byte first.
    pub fn read_axis(&mut self, device: &Verified, axis: Axis) -> Result<AxisSample, Error<E>> {
        let (low, high) = axis.registers();
        self.read_pair(device.address(), low, high)
    }

    /// Reads auxiliary ADC channel 3 (the temperature sensor once enabled).
    pub fn read_adc3(&mut self, device: &Verified) -> Result<AxisSample, Error<E>> {
        self.read_pair(device.address(), Register::OutAdc3L, Register::OutAdc3H)
    }

    /// Reads X, Y and Z in that order. The first failing read aborts the rest.
    pub fn read_acceleration(&mut self, device: &Verified) -> Result<Acceleration, Error<E>> {
        Ok(Acceleration {
            x: self.read_axis(device, Axis::X)?,
            y: self.read_axis(device, Axis::Y)?,
            z: self.read_axis(device, Axis::Z)?,
        })
    }

    /// Reads `STATUS_REG`. Axis reads never consult it on their own.
    pub fn read_status(&mut self, device: &Verified) -> Result<Status, Error<E>> {
        self.read_u8(device.address(), Register::Status).map(Status)
    }

    fn read_pair(
        &mut self,
        address: DeviceAddress,
        low: Register,
        high: Register,
    ) -> Result<AxisSample, Error<E>> {
        let low = self.read_u8(address, low)?;
        let high = self.read_u8(address, high)?;
        Ok(AxisSample::from_bytes(low, high))
    }

    /// Reads the byte from the register
    fn read_u8(&mut self, address: DeviceAddress, reg: Register) -> Result<u8, Error<E>> {
        let mut byte = [0; 1];
        self.i2c
            .write_read(address.addr(), &[reg.addr()], &mut byte)
            .map(|_| byte[0])
            .map_err(Error::I2c)
    }

    /// Writes value to the register
    fn write_u8(
        &mut self,
        address: DeviceAddress,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<E>> {
        self.i2c
            .write(address.addr(), &[reg.addr(), value])
            .map_err(Error::I2c)
    }
}
