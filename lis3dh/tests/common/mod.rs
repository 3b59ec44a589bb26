#![allow(dead_code)]

pub use lis3dh::{DeviceAddress, Lis3dh, Verified};

use embedded_hal_mock as hal;
pub use hal::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

pub const DEV1_ADDR: u8 = 0x18;
pub const DEV2_ADDR: u8 = 0x19;

pub fn trans_who_am_i(addr: u8) -> I2cTrans {
    I2cTrans::write_read(addr, vec![0x0F], vec![0x33])
}

pub fn trans_read(addr: u8, reg: u8, value: u8) -> I2cTrans {
    I2cTrans::write_read(addr, vec![reg], vec![value])
}

pub fn trans_write(addr: u8, reg: u8, value: u8) -> I2cTrans {
    I2cTrans::write(addr, vec![reg, value])
}

/// Builds a driver over `expectations`, prefixed with a successful identify of
/// `address`, and returns the resulting handle.
pub fn verified(
    address: DeviceAddress,
    expectations: &[I2cTrans],
) -> (Lis3dh<I2cMock>, Verified) {
    let mut all = vec![trans_who_am_i(address.addr())];
    all.extend_from_slice(expectations);

    let mut dev = Lis3dh::new(I2cMock::new(&all));
    let verified = dev.identify(address).unwrap();
    (dev, verified)
}
