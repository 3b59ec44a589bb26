use crate::reg_map::{self, Register};

/// 7-bit I2C address of one of the two accelerometers on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceAddress {
    /// SA0 tied low
    Primary,
    /// SA0 tied high
    Secondary,
}

impl DeviceAddress {
    pub const fn addr(self) -> u8 {
        match self {
            Self::Primary => reg_map::PRIMARY_ADDR,
            Self::Secondary => reg_map::SECONDARY_ADDR,
        }
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = ();

    fn try_from(value: u8) -> Result<DeviceAddress, ()> {
        match value {
            reg_map::PRIMARY_ADDR => Ok(DeviceAddress::Primary),
            reg_map::SECONDARY_ADDR => Ok(DeviceAddress::Secondary),
            _ => Err(()),
        }
    }
}

/// A device that answered `WHO_AM_I` correctly.
///
/// Only [`Lis3dh::identify`](crate::Lis3dh::identify) hands these out, and every
/// other register operation borrows one. It is neither `Copy` nor `Clone`:
/// [`Lis3dh::reidentify`](crate::Lis3dh::reidentify) takes it back, and a failed
/// check leaves the caller without a handle for that device.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Verified {
    address: DeviceAddress,
}

impl Verified {
    pub(crate) const fn new(address: DeviceAddress) -> Self {
        Self { address }
    }

    pub const fn address(&self) -> DeviceAddress {
        self.address
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    Off,
    Normal,
}

impl PowerMode {
    pub(crate) const fn ctrl_reg1(self) -> u8 {
        match self {
            PowerMode::Off => reg_map::CTRL_REG1_OFF,
            PowerMode::Normal => reg_map::CTRL_REG1_NORMAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Low and high output registers of the axis
    pub(crate) const fn registers(self) -> (Register, Register) {
        match self {
            Axis::X => (Register::OutXL, Register::OutXH),
            Axis::Y => (Register::OutYL, Register::OutYH),
            Axis::Z => (Register::OutZL, Register::OutZH),
        }
    }
}

/// Signed 16-bit output assembled from a `*_L`/`*_H` register pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample(pub i16);

impl AxisSample {
    pub const fn from_bytes(low: u8, high: u8) -> Self {
        Self(i16::from_le_bytes([low, high]))
    }
}

impl From<AxisSample> for i16 {
    fn from(sample: AxisSample) -> Self {
        sample.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: AxisSample,
    pub y: AxisSample,
    pub z: AxisSample,
}

/// Raw contents of `STATUS_REG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u8);

impl Status {
    /// New X, Y and Z data is available
    pub const fn xyz_data_available(&self) -> bool {
        self.0 & reg_map::STATUS_ZYXDA != 0
    }

    /// A new set of data overwrote the previous one before it was read
    pub const fn xyz_overrun(&self) -> bool {
        self.0 & reg_map::STATUS_ZYXOR != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address() {
        assert_eq!(DeviceAddress::Primary.addr(), 0x18);
        assert_eq!(DeviceAddress::Secondary.addr(), 0x19);
    }

    #[test]
    fn test_address_from_raw() {
        assert_eq!(DeviceAddress::try_from(0x18), Ok(DeviceAddress::Primary));
        assert_eq!(DeviceAddress::try_from(0x19), Ok(DeviceAddress::Secondary));
        assert_eq!(DeviceAddress::try_from(0x1A), Err(()));
        assert_eq!(DeviceAddress::try_from(0x00), Err(()));
    }

    #[test]
    fn test_power_mode_bits() {
        assert_eq!(PowerMode::Normal.ctrl_reg1(), 0x27);
        assert_eq!(PowerMode::Off.ctrl_reg1(), 0x07);
    }

    #[test]
    fn test_sample_composition() {
        assert_eq!(AxisSample::from_bytes(0x34, 0x12), AxisSample(0x1234));
        assert_eq!(AxisSample::from_bytes(0xFF, 0xFF), AxisSample(-1));
        assert_eq!(AxisSample::from_bytes(0x00, 0x80), AxisSample(i16::MIN));
        assert_eq!(AxisSample::from_bytes(0xFF, 0x7F), AxisSample(i16::MAX));
    }

    #[test]
    fn test_status_flags() {
        let status = Status(0b0000_1000);
        assert!(status.xyz_data_available());
        assert!(!status.xyz_overrun());

        let status = Status(0b1000_0000);
        assert!(!status.xyz_data_available());
        assert!(status.xyz_overrun());
    }
}
