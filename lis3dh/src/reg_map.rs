pub(crate) const PRIMARY_ADDR: u8 = 0x18;
pub(crate) const SECONDARY_ADDR: u8 = 0x19;

/// Value `WHO_AM_I` reads back on a LIS3DH
pub(crate) const WHO_AM_I_VALUE: u8 = 0x33;

// CTRL_REG1: 10 Hz, normal mode, X/Y/Z enabled
pub(crate) const CTRL_REG1_NORMAL: u8 = 0x27;
// CTRL_REG1: power-down, X/Y/Z enable bits kept
pub(crate) const CTRL_REG1_OFF: u8 = 0x07;

pub(crate) const CTRL_REG4_BDU: u8 = 0x80;

// ADC_EN | TEMP_EN
pub(crate) const TEMP_CFG_ACTIVE: u8 = 0xC0;

// STATUS_REG flags
pub(crate) const STATUS_ZYXDA: u8 = 1 << 3;
pub(crate) const STATUS_ZYXOR: u8 = 1 << 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Register {
    OutAdc3L = 0x0C,
    OutAdc3H = 0x0D,
    WhoAmI = 0x0F,
    TempCfg = 0x1F,
    CtrlReg1 = 0x20,
    CtrlReg4 = 0x23,
    Status = 0x27,
    OutXL = 0x28,
    OutXH = 0x29,
    OutYL = 0x2A,
    OutYH = 0x2B,
    OutZL = 0x2C,
    OutZH = 0x2D,
}

impl Register {
    pub(crate) const fn addr(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_addresses() {
        let table = [
            (Register::WhoAmI, 0x0F),
            (Register::Status, 0x27),
            (Register::CtrlReg1, 0x20),
            (Register::CtrlReg4, 0x23),
            (Register::TempCfg, 0x1F),
            (Register::OutAdc3L, 0x0C),
            (Register::OutAdc3H, 0x0D),
            (Register::OutXL, 0x28),
            (Register::OutXH, 0x29),
            (Register::OutYL, 0x2A),
            (Register::OutYH, 0x2B),
            (Register::OutZL, 0x2C),
            (Register::OutZH, 0x2D),
        ];

        for (reg, addr) in table {
            assert_eq!(reg.addr(), addr, "{reg:?}");
        }
    }
}
