#![deny(unsafe_code)]
#![no_std]

//! Text written by the board on its serial links.
//!
//! Each sample period produces one `S,x1,y1,z1,x2,y2,z2E` frame on the
//! bluetooth link, with no line ending, and one `Count = N\r\n` line on the
//! debug link.

use core::fmt::{self, Write};

use heapless::String;
use lis3dh::Acceleration;

/// Start-of-frame marker
pub const START: u8 = b'S';
/// End-of-frame marker
pub const END: u8 = b'E';
/// Values per frame: X, Y, Z of both accelerometers
pub const FIELDS: usize = 6;
/// Upper bound on a frame, markers included. The longest real frame is
/// `S` + 6 × `,-32768` + `E`.
pub const MAX_FRAME_LEN: usize = 64;

pub type FrameBuf = String<MAX_FRAME_LEN>;

/// Formats one frame into `buf`, replacing its contents.
pub fn encode(buf: &mut FrameBuf, first: &Acceleration, second: &Acceleration) -> fmt::Result {
    buf.clear();
    buf.write_char(START as char)?;
    for sample in [first.x, first.y, first.z, second.x, second.y, second.z] {
        write!(buf, ",{}", sample.0)?;
    }
    buf.write_char(END as char)
}

/// Wrapping counter printed on the debug link once per period.
#[derive(Debug, Default)]
pub struct Heartbeat {
    count: u8,
}

impl Heartbeat {
    pub fn beat(&mut self, out: &mut impl Write) -> fmt::Result {
        write!(out, "Count = {}\r\n", self.count)?;
        self.count = self.count.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lis3dh::AxisSample;

    fn acceleration(x: i16, y: i16, z: i16) -> Acceleration {
        Acceleration {
            x: AxisSample(x),
            y: AxisSample(y),
            z: AxisSample(z),
        }
    }

    #[test]
    fn test_encode() {
        let mut buf = FrameBuf::new();
        encode(&mut buf, &acceleration(16, -16, 16384), &acceleration(0, 1, -1)).unwrap();
        assert_eq!(buf.as_str(), "S,16,-16,16384,0,1,-1E");
    }

    #[test]
    fn test_longest_frame_fits() {
        let mut buf = FrameBuf::new();
        let min = acceleration(i16::MIN, i16::MIN, i16::MIN);
        encode(&mut buf, &min, &min).unwrap();
        assert_eq!(buf.as_str(), "S,-32768,-32768,-32768,-32768,-32768,-32768E");
        assert!(buf.len() <= MAX_FRAME_LEN);
    }

    #[test]
    fn test_encode_replaces_previous_frame() {
        let mut buf = FrameBuf::new();
        encode(&mut buf, &acceleration(1, 2, 3), &acceleration(4, 5, 6)).unwrap();
        encode(&mut buf, &acceleration(0, 0, 0), &acceleration(0, 0, 0)).unwrap();
        assert_eq!(buf.as_str(), "S,0,0,0,0,0,0E");
    }

    #[test]
    fn test_heartbeat_counts() {
        let mut heartbeat = Heartbeat::default();
        let mut out: String<64> = String::new();
        heartbeat.beat(&mut out).unwrap();
        heartbeat.beat(&mut out).unwrap();
        assert_eq!(out.as_str(), "Count = 0\r\nCount = 1\r\n");
    }

    #[test]
    fn test_heartbeat_wraps() {
        let mut heartbeat = Heartbeat { count: 255 };
        let mut out: String<64> = String::new();
        heartbeat.beat(&mut out).unwrap();
        heartbeat.beat(&mut out).unwrap();
        assert_eq!(out.as_str(), "Count = 255\r\nCount = 0\r\n");
    }
}
