//! CSV output for recorded frames.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::frame::Frame;

pub const HEADER: &str = "x1,y1,z1,x2,y2,z2";

/// `bluetooth_data_<unix seconds>.csv` in the working directory
pub fn default_path() -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    PathBuf::from(format!("bluetooth_data_{secs}.csv"))
}

pub fn write_csv<W: Write>(out: &mut W, frames: &[Frame]) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for frame in frames {
        writeln!(out, "{frame}")?;
    }
    out.flush()
}
