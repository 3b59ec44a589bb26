//! Serial connection to the firmware's bluetooth link.

use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serialport::SerialPort;

use crate::error::Result;
use crate::frame::{Decoder, Frame};

const READ_TIMEOUT: Duration = Duration::from_secs(2);
// back-off when a read returns nothing without waiting for the timeout
const IDLE_BACKOFF: Duration = Duration::from_millis(10);

/// Names of the serial ports present on this machine
pub fn list_ports() -> Result<Vec<String>> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}

pub struct Link {
    port: Box<dyn SerialPort>,
    name: String,
}

impl Link {
    pub fn open(name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(name, baud_rate)
            .timeout(READ_TIMEOUT)
            .open()?;
        info!("connected to {name} at {baud_rate} baud");

        Ok(Self {
            port,
            name: name.to_string(),
        })
    }

    /// Collects frames until `duration` has elapsed.
    pub fn sample(&mut self, duration: Duration) -> Result<Vec<Frame>> {
        info!("sampling {} for {}s", self.name, duration.as_secs_f32());
        let frames = collect_frames(&mut *self.port, &self.name, duration)?;
        info!("sampling done, {} frames", frames.len());

        Ok(frames)
    }

    pub fn send(&mut self, text: &str) -> Result<()> {
        self.port.write_all(text.as_bytes())?;
        self.port.flush()?;
        info!("wrote {text:?} to {}", self.name);
        Ok(())
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        info!("port {} closed", self.name);
    }
}

/// Reads `reader` until `duration` has elapsed and decodes every frame seen.
/// Malformed frames are logged and dropped; timeouts and empty reads just
/// mean the device was quiet.
fn collect_frames<R: Read + ?Sized>(
    reader: &mut R,
    name: &str,
    duration: Duration,
) -> Result<Vec<Frame>> {
    let deadline = Instant::now() + duration;
    let mut decoder = Decoder::new();
    let mut frames = Vec::new();
    let mut buf = [0u8; 256];

    while Instant::now() < deadline {
        let n = match reader.read(&mut buf) {
            Ok(0) => {
                thread::sleep(IDLE_BACKOFF);
                continue;
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e.into()),
        };

        for result in decoder.extend(&buf[..n]) {
            match result {
                Ok(frame) => {
                    debug!("frame {frame}");
                    frames.push(frame);
                }
                Err(e) => warn!("{name}: dropping frame: {e}"),
            }
        }
    }

    Ok(frames)
}
