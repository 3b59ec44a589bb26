//! Decoder for the `S,x1,y1,z1,x2,y2,z2E` frames sent by the firmware.

use std::fmt;

use accel_link::{END, FIELDS, MAX_FRAME_LEN, START};

/// One decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame(pub [i16; FIELDS]);

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x1, y1, z1, x2, y2, z2] = self.0;
        write!(f, "{x1},{y1},{z1},{x2},{y2},{z2}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("frame longer than {} bytes", MAX_FRAME_LEN)]
    TooLong,

    #[error("expected {} fields, got {}", FIELDS, .0)]
    FieldCount(usize),

    #[error("invalid field {0:?}")]
    InvalidField(String),
}

#[derive(Debug, Default)]
enum State {
    /// Discarding bytes until the next start marker
    #[default]
    Idle,
    InFrame(Vec<u8>),
}

/// Byte-at-a-time frame decoder.
///
/// Anything outside `S…E` (banners, line endings, noise) is skipped. A frame
/// that cannot be parsed is reported once and decoding picks up again at the
/// next `S`.
#[derive(Debug, Default)]
pub struct Decoder {
    state: State,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte. Returns a result whenever a frame ends.
    pub fn push(&mut self, byte: u8) -> Option<Result<Frame, FrameError>> {
        match &mut self.state {
            State::Idle => {
                if byte == START {
                    self.state = State::InFrame(Vec::with_capacity(MAX_FRAME_LEN));
                }
                None
            }
            State::InFrame(body) => match byte {
                END => {
                    let body = std::mem::take(body);
                    self.state = State::Idle;
                    Some(parse(&body))
                }
                // a fresh start marker abandons the partial frame
                START => {
                    body.clear();
                    None
                }
                _ if body.len() >= MAX_FRAME_LEN => {
                    self.state = State::Idle;
                    Some(Err(FrameError::TooLong))
                }
                _ => {
                    body.push(byte);
                    None
                }
            },
        }
    }

    /// Feeds a chunk and collects every frame that ended inside it.
    pub fn extend(&mut self, bytes: &[u8]) -> Vec<Result<Frame, FrameError>> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }
}

/// Parses the bytes between the markers: `,v1,v2,…,v6`
fn parse(body: &[u8]) -> Result<Frame, FrameError> {
    let text = String::from_utf8_lossy(body);
    let fields = text
        .strip_prefix(',')
        .ok_or_else(|| FrameError::InvalidField(text.to_string()))?;

    let parts: Vec<&str> = fields.split(',').collect();
    if parts.len() != FIELDS {
        return Err(FrameError::FieldCount(parts.len()));
    }

    let mut values = [0i16; FIELDS];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .trim()
            .parse()
            .map_err(|_| FrameError::InvalidField(part.to_string()))?;
    }

    Ok(Frame(values))
}
