use std::io;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HostError>;
