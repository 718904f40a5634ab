use core::fmt;

use thiserror::Error;

/// Identifies a wheel in motor errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    Left,
    Right,
}

impl fmt::Display for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wheel::Left => f.write_str("left"),
            Wheel::Right => f.write_str("right"),
        }
    }
}

/// The loop that ran out of attempts in [`Error::RetriesExhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOp {
    Write,
    Read,
}

impl fmt::Display for RetryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryOp::Write => f.write_str("write"),
            RetryOp::Read => f.write_str("read"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("no Finch found on the USB bus")]
    DeviceNotFound,

    #[error("failed to open the Finch: {0}")]
    OpenFailure(String),

    #[error("{wheel} wheel direction must be 0 (forward) or 1 (reverse), got {value}")]
    InvalidArgument { wheel: Wheel, value: u8 },

    #[error("HID write failed: {0}")]
    WriteFailure(String),

    #[error("HID read failed: {0}")]
    ReadFailure(String),

    #[error("{op} gave up after {attempts} attempts")]
    RetriesExhausted { op: RetryOp, attempts: u32 },

    #[error("session is closed")]
    InvalidState,
}

pub type Result<T> = core::result::Result<T, Error>;
