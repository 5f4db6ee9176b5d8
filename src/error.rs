//! Remote link error types

use core::fmt;

/// Errors raised while encoding or decoding status-update frames.
///
/// None of these ever reach the state machine: the crossing logs the error
/// and drops the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The message did not fit its fixed-size frame
    Encode,
    /// The frame could not be read back as a message
    Decode,
    /// The frame carried a message kind the crossing does not handle
    UnknownKind(i32),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Encode => write!(f, "frame encoding failed"),
            LinkError::Decode => write!(f, "frame decoding failed"),
            LinkError::UnknownKind(kind) => write!(f, "unknown message kind {}", kind),
        }
    }
}
