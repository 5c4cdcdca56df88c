//! Unified error type for morse2ble.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Capture
    /// Symbol buffer reached its usable capacity (`N - 2`).
    SymbolBufferFull,

    /// The capture → consumer queue had no free slot.
    SymbolQueueFull,

    // Decode
    /// Message buffer is full; further characters are dropped.
    MessageBufferFull,

    // Transport
    /// The BLE collaborator rejected a read or write request.
    Transport(TransportError),
}

/// Failure reported by the read/write collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Non-zero status code returned by the stack.
    Status(u32),
    /// No connection to the peer.
    NotConnected,
}

/// Map a raw stack status code (0 = accepted) to a `Result`.
pub fn check_status(code: u32) -> Result<(), TransportError> {
    match code {
        0 => Ok(()),
        c => Err(TransportError::Status(c)),
    }
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}
