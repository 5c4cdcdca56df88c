//! Bounded, append-only symbol store owned by the consumer context.

use super::{Symbol, MESSAGE_END};
use crate::error::Error;
use heapless::Vec;

/// Fixed-capacity symbol sequence.
///
/// Capture appends stop at `N - 2`; the two reserved slots always fit the
/// end-of-message marker written by [`SymbolBuffer::terminate`].
pub struct SymbolBuffer<const N: usize> {
    symbols: Vec<Symbol, N>,
}

impl<const N: usize> SymbolBuffer<N> {
    /// Usable capacity for captured symbols.
    pub const LIMIT: usize = N - 2;

    pub const fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// Append a captured symbol, refusing once `LIMIT` is reached.
    pub fn push(&mut self, symbol: Symbol) -> Result<(), Error> {
        if self.symbols.len() >= Self::LIMIT {
            return Err(Error::SymbolBufferFull);
        }
        self.symbols
            .push(symbol)
            .map_err(|_| Error::SymbolBufferFull)
    }

    /// Append the double terminator. Always fits thanks to the reservation.
    pub fn terminate(&mut self) {
        for symbol in MESSAGE_END {
            let _ = self.symbols.push(symbol);
        }
    }

    /// True once any dot or dash has been captured.
    pub fn has_symbols(&self) -> bool {
        self.symbols.iter().any(|s| !s.is_terminator())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    /// Log the raw buffer contents at debug level.
    pub fn dump(&self) {
        for (i, symbol) in self.symbols.iter().enumerate() {
            debug!("symbol buffer[{}]: {}", i, u8::from(*symbol));
        }
    }
}

impl<const N: usize> Default for SymbolBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
