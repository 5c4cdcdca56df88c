//! Morse symbol capture and decoding.
//!
//! Pipeline, leaf-first:
//!
//! 1. **Debounce** - filters spurious key edges and trigger re-fires.
//! 2. **Classifier** - turns an accepted press/release pair into a
//!    [`Symbol`] and closes letters after a long pause.
//! 3. **Symbol buffer** - bounded, append-only store of captured symbols.
//! 4. **Decoder** - leading-sentinel table lookup into a [`MessageBuffer`].

pub mod classifier;
pub mod debounce;
pub mod decoder;
pub mod symbol_buffer;

#[cfg(test)]
mod tests;

pub use classifier::{PressClassifier, TimingState};
pub use debounce::{Debouncer, Edge, EdgeFilter, Rejection};
pub use decoder::{decode, letter_for_code, MessageBuffer};
pub use symbol_buffer::SymbolBuffer;

/// One unit of Morse input, stored as a small integer (0, 1, 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Symbol {
    /// Short press, bit value 0.
    Dot = 0,
    /// Long press, bit value 1.
    Dash = 1,
    /// Terminates one letter run.
    LetterEnd = 2,
}

/// Two consecutive terminators close the whole message.
pub const MESSAGE_END: [Symbol; 2] = [Symbol::LetterEnd, Symbol::LetterEnd];

impl Symbol {
    /// Bit contributed to the letter accumulator, `None` for terminators.
    pub const fn bit(self) -> Option<u32> {
        match self {
            Symbol::Dot => Some(0),
            Symbol::Dash => Some(1),
            Symbol::LetterEnd => None,
        }
    }

    pub const fn is_terminator(self) -> bool {
        matches!(self, Symbol::LetterEnd)
    }
}

impl From<Symbol> for u8 {
    fn from(s: Symbol) -> u8 {
        s as u8
    }
}

impl TryFrom<u8> for Symbol {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Symbol::Dot),
            1 => Ok(Symbol::Dash),
            2 => Ok(Symbol::LetterEnd),
            other => Err(other),
        }
    }
}
