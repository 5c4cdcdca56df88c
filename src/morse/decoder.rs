//! Leading-sentinel Morse decoder.
//!
//! Each letter run is folded into an integer that starts at 1, so `.-`
//! becomes `0b101 = 5` while `-` alone is `0b11 = 3`.  The integer is then
//! looked up in the international Morse table (A–Z, 0–9).

use super::Symbol;
use crate::config::UNKNOWN_CHAR;
use crate::error::Error;
use heapless::String;

/// Longest run in the table (digits are five symbols). Anything longer
/// cannot match and is reported as unknown without growing the accumulator.
const MAX_RUN: u32 = 5;

/// Decoded characters awaiting handoff.
pub struct MessageBuffer<const M: usize> {
    text: String<M>,
}

impl<const M: usize> MessageBuffer<M> {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn push(&mut self, c: char) -> Result<(), Error> {
        self.text.push(c).map_err(|_| Error::MessageBufferFull)
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl<const M: usize> Default for MessageBuffer<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a leading-sentinel code to its character.
pub const fn letter_for_code(code: u32) -> Option<char> {
    let c = match code {
        5 => 'a',   // .-
        24 => 'b',  // -...
        26 => 'c',  // -.-.
        12 => 'd',  // -..
        2 => 'e',   // .
        18 => 'f',  // ..-.
        14 => 'g',  // --.
        16 => 'h',  // ....
        4 => 'i',   // ..
        23 => 'j',  // .---
        13 => 'k',  // -.-
        20 => 'l',  // .-..
        7 => 'm',   // --
        6 => 'n',   // -.
        15 => 'o',  // ---
        22 => 'p',  // .--.
        29 => 'q',  // --.-
        10 => 'r',  // .-.
        8 => 's',   // ...
        3 => 't',   // -
        9 => 'u',   // ..-
        17 => 'v',  // ...-
        11 => 'w',  // .--
        25 => 'x',  // -..-
        27 => 'y',  // -.--
        28 => 'z',  // --..
        63 => '0',  // -----
        47 => '1',  // .----
        39 => '2',  // ..---
        35 => '3',  // ...--
        33 => '4',  // ....-
        32 => '5',  // .....
        48 => '6',  // -....
        56 => '7',  // --...
        60 => '8',  // ---..
        62 => '9',  // ----.
        _ => return None,
    };
    Some(c)
}

/// Decode a terminated symbol sequence into `out`.
///
/// Stops at the first terminator that closes an empty run (the second half
/// of the end-of-message marker) or at the end of the slice.  Never fails:
/// unmatched runs become [`UNKNOWN_CHAR`], and characters that do not fit
/// in `out` are dropped.  Returns the number of characters appended.
pub fn decode<const M: usize>(symbols: &[Symbol], out: &mut MessageBuffer<M>) -> usize {
    let mut written = 0;
    let mut code: u32 = 1;
    let mut run: u32 = 0;

    for &symbol in symbols {
        match symbol.bit() {
            Some(bit) => {
                run += 1;
                if run <= MAX_RUN {
                    code = (code << 1) | bit;
                }
            }
            None => {
                if run == 0 {
                    break;
                }

                let letter = if run <= MAX_RUN {
                    letter_for_code(code)
                } else {
                    None
                };
                let c = match letter {
                    Some(c) => c,
                    None => {
                        warn!("unknown Morse pattern (code {}, {} symbols)", code, run);
                        UNKNOWN_CHAR
                    }
                };

                match out.push(c) {
                    Ok(()) => written += 1,
                    Err(_) => warn!("message buffer full - dropping '{}'", c),
                }

                code = 1;
                run = 0;
            }
        }
    }

    written
}
