//! Physical inputs - the Morse key and the two trigger buttons.
//!
//! ## Components
//!
//! - **Key**: wired to two pins, one armed for the press edge and one for
//!   the release edge (active-low with internal pull-up)
//! - **Send**: closes the message and hands it to the consumer loop
//! - **Read**: asks the consumer loop to read the server reply

pub mod buttons;

use defmt::Format;
use embassy_nrf::gpio::AnyPin;

/// Physical input events, in the order `select4` polls them.
#[derive(Clone, Copy, PartialEq, Eq, Format)]
pub enum KeyerEvent {
    PressStart,
    PressEnd,
    Send,
    Read,
}

/// GPIO pins feeding the keyer input task.
pub struct KeyerPins {
    pub press_start: AnyPin,
    pub press_end: AnyPin,
    pub send: AnyPin,
    pub read: AnyPin,
}
