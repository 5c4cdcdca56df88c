//! GPIO edge capture for the Morse key and trigger buttons.
//!
//! One async loop waits on all four edges at once and feeds each one,
//! timestamped with the embassy clock, into [`Capture`]. Debouncing and
//! press/trigger guards happen inside `Capture`, so no settle delay is
//! needed here.

use crate::ui::{KeyerEvent, KeyerPins};
use defmt::trace;
use embassy_futures::select::{select4, Either4};
use embassy_nrf::gpio::{Input, Pull};
use embassy_time::Instant;
use morse2ble::Capture;

/// Run the keyer input loop forever.
pub async fn keyer_input_task(pins: KeyerPins, mut capture: Capture<'static>) -> ! {
    let mut press_start = Input::new(pins.press_start, Pull::Up);
    let mut press_end = Input::new(pins.press_end, Pull::Up);
    let mut send = Input::new(pins.send, Pull::Up);
    let mut read = Input::new(pins.read, Pull::Up);

    loop {
        let event = match select4(
            press_start.wait_for_falling_edge(),
            press_end.wait_for_rising_edge(),
            send.wait_for_falling_edge(),
            read.wait_for_falling_edge(),
        )
        .await
        {
            Either4::First(()) => KeyerEvent::PressStart,
            Either4::Second(()) => KeyerEvent::PressEnd,
            Either4::Third(()) => KeyerEvent::Send,
            Either4::Fourth(()) => KeyerEvent::Read,
        };

        let now = Instant::now().as_micros();
        trace!("edge {} at {}us", event, now);

        match event {
            KeyerEvent::PressStart => capture.press_start(now),
            KeyerEvent::PressEnd => capture.press_end(now),
            KeyerEvent::Send => {
                capture.send_trigger(now);
            }
            KeyerEvent::Read => {
                capture.read_trigger(now);
            }
        }
    }
}
