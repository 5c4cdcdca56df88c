//! Cross-context handoff between capture and the consumer loop.
//!
//! The capture side (key/trigger edge handlers) and the consumer side
//! (periodic tick that talks to BLE) never share a buffer:
//!
//! - symbols travel through a lock-free `heapless::spsc` queue, with a
//!   [`Captured::MessageEnd`] marker queued at each send trigger
//! - send/read requests are latched in [`HandoffFlags`]
//!
//! The consumer owns the symbol buffer, message buffer and decoder, so a
//! drain can never observe a half-written symbol.

pub mod capture;
pub mod dispatcher;
pub mod transport;


use core::sync::atomic::{AtomicBool, Ordering};

pub use capture::Capture;
pub use dispatcher::{DispatchStats, Dispatcher, TickReport};
pub use transport::Transport;

use crate::config::SYMBOL_QUEUE_LEN;
use crate::morse::Symbol;

/// One item on the capture → consumer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Captured {
    Symbol(Symbol),
    /// Send trigger: everything queued before it belongs to the message
    /// being sent, everything after it to the next one.
    MessageEnd,
}

/// Queue carrying captured symbols to the consumer.
pub type SymbolQueue = heapless::spsc::Queue<Captured, SYMBOL_QUEUE_LEN>;
pub type SymbolProducer<'a> = heapless::spsc::Producer<'a, Captured, SYMBOL_QUEUE_LEN>;
pub type SymbolConsumer<'a> = heapless::spsc::Consumer<'a, Captured, SYMBOL_QUEUE_LEN>;

/// Latched request flags. Set by capture, cleared by the consumer.
pub struct HandoffFlags {
    read_requested: AtomicBool,
    send_requested: AtomicBool,
}

impl HandoffFlags {
    pub const fn new() -> Self {
        Self {
            read_requested: AtomicBool::new(false),
            send_requested: AtomicBool::new(false),
        }
    }

    pub fn request_send(&self) {
        self.send_requested.store(true, Ordering::Release);
    }

    pub fn request_read(&self) {
        self.read_requested.store(true, Ordering::Release);
    }

    /// Clear the send flag, returning whether it was set.
    pub fn take_send(&self) -> bool {
        self.send_requested.swap(false, Ordering::AcqRel)
    }

    /// Clear the read flag, returning whether it was set.
    pub fn take_read(&self) -> bool {
        self.read_requested.swap(false, Ordering::AcqRel)
    }

    pub fn send_pending(&self) -> bool {
        self.send_requested.load(Ordering::Acquire)
    }

    pub fn read_pending(&self) -> bool {
        self.read_requested.load(Ordering::Acquire)
    }
}

impl Default for HandoffFlags {
    fn default() -> Self {
        Self::new()
    }
}
