//! Capture context: the four edge entry points.
//!
//! Every method runs to completion in bounded time, performs no I/O and
//! never blocks.  Rejected or refused input is logged and dropped.

use super::{Captured, HandoffFlags, SymbolProducer};
use crate::config::TimingConfig;
use crate::error::Error;
use crate::morse::{Debouncer, PressClassifier, Rejection};

/// Producer half of the engine.
pub struct Capture<'a> {
    classifier: PressClassifier,
    send_debounce: Debouncer,
    read_debounce: Debouncer,
    symbols: SymbolProducer<'a>,
    flags: &'a HandoffFlags,
    dropped: u32,
}

impl<'a> Capture<'a> {
    pub fn new(config: TimingConfig, symbols: SymbolProducer<'a>, flags: &'a HandoffFlags) -> Self {
        Self {
            classifier: PressClassifier::new(config),
            send_debounce: Debouncer::new(config.debounce_us),
            read_debounce: Debouncer::new(config.debounce_us),
            symbols,
            flags,
            dropped: 0,
        }
    }

    /// Key pressed at `now` (µs).
    pub fn press_start(&mut self, now: u64) {
        match self.classifier.press_start(now) {
            Ok(Some(separator)) => {
                debug!("pause closed letter");
                self.emit(Captured::Symbol(separator));
            }
            Ok(None) => {}
            Err(reason) => log_rejection("press-start", reason),
        }
    }

    /// Key released at `now` (µs).
    pub fn press_end(&mut self, now: u64) {
        match self.classifier.press_end(now) {
            Ok(symbol) => {
                debug!("captured {}", u8::from(symbol));
                self.emit(Captured::Symbol(symbol));
            }
            Err(reason) => log_rejection("press-end", reason),
        }
    }

    /// Send button at `now` (µs). Returns true when the request was latched.
    pub fn send_trigger(&mut self, now: u64) -> bool {
        if !self.trigger_allowed(now, TriggerKind::Send) {
            return false;
        }
        self.classifier.close_message();
        // Marker first: once the flag is seen, the boundary is already queued.
        self.emit(Captured::MessageEnd);
        self.flags.request_send();
        info!("send requested");
        true
    }

    /// Read button at `now` (µs). Returns true when the request was latched.
    pub fn read_trigger(&mut self, now: u64) -> bool {
        if !self.trigger_allowed(now, TriggerKind::Read) {
            return false;
        }
        self.flags.request_read();
        info!("read requested");
        true
    }

    pub fn press_in_progress(&self) -> bool {
        self.classifier.press_in_progress()
    }

    /// Symbols dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn trigger_allowed(&mut self, now: u64, kind: TriggerKind) -> bool {
        // A trigger in the middle of a press would cut the letter in half.
        if self.classifier.press_in_progress() {
            trace!("trigger ignored: press in progress");
            return false;
        }

        let debouncer = match kind {
            TriggerKind::Send => &mut self.send_debounce,
            TriggerKind::Read => &mut self.read_debounce,
        };
        if !debouncer.accept(now) {
            trace!("trigger ignored: bounce");
            return false;
        }
        true
    }

    fn emit(&mut self, item: Captured) {
        if self.symbols.enqueue(item).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("{} - dropping {} ({} dropped)", Error::SymbolQueueFull, item, self.dropped);
        }
    }
}

#[derive(Clone, Copy)]
enum TriggerKind {
    Send,
    Read,
}

fn log_rejection(edge: &str, reason: Rejection) {
    match reason {
        Rejection::Bounce => trace!("{} ignored: bounce", edge),
        Rejection::AlreadyPressed => trace!("{} ignored: already pressed", edge),
        Rejection::NotPressed => trace!("{} ignored: no press in progress", edge),
    }
}
