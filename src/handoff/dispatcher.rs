//! Consumer loop body.
//!
//! On every tick the dispatcher:
//! 1. absorbs queued symbols into its symbol buffer, up to the next
//!    message boundary
//! 2. services a send when a boundary was reached or the send flag is set
//!    (decode → write → reset both buffers)
//! 3. services a pending read
//!
//! Symbols queued after a boundary stay in the queue for the next message.
//! Each flag is cleared before its collaborator call so a slow call can't
//! be re-triggered by the next tick.

use super::{Captured, HandoffFlags, SymbolConsumer, Transport};
use crate::config::{MESSAGE_BUFFER_CAPACITY, SYMBOL_BUFFER_CAPACITY};
use crate::error::{Error, TransportError};
use crate::morse::{decode, MessageBuffer, SymbolBuffer};

/// Running counters, logged after each service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchStats {
    pub messages_sent: u32,
    pub write_failures: u32,
    pub reads_issued: u32,
    pub read_failures: u32,
    pub symbols_refused: u32,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Symbols moved from the queue into the buffer.
    pub absorbed: usize,
    /// `Some` when a send was serviced: the written length or the failure.
    pub write: Option<Result<usize, TransportError>>,
    /// `Some` when a read was serviced.
    pub read: Option<Result<(), TransportError>>,
}

/// Consumer half of the engine.
pub struct Dispatcher<'a> {
    incoming: SymbolConsumer<'a>,
    symbols: SymbolBuffer<SYMBOL_BUFFER_CAPACITY>,
    message: MessageBuffer<MESSAGE_BUFFER_CAPACITY>,
    flags: &'a HandoffFlags,
    stats: DispatchStats,
}

impl<'a> Dispatcher<'a> {
    pub fn new(incoming: SymbolConsumer<'a>, flags: &'a HandoffFlags) -> Self {
        Self {
            incoming,
            symbols: SymbolBuffer::new(),
            message: MessageBuffer::new(),
            flags,
            stats: DispatchStats::default(),
        }
    }

    /// One consumer loop iteration.
    pub async fn tick<T: Transport>(&mut self, transport: &mut T) -> TickReport {
        // Taken before absorbing: a set flag guarantees its marker is queued.
        let send_requested = self.flags.take_send();
        let mut report = TickReport {
            absorbed: self.absorb(),
            ..TickReport::default()
        };
        let boundary = self.take_boundary();

        if send_requested || boundary {
            report.write = self.service_send(transport).await;
        }

        if self.flags.take_read() {
            report.read = Some(self.service_read(transport).await);
        }

        report
    }

    /// Move queued symbols into the symbol buffer, stopping at (and
    /// leaving in place) the next message boundary.
    pub fn absorb(&mut self) -> usize {
        let mut moved = 0;
        while let Some(&Captured::Symbol(symbol)) = self.incoming.peek() {
            self.incoming.dequeue();
            match self.symbols.push(symbol) {
                Ok(()) => moved += 1,
                Err(e) => {
                    self.stats.symbols_refused = self.stats.symbols_refused.wrapping_add(1);
                    warn!("{} - refusing symbol until next send", e);
                }
            }
        }
        moved
    }

    async fn service_send<T: Transport>(
        &mut self,
        transport: &mut T,
    ) -> Option<Result<usize, TransportError>> {
        if !self.symbols.has_symbols() {
            info!("send requested with no input - nothing to write");
            self.reset();
            return None;
        }

        self.symbols.terminate();
        self.symbols.dump();
        let decoded = decode(self.symbols.as_slice(), &mut self.message);
        info!("decoded {} chars: {}", decoded, self.message.as_str());

        let len = self.message.len();
        let result = transport.request_write(self.message.as_bytes()).await;

        // Partial decode state never survives a send, whatever the outcome.
        self.reset();

        match result {
            Ok(()) => {
                self.stats.messages_sent = self.stats.messages_sent.wrapping_add(1);
                info!("write accepted ({} bytes) {}", len, self.stats);
                Some(Ok(len))
            }
            Err(e) => {
                self.stats.write_failures = self.stats.write_failures.wrapping_add(1);
                error!("write failed: {} {}", Error::from(e), self.stats);
                Some(Err(e))
            }
        }
    }

    async fn service_read<T: Transport>(&mut self, transport: &mut T) -> Result<(), TransportError> {
        let result = transport.request_read().await;
        match result {
            Ok(()) => {
                self.stats.reads_issued = self.stats.reads_issued.wrapping_add(1);
                info!("read issued {}", self.stats);
            }
            Err(e) => {
                self.stats.read_failures = self.stats.read_failures.wrapping_add(1);
                error!("read failed: {} {}", Error::from(e), self.stats);
            }
        }
        result
    }

    /// Consume a message boundary at the head of the queue.
    fn take_boundary(&mut self) -> bool {
        if self.incoming.peek() == Some(&Captured::MessageEnd) {
            self.incoming.dequeue();
            return true;
        }
        false
    }

    fn reset(&mut self) {
        self.symbols.clear();
        self.message.clear();
    }

    pub fn symbols(&self) -> &SymbolBuffer<SYMBOL_BUFFER_CAPACITY> {
        &self.symbols
    }

    pub fn message(&self) -> &MessageBuffer<MESSAGE_BUFFER_CAPACITY> {
        &self.message
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }
}
