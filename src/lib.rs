//! Host-testable library interface for morse2ble.
//!
//! Holds the pure Morse capture / decode / handoff logic so it can be
//! tested on the host (no embedded hardware required).
//!
//! Usage: `cargo test` or `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and adds the Embassy / SoftDevice tasks on top of this crate.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod config;
pub mod error;
pub mod handoff;
pub mod morse;

pub use config::TimingConfig;
pub use error::{Error, TransportError};
pub use handoff::{Capture, Captured, Dispatcher, HandoffFlags, SymbolQueue, TickReport, Transport};
pub use morse::{decode, MessageBuffer, Symbol, SymbolBuffer};
