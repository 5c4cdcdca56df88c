//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, buffer capacities and
//! protocol constants live here so they can be tuned in one place.

// Keying timing (microseconds, matching the symbol clock resolution)

/// Hold time at or above which a press is classified as a dash.
pub const PRESS_LENGTH_US: u64 = 1_000_000;

/// A pause longer than this between a release and the next press closes
/// the current letter.
pub const SPACE_LENGTH_US: u64 = 2_000_000;

/// Minimum time between two accepted edges of the same kind.
pub const DEBOUNCE_DELAY_US: u64 = 50_000;

// Buffers

/// Capacity of the raw symbol buffer. Two slots are reserved for the
/// end-of-message marker, so capture stops at `SYMBOL_BUFFER_CAPACITY - 2`.
pub const SYMBOL_BUFFER_CAPACITY: usize = 2048;

/// Capacity of the decoded message buffer (characters).
pub const MESSAGE_BUFFER_CAPACITY: usize = 256;

/// Length of the lock-free queue between the capture and consumer contexts.
/// `heapless::spsc::Queue` holds `N - 1` items.
pub const SYMBOL_QUEUE_LEN: usize = 64;

/// Character emitted for a letter run that matches no table entry.
pub const UNKNOWN_CHAR: char = '=';

// Consumer loop

/// Period of the consumer loop tick (ms).
pub const POLL_PERIOD_MS: u64 = 1000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the actual `embassy_nrf::peripherals::*` pins are
// picked in `main.rs`.  Adjust for your custom PCB.
//
//   Key press-start  → P0.11  (falling edge, pull-up)
//   Key press-end    → P0.12  (rising edge, pull-up)
//   Send trigger     → P0.24  (falling edge, pull-up)
//   Read trigger     → P0.25  (falling edge, pull-up)
//   Status LED       → P0.13

// BLE

/// Address of the Morse GATT server (random static, little-endian bytes).
pub const BLE_PEER_ADDRESS: [u8; 6] = [0xDE, 0xCA, 0xFB, 0xEE, 0xFE, 0xD2];

/// BLE connection interval range (in 1.25 ms units).
pub const BLE_CONN_INTERVAL_MIN: u16 = 24;
pub const BLE_CONN_INTERVAL_MAX: u16 = 40;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Delay before retrying after a failed or dropped connection (ms).
pub const BLE_RECONNECT_DELAY_MS: u64 = 2000;

/// Largest payload returned by a characteristic read.
pub const BLE_READ_BUFFER_LEN: usize = 64;

/// Runtime timing thresholds for the capture side.
///
/// `Default` uses the compile-time constants above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Dash threshold (inclusive).
    pub press_length_us: u64,
    /// Letter gap threshold (exclusive).
    pub space_length_us: u64,
    /// Debounce window shared by key edges and triggers.
    pub debounce_us: u64,
}

impl TimingConfig {
    pub const DEFAULT: Self = Self {
        press_length_us: PRESS_LENGTH_US,
        space_length_us: SPACE_LENGTH_US,
        debounce_us: DEBOUNCE_DELAY_US,
    };
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
