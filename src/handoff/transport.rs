//! Seam to the BLE read/write collaborator.

use crate::error::TransportError;

/// Thin interface onto the BLE stack's characteristic read/write path.
///
/// Implemented over `nrf-softdevice` on target and by recording mocks in
/// tests.  Connection setup and discovery stay behind this trait.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Push `payload` to the peer's writable characteristic.
    async fn request_write(&mut self, payload: &[u8]) -> Result<(), TransportError>;

    /// Issue a read of the peer's characteristic. The returned bytes are
    /// reported by the transport itself.
    async fn request_read(&mut self) -> Result<(), TransportError>;
}
