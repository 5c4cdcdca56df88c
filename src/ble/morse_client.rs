//! BLE GATT Morse client - writes decoded messages to the Morse server and
//! reads its reply characteristic.

use super::{Link, LINK};
use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::MutexGuard;
use morse2ble::config::BLE_READ_BUFFER_LEN;
use morse2ble::{Transport, TransportError};
use nrf_softdevice::ble::gatt_client::{self, ReadError, WriteError};

/// Status reported for SoftDevice failures that carry no GATT status.
const STACK_FAILURE: u32 = 0xFFFF_FFFF;

/// nrf-softdevice GATT client struct for the Morse service.
///
/// Only the discovered value handles are used; payloads go through the raw
/// `gatt_client::write` / `gatt_client::read` calls so their length follows
/// the message rather than the declared array size.
#[nrf_softdevice::gatt_client(uuid = "cafecafe-cafe-cafe-cafe-cafecafecafe")]
pub struct MorseServiceClient {
    /// Server reply, read on request.
    #[characteristic(uuid = "caffcaff-caff-caff-caff-caffcaffcaff", read)]
    pub reply: [u8; 64],

    /// Decoded message text.
    #[characteristic(uuid = "decadeca-deca-deca-deca-decadecadeca", read, write)]
    pub message: [u8; 64],
}

/// [`Transport`] over whatever link is currently published in [`LINK`].
///
/// Holds the link lock for its whole lifetime, so create one per tick.
pub struct GattTransport<'a> {
    link: MutexGuard<'a, CriticalSectionRawMutex, Option<Link>>,
}

impl GattTransport<'static> {
    pub async fn acquire() -> Self {
        Self {
            link: LINK.lock().await,
        }
    }
}

impl GattTransport<'_> {
    fn link(&self) -> Result<&Link, TransportError> {
        self.link.as_ref().ok_or(TransportError::NotConnected)
    }
}

impl Transport for GattTransport<'_> {
    async fn request_write(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let link = self.link()?;
        gatt_client::write(&link.conn, link.message_handle, payload)
            .await
            .map_err(write_failure)
    }

    async fn request_read(&mut self) -> Result<(), TransportError> {
        let link = self.link()?;
        let mut buf = [0u8; BLE_READ_BUFFER_LEN];
        let len = gatt_client::read(&link.conn, link.reply_handle, &mut buf)
            .await
            .map_err(read_failure)?;

        match core::str::from_utf8(&buf[..len]) {
            Ok(text) => info!("reply ({} bytes): {}", len, text),
            Err(_) => info!("reply ({} bytes): {=[u8]:x}", len, &buf[..len]),
        }
        Ok(())
    }
}

fn write_failure(err: WriteError) -> TransportError {
    match err {
        WriteError::Disconnected => TransportError::NotConnected,
        other => {
            warn!("GATT write error: {:?}", other);
            TransportError::Status(STACK_FAILURE)
        }
    }
}

fn read_failure(err: ReadError) -> TransportError {
    match err {
        ReadError::Disconnected => TransportError::NotConnected,
        other => {
            warn!("GATT read error: {:?}", other);
            TransportError::Status(STACK_FAILURE)
        }
    }
}
