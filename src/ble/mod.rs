//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Central** role:
//!
//! 1. **Link manager** - connects to the fixed Morse server, discovers the
//!    Morse service and publishes the link for the consumer loop.
//! 2. **Morse client** - the [`morse2ble::Transport`] implementation that
//!    writes decoded messages and reads the server's reply.
//!
//! The link lives behind an async mutex; the consumer loop takes it for the
//! duration of one tick, the link manager only when (dis)connecting.

pub mod morse_client;

use defmt::{info, warn, Format};
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};
use morse2ble::config::{
    BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN, BLE_PEER_ADDRESS, BLE_RECONNECT_DELAY_MS,
    BLE_SLAVE_LATENCY, BLE_SUP_TIMEOUT,
};
use morse_client::MorseServiceClient;
use nrf_softdevice::ble::{central, gatt_client, Address, AddressType, Connection};
use nrf_softdevice::{raw, Softdevice};

/// An established connection with the discovered Morse characteristics.
pub struct Link {
    pub conn: Connection,
    /// Value handle of the writable message characteristic.
    pub message_handle: u16,
    /// Value handle of the readable reply characteristic.
    pub reply_handle: u16,
}

/// Current link, `None` while disconnected.
pub static LINK: Mutex<CriticalSectionRawMutex, Option<Link>> = Mutex::new(None);

/// Lightweight error tag for link setup (no dynamic alloc).
#[derive(Clone, Copy, Format)]
pub enum BleErrorTag {
    ConnectFailed,
    MorseServiceNotFound,
}

/// Keep a link to the Morse server up forever.
///
/// Connects, publishes the link, then watches for the disconnect and
/// retries after `BLE_RECONNECT_DELAY_MS`. The status LED (active-low) is
/// lit while the link is up.
pub async fn link_task(sd: &'static Softdevice, mut led: Output<'static>) -> ! {
    loop {
        match connect(sd).await {
            Ok(link) => {
                let conn = link.conn.clone();
                *LINK.lock().await = Some(link);
                led.set_low();
                info!("Morse server link ready");

                while conn.handle().is_some() {
                    Timer::after(Duration::from_millis(500)).await;
                }

                *LINK.lock().await = None;
                led.set_high();
                warn!("Morse server disconnected");
            }
            Err(tag) => warn!("link setup failed: {}", tag),
        }

        Timer::after(Duration::from_millis(BLE_RECONNECT_DELAY_MS)).await;
    }
}

async fn connect(sd: &'static Softdevice) -> Result<Link, BleErrorTag> {
    let peer = Address::new(AddressType::RandomStatic, BLE_PEER_ADDRESS);
    info!("connecting to Morse server {}", peer);

    let whitelist = [&peer];
    let conn_cfg = central::ConnectConfig {
        scan_config: central::ScanConfig {
            whitelist: Some(&whitelist),
            ..Default::default()
        },
        conn_params: raw::ble_gap_conn_params_t {
            min_conn_interval: BLE_CONN_INTERVAL_MIN,
            max_conn_interval: BLE_CONN_INTERVAL_MAX,
            slave_latency: BLE_SLAVE_LATENCY,
            conn_sup_timeout: BLE_SUP_TIMEOUT,
        },
        ..Default::default()
    };

    let conn = central::connect(sd, &conn_cfg)
        .await
        .map_err(|_| BleErrorTag::ConnectFailed)?;

    let client: MorseServiceClient = gatt_client::discover(&conn)
        .await
        .map_err(|_| BleErrorTag::MorseServiceNotFound)?;

    info!("Morse service discovered");
    Ok(Link {
        conn,
        message_handle: client.message_value_handle,
        reply_handle: client.reply_value_handle,
    })
}
