//! morse2ble - Morse key front-end for the nRF52840.
//!
//! A Morse key and two buttons on GPIO are timed into dots, dashes and
//! letter separators. The consumer loop decodes them to text on demand and
//! writes it to a GATT characteristic on a fixed BLE server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  SPSC queue + flags  ┌────────────┐   GATT    ┌──────────────┐
//! │  keyer   │─────────────────────▶│  consumer  │──────────▶│ Morse server │
//! │  input   │                      │  (1 s tick)│◀──────────│  (central)   │
//! └──────────┘                      └────────────┘   LINK    └──────────────┘
//!                                                    ▲
//!                                            ┌───────┴──────┐
//!                                            │  link task   │
//!                                            └──────────────┘
//! ```

#![no_std]
#![no_main]

mod ble;
mod ui;

use ble::morse_client::GattTransport;
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_time::{Duration, Ticker};
use morse2ble::config::POLL_PERIOD_MS;
use morse2ble::{Capture, Dispatcher, HandoffFlags, SymbolQueue, TimingConfig};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use ui::KeyerPins;
use {defmt_rtt as _, panic_probe as _};

/// Send / read requests from the keyer to the consumer loop.
static HANDOFF: HandoffFlags = HandoffFlags::new();

static SYMBOL_QUEUE: StaticCell<SymbolQueue> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn keyer_task(pins: KeyerPins, capture: Capture<'static>) -> ! {
    ui::buttons::keyer_input_task(pins, capture).await
}

#[embassy_executor::task]
async fn link_task(sd: &'static Softdevice, led: Output<'static>) -> ! {
    ble::link_task(sd, led).await
}

#[embassy_executor::task]
async fn consumer_task(mut dispatcher: Dispatcher<'static>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(POLL_PERIOD_MS));
    loop {
        ticker.next().await;
        let mut transport = GattTransport::acquire().await;
        dispatcher.tick(&mut transport).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("morse2ble starting");

    // Embassy interrupts must sit below the SoftDevice's reserved priorities.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = embassy_nrf::interrupt::Priority::P2;
    config.time_interrupt_priority = embassy_nrf::interrupt::Priority::P2;
    let p = embassy_nrf::init(config);

    let sd_config = nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        // Room for a full message buffer in a single write.
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 259 }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 0,
            periph_role_count: 0,
            central_role_count: 1,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        ..Default::default()
    };
    let sd: &'static Softdevice = Softdevice::enable(&sd_config);
    unwrap!(spawner.spawn(softdevice_task(sd)));

    let (producer, consumer) = SYMBOL_QUEUE.init(SymbolQueue::new()).split();
    let capture = Capture::new(TimingConfig::default(), producer, &HANDOFF);
    let dispatcher = Dispatcher::new(consumer, &HANDOFF);

    let pins = KeyerPins {
        press_start: p.P0_11.degrade(),
        press_end: p.P0_12.degrade(),
        send: p.P0_24.degrade(),
        read: p.P0_25.degrade(),
    };
    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    unwrap!(spawner.spawn(keyer_task(pins, capture)));
    unwrap!(spawner.spawn(link_task(sd, led)));
    unwrap!(spawner.spawn(consumer_task(dispatcher)));

    info!("all tasks spawned");
}
