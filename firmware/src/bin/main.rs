#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_time::Delay;
use servoshock_bridge::config::{self, battery_color};
use servoshock_bridge::{
    ControllerState, Feedback, OutputPacket, Poller, Servoshock, SignalSink, StateReporter,
    StateSignal,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

type BridgeSpi = Spi<'static, SPI0, Blocking>;
type BridgePoller = Poller<BridgeSpi, Output<'static>, SignalSink, Delay>;

/// Signal for passing controller state from the poll task to the report task.
/// Using Signal instead of Channel provides "latest value wins" semantics,
/// so the reporter never holds back the 10 ms poll cycle.
static STATE_SIGNAL: StaticCell<StateSignal> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Servoshock bridge starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Initialize the controller state signal (latest-value semantics)
    let signal = STATE_SIGNAL.init(StateSignal::new());

    // --- SPI Setup --- mode 0, MSB first
    let mut spi_config = spi::Config::default();
    spi_config.frequency = config::SPI_FREQUENCY;
    spi_config.phase = spi::Phase::CaptureOnFirstTransition;
    spi_config.polarity = spi::Polarity::IdleLow;

    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18, // SCK
        p.PIN_19, // MOSI
        p.PIN_16, // MISO
        spi_config,
    );
    let select = Output::new(p.PIN_17, Level::High);

    let servoshock = match Servoshock::new(spi, select) {
        Ok(servoshock) => servoshock,
        Err(e) => {
            error!("Servoshock init failed: {:?}", e.kind());
            return;
        }
    };
    let poller = Poller::new(servoshock, SignalSink::new(signal), Delay)
        .with_period_ms(config::POLL_PERIOD_MS);

    // On-board LED, toggled on every PS press
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(poll_task(poller).unwrap());
    spawner.spawn(report_task(signal, led).unwrap());

    info!("Servoshock bridge initialized, polling...");
}

/// Poll task - owns the driver and exchanges packets every poll period.
#[embassy_executor::task]
async fn poll_task(mut poller: BridgePoller) {
    poller.run(stage_lightbar).await
}

/// Show the battery level on the lightbar once a controller is reporting.
fn stage_lightbar(state: &ControllerState, out: &mut OutputPacket) {
    if state.report_id == 0 {
        // Nothing reported yet: leave the lightbar to the bridge.
        out.set_feedback_override(Feedback::Led, false);
        return;
    }
    out.set_led_color(battery_color(state.battery));
    out.set_feedback_override(Feedback::Led, true);
}

/// Report task - waits for state signals and logs what changed.
#[embassy_executor::task]
async fn report_task(signal: &'static StateSignal, mut led: Output<'static>) {
    let mut reporter = StateReporter::new();

    loop {
        // Wait for the next controller state (blocks until signaled)
        let state = signal.wait().await;
        if reporter.report(&state) {
            led.toggle();
        }
    }
}
