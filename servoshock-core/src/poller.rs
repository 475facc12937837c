//! Poller: drives the exchange at a fixed rate and publishes each result.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};
use embedded_hal_async::delay::DelayNs;
use servoshock_proto::{ControllerState, OutputPacket};

use crate::driver::Servoshock;
use crate::error::PollError;
use crate::sink::StateSink;

/// Shortest period the bridge accepts (100 Hz).
pub const DEFAULT_POLL_PERIOD_MS: u32 = 10;

/// Error type of [`Poller`] for a given bus and select pin.
pub type PollerError<SPI, CS> =
    PollError<<SPI as spi::ErrorType>::Error, <CS as digital::ErrorType>::Error>;

/// Repeatedly exchanges packets with the bridge and forwards the decoded
/// state to a [`StateSink`].
///
/// Errors are reported and the loop keeps going: a failed exchange is retried
/// on the next period with the same outbound packet.
pub struct Poller<SPI, CS, S, D> {
    driver: Servoshock<SPI, CS>,
    sink: S,
    delay: D,
    period_ms: u32,
    last: ControllerState,
}

impl<SPI, CS, S, D> Poller<SPI, CS, S, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    S: StateSink,
    D: DelayNs,
{
    pub fn new(driver: Servoshock<SPI, CS>, sink: S, delay: D) -> Self {
        Self {
            driver,
            sink,
            delay,
            period_ms: DEFAULT_POLL_PERIOD_MS,
            last: ControllerState::default(),
        }
    }

    /// Change the poll period. Clamped to at least [`DEFAULT_POLL_PERIOD_MS`].
    #[must_use]
    pub fn with_period_ms(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms.max(DEFAULT_POLL_PERIOD_MS);
        self
    }

    #[inline]
    #[must_use]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Poll forever.
    ///
    /// Before every exchange `prepare` gets the last published state and the
    /// outbound packet, so overrides can follow the controller.
    pub async fn run<F>(&mut self, mut prepare: F) -> !
    where
        F: FnMut(&ControllerState, &mut OutputPacket),
    {
        loop {
            if let Err(_e) = self.cycle(&mut prepare).await {
                #[cfg(feature = "defmt")]
                defmt::warn!("servoshock poll failed: {}", _e.kind());
            }
        }
    }

    /// One period: prepare, exchange, publish, then wait.
    ///
    /// The wait happens whether or not the exchange succeeded.
    pub async fn cycle<F>(
        &mut self,
        prepare: &mut F,
    ) -> Result<ControllerState, PollerError<SPI, CS>>
    where
        F: FnMut(&ControllerState, &mut OutputPacket),
    {
        prepare(&self.last, self.driver.out_packet_mut());
        let result = self.poll_once().await;
        self.delay.delay_ms(self.period_ms).await;
        result
    }

    /// Exchange once and publish the decoded state.
    ///
    /// Nothing is published when the exchange fails.
    pub async fn poll_once(&mut self) -> Result<ControllerState, PollerError<SPI, CS>> {
        self.driver.update()?;
        let state = self.driver.state();
        self.last = state;
        self.sink.publish(&state).await?;
        Ok(state)
    }

    /// State from the last successful exchange.
    #[inline]
    #[must_use]
    pub fn last_state(&self) -> &ControllerState {
        &self.last
    }

    pub fn driver(&self) -> &Servoshock<SPI, CS> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut Servoshock<SPI, CS> {
        &mut self.driver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Decompose the poller into its driver, sink and delay.
    pub fn into_parts(self) -> (Servoshock<SPI, CS>, S, D) {
        (self.driver, self.sink, self.delay)
    }
}
