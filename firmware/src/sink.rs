//! State sink backed by an Embassy signal.

use core::future::Future;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use servoshock_core::{ControllerState, SinkError, StateSink};

/// Shared slot holding the most recent controller state.
pub type StateSignal = Signal<CriticalSectionRawMutex, ControllerState>;

/// Publishes each state into a [`StateSignal`].
///
/// A signal only keeps the latest value: a slow reader skips intermediate
/// states instead of falling behind, and publishing never blocks the poller.
pub struct SignalSink {
    signal: &'static StateSignal,
}

impl SignalSink {
    pub fn new(signal: &'static StateSignal) -> Self {
        Self { signal }
    }
}

impl StateSink for SignalSink {
    fn publish(&mut self, state: &ControllerState) -> impl Future<Output = Result<(), SinkError>> {
        self.signal.signal(*state);
        core::future::ready(Ok(()))
    }
}
