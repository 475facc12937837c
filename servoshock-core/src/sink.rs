//! Destination for decoded controller state.

use core::future::Future;
use servoshock_proto::ControllerState;

use crate::error::SinkError;

/// Async trait for whatever consumes controller state after each exchange.
///
/// Implementations hand the state to another task, a log, a test recorder and
/// so on. They must be `no_std` compatible and must not allocate.
pub trait StateSink {
    /// Publish the state decoded from the latest exchange.
    fn publish(&mut self, state: &ControllerState) -> impl Future<Output = Result<(), SinkError>>;
}

/// Sink that discards every state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StateSink for NullSink {
    fn publish(&mut self, _state: &ControllerState) -> impl Future<Output = Result<(), SinkError>> {
        core::future::ready(Ok(()))
    }
}

impl<T: StateSink> StateSink for &mut T {
    fn publish(&mut self, state: &ControllerState) -> impl Future<Output = Result<(), SinkError>> {
        (**self).publish(state)
    }
}
