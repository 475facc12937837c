//! Driver and polling error types.

use core::fmt;

/// Failure reported by the bus primitives the driver is built on.
///
/// The packet protocol itself has no failure mode: whatever bytes the bus
/// returns are stored as-is. Only the SPI bus and the select line can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, P> {
    /// SPI transfer or flush failed.
    Bus(S),
    /// Driving the select line failed.
    Select(P),
}

impl<S, P> Error<S, P> {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Bus(_) => ErrorKind::Bus,
            Self::Select(_) => ErrorKind::Select,
        }
    }
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Display for Error<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "spi bus error: {e:?}"),
            Self::Select(e) => write!(f, "select line error: {e:?}"),
        }
    }
}

/// Error from a [`StateSink`](crate::StateSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Receiver is gone.
    Closed,
    /// Receiver could not take the state right now.
    Busy,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "sink closed"),
            Self::Busy => write!(f, "sink busy"),
        }
    }
}

/// Error from one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollError<S, P> {
    /// The exchange with the bridge failed.
    Driver(Error<S, P>),
    /// The state could not be published.
    Sink(SinkError),
}

impl<S, P> PollError<S, P> {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Driver(e) => e.kind(),
            Self::Sink(_) => ErrorKind::Sink,
        }
    }
}

impl<S, P> From<Error<S, P>> for PollError<S, P> {
    fn from(err: Error<S, P>) -> Self {
        Self::Driver(err)
    }
}

impl<S, P> From<SinkError> for PollError<S, P> {
    fn from(err: SinkError) -> Self {
        Self::Sink(err)
    }
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Display for PollError<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(e) => write!(f, "{e}"),
            Self::Sink(e) => write!(f, "{e}"),
        }
    }
}

/// Payload-free error category, loggable whatever the bus error types are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    Bus,
    Select,
    Sink,
}
