//! Platform-agnostic driver for the Servoshock 2 bridge.
//!
//! Built on the `embedded-hal` 1.0 traits, so it runs on any MCU with an
//! `SpiBus` and a GPIO for the select line, and on host with mocks.
//!
//! - [`driver`]: [`Servoshock`], one select-framed packet exchange per update
//! - [`poller`]: [`Poller`], fixed-rate exchange loop feeding a sink
//! - [`sink`]: [`StateSink`] trait for consumers of decoded state
//! - [`error`]: bus, select and sink error types
//!
//! Packet layout lives in `servoshock-proto` and is re-exported here.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and poll-failure logging
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod driver;
pub mod error;
pub mod poller;
pub mod sink;

pub use driver::{DriverError, Servoshock};
pub use error::{Error, ErrorKind, PollError, SinkError};
pub use poller::{Poller, PollerError, DEFAULT_POLL_PERIOD_MS};
pub use sink::{NullSink, StateSink};

pub use servoshock_proto as proto;
pub use servoshock_proto::{
    Axis, Button, Buttons, ControllerState, DpadDirection, Feedback, InputPacket, OutputPacket,
    INPUT_PACKET_SIZE, OUTPUT_PACKET_SIZE, PAD_BYTE,
};
