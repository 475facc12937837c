//! Servoshock 2 bridge host firmware for RP2040.
//!
//! Polls one Servoshock 2 board over SPI and reports what the connected
//! DualShock 4 does.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Exchanges packets with the bridge every 10 ms over SPI0 (1 MHz, mode 0)
//! 2. Stages a lightbar colour matching the controller's battery level
//! 3. Logs button presses and battery changes over RTT
//!
//! See [`config`] for the wiring.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two tasks:
//!
//! - **Poll Task**: Owns the driver, runs the [`Poller`] loop
//! - **Report Task**: Receives state signals, logs changes, blinks the LED
//!
//! Communication between tasks uses Embassy's [`Signal`](embassy_sync::signal::Signal)
//! with "latest value wins" semantics, so the reporter always sees the most
//! recent controller state and never slows the poller down.
//!
//! # Modules
//!
//! - [`config`]: Pins, timing and lightbar colours
//! - [`sink`]: Signal-backed state sink ([`SignalSink`])
//! - [`report`]: State change logging ([`StateReporter`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the driver types from [`servoshock_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub use servoshock_core::{
    Axis, Button, Buttons, ControllerState, DpadDirection, Error, ErrorKind, Feedback, NullSink,
    OutputPacket, PollError, Poller, Servoshock, SinkError, StateSink,
};

pub mod config;
pub mod report;
pub mod sink;

pub use report::StateReporter;
pub use sink::{SignalSink, StateSignal};
