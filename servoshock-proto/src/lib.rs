//! SPI packet layout for the Servoshock 2 controller-to-servo bridge.
//!
//! The bridge sits between a DualShock 4 controller and a set of servo, LED and
//! digital outputs. A host microcontroller talks to it over SPI (mode 0, MSB
//! first), exchanging two fixed-size packets in one full-duplex transaction:
//!
//! - [`OutputPacket`] (39 bytes, host → bridge): per-channel override flags
//!   paired with the values to drive (LED colour and blink, rumble, servo pulse
//!   widths, button states).
//! - [`InputPacket`] (96 bytes, bridge → host): the live controller report
//!   (sticks, buttons, triggers, IMU, battery, touchpad) followed by a mirror of
//!   the outputs the bridge is currently driving.
//!
//! Both packets are byte buffers with bit-exact accessors over them; there is no
//! separate decoded copy unless you ask for one with [`ControllerState`].
//!
//! # Example
//!
//! ```
//! use servoshock_proto::{Axis, Button, Feedback, InputPacket, OutputPacket};
//!
//! let mut out = OutputPacket::new();
//! out.override_axis(Axis::TiltX, 1500);
//! out.set_led(0, 0, 255, 0, 0);
//! out.set_feedback_override(Feedback::Led, true);
//!
//! let mut bytes = [0u8; 96];
//! bytes[13] = 0x08; // d-pad code 8: released
//! let mut input = InputPacket::from_bytes(bytes);
//! input.normalize_dpad();
//! assert!(!input.button(Button::DpadUp));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Derive `defmt::Format` for embedded logging
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and never allocates.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod dpad;
pub mod field;
pub mod input;
pub mod output;
pub mod state;
pub mod touchpad;
pub mod types;
pub mod wire;

pub use dpad::{DpadButtons, DpadDirection};
pub use field::BitField;
pub use input::{InputPacket, DPAD_BYTE, INPUT_PACKET_SIZE, TOUCHPAD_FRAMES};
pub use output::{OutputPacket, OUTPUT_PACKET_SIZE};
pub use state::{ControllerState, OutputState};
pub use touchpad::{Finger, TouchpadFrame, FINGER_SIZE, TOUCHPAD_FRAME_SIZE};
pub use types::{
    Axis, Button, Buttons, Feedback, LedBlink, Rgb, Stick, Vector3, AXIS_COUNT, BUTTON_COUNT,
};

/// Byte the host clocks out once the outbound packet is exhausted, so the
/// bridge can keep shifting out the longer inbound packet.
pub const PAD_BYTE: u8 = 0xCD;
