//! Decoded snapshot of an inbound packet.

use crate::input::{InputPacket, TOUCHPAD_FRAMES};
use crate::touchpad::TouchpadFrame;
use crate::types::{Axis, Button, Buttons, Stick, Vector3, AXIS_COUNT};

/// Outputs the bridge reports it is currently driving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputState {
    /// Pulse widths in microseconds, indexed by [`Axis::index`].
    pub pulse_widths: [u16; AXIS_COUNT],
    pub buttons: Buttons,
}

impl OutputState {
    #[inline]
    #[must_use]
    pub fn pulse_width(&self, axis: Axis) -> u16 {
        self.pulse_widths[axis.index()]
    }
}

/// Everything an inbound packet carries, decoded into plain fields.
///
/// Built after an exchange, once the d-pad has been normalized, so `buttons`
/// holds independent d-pad states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub report_id: u8,
    pub left_stick: Stick,
    pub right_stick: Stick,
    pub buttons: Buttons,
    pub counter: u8,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub gyro: Vector3,
    pub accel: Vector3,
    pub battery: u8,
    pub usb_connected: bool,
    pub touchpad_frame_count: u8,
    pub touchpad: [TouchpadFrame; TOUCHPAD_FRAMES],
    pub outputs: OutputState,
}

impl ControllerState {
    /// Buttons held now that were up in `previous`.
    #[inline]
    #[must_use]
    pub fn pressed_since(&self, previous: &Self) -> Buttons {
        self.buttons & !previous.buttons
    }

    /// Buttons up now that were held in `previous`.
    #[inline]
    #[must_use]
    pub fn released_since(&self, previous: &Self) -> Buttons {
        previous.buttons & !self.buttons
    }
}

impl From<&InputPacket> for OutputState {
    fn from(packet: &InputPacket) -> Self {
        let mut state = Self::default();
        for axis in Axis::ALL {
            state.pulse_widths[axis.index()] = packet.output_pulse_width(axis);
        }
        for button in Button::ALL {
            state.buttons.set(button, packet.output_button(button));
        }
        state
    }
}

impl From<&InputPacket> for ControllerState {
    fn from(packet: &InputPacket) -> Self {
        Self {
            report_id: packet.report_id(),
            left_stick: packet.left_stick(),
            right_stick: packet.right_stick(),
            buttons: packet.buttons(),
            counter: packet.counter(),
            left_trigger: packet.left_trigger(),
            right_trigger: packet.right_trigger(),
            gyro: packet.gyro(),
            accel: packet.accel(),
            battery: packet.battery(),
            usb_connected: packet.usb_connected(),
            touchpad_frame_count: packet.touchpad_frame_count(),
            touchpad: packet.touchpad_frames(),
            outputs: OutputState::from(packet),
        }
    }
}
