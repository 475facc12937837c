//! Outbound packet (host → bridge).
//!
//! # Layout
//!
//! ```text
//! byte  0      [0] override LED  [1] override rumble low  [2] override rumble high
//! bytes 1-5    LED red, green, blue, blink-on, blink-off
//! bytes 6-7    rumble low, rumble high
//! byte  8      [7:0] axis overrides 0-7
//! byte  9      [3:0] axis overrides 8-11   [7:4] button overrides 0-3
//! byte  10     [7:0] button overrides 4-11
//! byte  11     [5:0] button overrides 12-17
//! bytes 12-35  pulse widths, u16 little-endian, one per axis
//! byte  36     [7:0] button values 0-7
//! byte  37     [7:0] button values 8-15
//! byte  38     [1:0] button values 16-17
//! ```
//!
//! Axis and button numbers are [`Axis::index`] and [`Button::index`]. A value
//! only takes effect on the bridge while its override bit is set; the packet
//! never checks or enforces that pairing.

use crate::field::BitField;
use crate::types::{Axis, Button, Feedback, LedBlink, Rgb};
use crate::wire;

/// Size of the outbound packet in bytes.
pub const OUTPUT_PACKET_SIZE: usize = 39;

mod offset {
    pub const FEEDBACK_OVERRIDES: usize = 0;
    pub const LED_RED: usize = 1;
    pub const LED_GREEN: usize = 2;
    pub const LED_BLUE: usize = 3;
    pub const LED_BLINK_ON: usize = 4;
    pub const LED_BLINK_OFF: usize = 5;
    pub const RUMBLE_LOW: usize = 6;
    pub const RUMBLE_HIGH: usize = 7;
    pub const AXIS_OVERRIDES_BIT: usize = 8 * 8;
    pub const BUTTON_OVERRIDES_BIT: usize = 9 * 8 + 4;
    pub const PULSE_WIDTHS: usize = 12;
    pub const BUTTON_VALUES_BIT: usize = 36 * 8;
}

#[inline]
const fn feedback_override_field(feedback: Feedback) -> BitField {
    BitField::flag(offset::FEEDBACK_OVERRIDES, feedback as u8)
}

#[inline]
const fn axis_override_field(axis: Axis) -> BitField {
    BitField::flag_at(offset::AXIS_OVERRIDES_BIT + axis.index())
}

#[inline]
const fn button_override_field(button: Button) -> BitField {
    BitField::flag_at(offset::BUTTON_OVERRIDES_BIT + button.index())
}

#[inline]
const fn button_value_field(button: Button) -> BitField {
    BitField::flag_at(offset::BUTTON_VALUES_BIT + button.index())
}

#[inline]
const fn pulse_width_offset(axis: Axis) -> usize {
    offset::PULSE_WIDTHS + 2 * axis.index()
}

/// Outbound packet: override flags and the values the bridge should drive.
///
/// The packet is a plain byte buffer; every accessor reads or writes that
/// buffer directly, so changes are visible through [`as_bytes`](Self::as_bytes)
/// immediately and vice versa.
///
/// # Example
///
/// ```
/// use servoshock_proto::{Axis, OutputPacket};
///
/// let mut packet = OutputPacket::new();
/// packet.override_axis(Axis::LeftStickX, 1500);
/// assert!(packet.axis_override(Axis::LeftStickX));
/// assert_eq!(packet.as_bytes()[12..14], 1500u16.to_le_bytes());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputPacket {
    bytes: [u8; OUTPUT_PACKET_SIZE],
}

impl Default for OutputPacket {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPacket {
    /// All-zero packet: nothing overridden.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; OUTPUT_PACKET_SIZE],
        }
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; OUTPUT_PACKET_SIZE]) -> Self {
        Self { bytes }
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; OUTPUT_PACKET_SIZE] {
        &self.bytes
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8; OUTPUT_PACKET_SIZE] {
        &mut self.bytes
    }

    #[must_use]
    pub const fn into_bytes(self) -> [u8; OUTPUT_PACKET_SIZE] {
        self.bytes
    }

    // --- Override flags ---

    #[must_use]
    pub fn feedback_override(&self, feedback: Feedback) -> bool {
        feedback_override_field(feedback).is_set(&self.bytes)
    }

    pub fn set_feedback_override(&mut self, feedback: Feedback, enabled: bool) {
        feedback_override_field(feedback).write(&mut self.bytes, enabled);
    }

    #[must_use]
    pub fn axis_override(&self, axis: Axis) -> bool {
        axis_override_field(axis).is_set(&self.bytes)
    }

    pub fn set_axis_override(&mut self, axis: Axis, enabled: bool) {
        axis_override_field(axis).write(&mut self.bytes, enabled);
    }

    #[must_use]
    pub fn button_override(&self, button: Button) -> bool {
        button_override_field(button).is_set(&self.bytes)
    }

    pub fn set_button_override(&mut self, button: Button, enabled: bool) {
        button_override_field(button).write(&mut self.bytes, enabled);
    }

    // --- Values ---

    /// Pulse width in microseconds the bridge drives on `axis` while overridden.
    #[must_use]
    pub fn pulse_width(&self, axis: Axis) -> u16 {
        wire::read_pulse_width(&self.bytes, pulse_width_offset(axis))
    }

    pub fn set_pulse_width(&mut self, axis: Axis, micros: u16) {
        wire::write_pulse_width(&mut self.bytes, pulse_width_offset(axis), micros);
    }

    #[must_use]
    pub fn button(&self, button: Button) -> bool {
        button_value_field(button).is_set(&self.bytes)
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        button_value_field(button).write(&mut self.bytes, pressed);
    }

    #[must_use]
    pub fn led_color(&self) -> Rgb {
        Rgb {
            red: self.bytes[offset::LED_RED],
            green: self.bytes[offset::LED_GREEN],
            blue: self.bytes[offset::LED_BLUE],
        }
    }

    pub fn set_led_color(&mut self, color: Rgb) {
        self.bytes[offset::LED_RED] = color.red;
        self.bytes[offset::LED_GREEN] = color.green;
        self.bytes[offset::LED_BLUE] = color.blue;
    }

    #[must_use]
    pub fn led_blink(&self) -> LedBlink {
        LedBlink {
            on: self.bytes[offset::LED_BLINK_ON],
            off: self.bytes[offset::LED_BLINK_OFF],
        }
    }

    pub fn set_led_blink(&mut self, blink: LedBlink) {
        self.bytes[offset::LED_BLINK_ON] = blink.on;
        self.bytes[offset::LED_BLINK_OFF] = blink.off;
    }

    /// Write colour and blink durations in one go.
    ///
    /// Only the five LED value bytes change. The LED override flag is left as
    /// it was, so the values have no effect until
    /// `set_feedback_override(Feedback::Led, true)` is also called.
    pub fn set_led(&mut self, red: u8, green: u8, blue: u8, blink_on: u8, blink_off: u8) {
        self.set_led_color(Rgb::new(red, green, blue));
        self.set_led_blink(LedBlink {
            on: blink_on,
            off: blink_off,
        });
    }

    /// Rumble intensities as `(low, high)`.
    #[must_use]
    pub fn rumble(&self) -> (u8, u8) {
        (self.bytes[offset::RUMBLE_LOW], self.bytes[offset::RUMBLE_HIGH])
    }

    pub fn set_rumble(&mut self, low: u8, high: u8) {
        self.bytes[offset::RUMBLE_LOW] = low;
        self.bytes[offset::RUMBLE_HIGH] = high;
    }

    // --- Convenience ---

    /// Take over `axis` and drive it at `micros`.
    pub fn override_axis(&mut self, axis: Axis, micros: u16) {
        self.set_pulse_width(axis, micros);
        self.set_axis_override(axis, true);
    }

    /// Give `axis` back to the controller. The stored pulse width is kept.
    pub fn release_axis(&mut self, axis: Axis) {
        self.set_axis_override(axis, false);
    }

    /// Take over `button` and drive it to `pressed`.
    pub fn override_button(&mut self, button: Button, pressed: bool) {
        self.set_button(button, pressed);
        self.set_button_override(button, true);
    }

    pub fn release_button(&mut self, button: Button) {
        self.set_button_override(button, false);
    }

    /// Clear every override flag. Values are left in place.
    pub fn release_all(&mut self) {
        for feedback in Feedback::ALL {
            self.set_feedback_override(feedback, false);
        }
        for axis in Axis::ALL {
            self.set_axis_override(axis, false);
        }
        for button in Button::ALL {
            self.set_button_override(button, false);
        }
    }
}

impl From<[u8; OUTPUT_PACKET_SIZE]> for OutputPacket {
    fn from(bytes: [u8; OUTPUT_PACKET_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for OutputPacket {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
