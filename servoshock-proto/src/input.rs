//! Inbound packet (bridge → host).
//!
//! # Layout
//!
//! ```text
//! bytes 0-7    leftovers of the previous transaction, ignored
//! byte  8      report id
//! bytes 9-12   left stick X/Y, right stick X/Y (u8)
//! byte  13     [3:0] d-pad up/right/down/left  [4] square [5] cross [6] circle [7] triangle
//! byte  14     [0] L1 [1] R1 [2] L2 [3] R2 [4] share [5] options [6] L3 [7] R3
//! byte  15     [0] PS [1] touchpad press [7:2] report counter
//! bytes 16-17  left/right analog trigger
//! bytes 21-26  gyro X/Y/Z, i16 big-endian
//! bytes 27-32  accel X/Y/Z, i16 big-endian
//! byte  38     [3:0] battery level [4] USB data connected
//! byte  41     number of valid touchpad frames
//! bytes 42-68  three 9-byte touchpad frames
//! bytes 69-92  output pulse widths, u16 little-endian, one per axis
//! bytes 93-95  output button states, one bit per button in output order
//! ```
//!
//! On the wire the four d-pad bits carry a direction code rather than button
//! states. [`InputPacket::normalize_dpad`] rewrites them in place; the driver
//! calls it after every exchange.

use crate::dpad::{DpadButtons, DpadDirection};
use crate::field::BitField;
use crate::touchpad::{TouchpadFrame, TOUCHPAD_FRAME_SIZE};
use crate::types::{Axis, Button, Buttons, Stick, Vector3};
use crate::wire;

/// Size of the inbound packet in bytes.
pub const INPUT_PACKET_SIZE: usize = 96;

/// Touchpad frames carried in each inbound packet.
pub const TOUCHPAD_FRAMES: usize = 3;

/// Byte whose low nibble carries the d-pad direction code on the wire.
pub const DPAD_BYTE: usize = 13;

mod offset {
    use crate::field::BitField;

    pub const REPORT_ID: usize = 8;
    pub const LEFT_STICK_X: usize = 9;
    pub const LEFT_STICK_Y: usize = 10;
    pub const RIGHT_STICK_X: usize = 11;
    pub const RIGHT_STICK_Y: usize = 12;
    pub const DPAD: BitField = BitField::new(super::DPAD_BYTE, 0, 4);
    pub const COUNTER: BitField = BitField::new(15, 2, 6);
    pub const LEFT_TRIGGER: usize = 16;
    pub const RIGHT_TRIGGER: usize = 17;
    pub const GYRO: usize = 21;
    pub const ACCEL: usize = 27;
    pub const BATTERY: BitField = BitField::new(38, 0, 4);
    pub const USB_DATA: BitField = BitField::flag(38, 4);
    pub const TOUCH_PACKETS: usize = 41;
    pub const TOUCH_FRAMES: usize = 42;
    pub const OUTPUT_PULSE_WIDTHS: usize = 69;
    pub const OUTPUT_BUTTONS_BIT: usize = 93 * 8;
}

/// Bit of the live controller button in bytes 13-15.
///
/// The controller report orders its buttons differently from the bridge's
/// output order used everywhere else.
const fn live_button_field(button: Button) -> BitField {
    let (byte, bit) = match button {
        Button::DpadUp => (13, 0),
        Button::DpadRight => (13, 1),
        Button::DpadDown => (13, 2),
        Button::DpadLeft => (13, 3),
        Button::Square => (13, 4),
        Button::Cross => (13, 5),
        Button::Circle => (13, 6),
        Button::Triangle => (13, 7),
        Button::L1 => (14, 0),
        Button::R1 => (14, 1),
        Button::L2 => (14, 2),
        Button::R2 => (14, 3),
        Button::Share => (14, 4),
        Button::Options => (14, 5),
        Button::L3 => (14, 6),
        Button::R3 => (14, 7),
        Button::Ps => (15, 0),
        Button::TouchpadPress => (15, 1),
    };
    BitField::flag(byte, bit)
}

#[inline]
const fn output_button_field(button: Button) -> BitField {
    BitField::flag_at(offset::OUTPUT_BUTTONS_BIT + button.index())
}

#[inline]
const fn output_pulse_width_offset(axis: Axis) -> usize {
    offset::OUTPUT_PULSE_WIDTHS + 2 * axis.index()
}

/// Inbound packet: live controller state plus the outputs the bridge drives.
///
/// Like [`OutputPacket`](crate::OutputPacket) this is a plain byte buffer with
/// accessors over it. Setters exist for every field so test fixtures and
/// simulators can build packets the same way the bridge does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputPacket {
    bytes: [u8; INPUT_PACKET_SIZE],
}

impl Default for InputPacket {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPacket {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; INPUT_PACKET_SIZE],
        }
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; INPUT_PACKET_SIZE]) -> Self {
        Self { bytes }
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; INPUT_PACKET_SIZE] {
        &self.bytes
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8; INPUT_PACKET_SIZE] {
        &mut self.bytes
    }

    #[must_use]
    pub const fn into_bytes(self) -> [u8; INPUT_PACKET_SIZE] {
        self.bytes
    }

    // --- Controller report ---

    #[must_use]
    pub fn report_id(&self) -> u8 {
        self.bytes[offset::REPORT_ID]
    }

    pub fn set_report_id(&mut self, id: u8) {
        self.bytes[offset::REPORT_ID] = id;
    }

    #[must_use]
    pub fn left_stick(&self) -> Stick {
        Stick::new(
            self.bytes[offset::LEFT_STICK_X],
            self.bytes[offset::LEFT_STICK_Y],
        )
    }

    pub fn set_left_stick(&mut self, stick: Stick) {
        self.bytes[offset::LEFT_STICK_X] = stick.x;
        self.bytes[offset::LEFT_STICK_Y] = stick.y;
    }

    #[must_use]
    pub fn right_stick(&self) -> Stick {
        Stick::new(
            self.bytes[offset::RIGHT_STICK_X],
            self.bytes[offset::RIGHT_STICK_Y],
        )
    }

    pub fn set_right_stick(&mut self, stick: Stick) {
        self.bytes[offset::RIGHT_STICK_X] = stick.x;
        self.bytes[offset::RIGHT_STICK_Y] = stick.y;
    }

    /// Live state of a controller button.
    ///
    /// For the d-pad this is only meaningful after
    /// [`normalize_dpad`](Self::normalize_dpad); before that the four bits hold
    /// a direction code.
    #[must_use]
    pub fn button(&self, button: Button) -> bool {
        live_button_field(button).is_set(&self.bytes)
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        live_button_field(button).write(&mut self.bytes, pressed);
    }

    /// All live buttons as a set.
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        let mut buttons = Buttons::NONE;
        for button in Button::ALL {
            buttons.set(button, self.button(button));
        }
        buttons
    }

    /// The d-pad nibble read as `up + 2·right + 4·down + 8·left`.
    #[must_use]
    pub fn dpad_code(&self) -> u8 {
        offset::DPAD.get(&self.bytes)
    }

    pub fn set_dpad_code(&mut self, code: u8) {
        offset::DPAD.set(&mut self.bytes, code);
    }

    /// Replace the raw direction code with four independent button states and
    /// return the decoded direction. The other bits of the byte are untouched.
    pub fn normalize_dpad(&mut self) -> DpadDirection {
        let direction = DpadDirection::from_code(self.dpad_code());
        let buttons: DpadButtons = direction.buttons();
        self.set_dpad_code(buttons.code());
        direction
    }

    /// 6-bit report counter.
    #[must_use]
    pub fn counter(&self) -> u8 {
        offset::COUNTER.get(&self.bytes)
    }

    pub fn set_counter(&mut self, counter: u8) {
        offset::COUNTER.set(&mut self.bytes, counter);
    }

    #[must_use]
    pub fn left_trigger(&self) -> u8 {
        self.bytes[offset::LEFT_TRIGGER]
    }

    #[must_use]
    pub fn right_trigger(&self) -> u8 {
        self.bytes[offset::RIGHT_TRIGGER]
    }

    pub fn set_triggers(&mut self, left: u8, right: u8) {
        self.bytes[offset::LEFT_TRIGGER] = left;
        self.bytes[offset::RIGHT_TRIGGER] = right;
    }

    #[must_use]
    pub fn gyro(&self) -> Vector3 {
        self.read_vector(offset::GYRO)
    }

    pub fn set_gyro(&mut self, gyro: Vector3) {
        self.write_vector(offset::GYRO, gyro);
    }

    #[must_use]
    pub fn accel(&self) -> Vector3 {
        self.read_vector(offset::ACCEL)
    }

    pub fn set_accel(&mut self, accel: Vector3) {
        self.write_vector(offset::ACCEL, accel);
    }

    fn read_vector(&self, start: usize) -> Vector3 {
        Vector3 {
            x: wire::read_imu(&self.bytes, start),
            y: wire::read_imu(&self.bytes, start + 2),
            z: wire::read_imu(&self.bytes, start + 4),
        }
    }

    fn write_vector(&mut self, start: usize, v: Vector3) {
        wire::write_imu(&mut self.bytes, start, v.x);
        wire::write_imu(&mut self.bytes, start + 2, v.y);
        wire::write_imu(&mut self.bytes, start + 4, v.z);
    }

    /// Battery level nibble as reported by the controller.
    #[must_use]
    pub fn battery(&self) -> u8 {
        offset::BATTERY.get(&self.bytes)
    }

    pub fn set_battery(&mut self, level: u8) {
        offset::BATTERY.set(&mut self.bytes, level);
    }

    #[must_use]
    pub fn usb_connected(&self) -> bool {
        offset::USB_DATA.is_set(&self.bytes)
    }

    pub fn set_usb_connected(&mut self, connected: bool) {
        offset::USB_DATA.write(&mut self.bytes, connected);
    }

    // --- Touchpad ---

    /// Number of touchpad frames the controller filled in this report.
    #[must_use]
    pub fn touchpad_frame_count(&self) -> u8 {
        self.bytes[offset::TOUCH_PACKETS]
    }

    pub fn set_touchpad_frame_count(&mut self, count: u8) {
        self.bytes[offset::TOUCH_PACKETS] = count;
    }

    /// Decode touchpad frame `index`, or `None` past [`TOUCHPAD_FRAMES`].
    #[must_use]
    pub fn touchpad_frame(&self, index: usize) -> Option<TouchpadFrame> {
        if index >= TOUCHPAD_FRAMES {
            return None;
        }
        let start = offset::TOUCH_FRAMES + index * TOUCHPAD_FRAME_SIZE;
        let mut raw = [0u8; TOUCHPAD_FRAME_SIZE];
        raw.copy_from_slice(&self.bytes[start..start + TOUCHPAD_FRAME_SIZE]);
        Some(TouchpadFrame::from_wire(&raw))
    }

    /// Encode `frame` into slot `index`.
    ///
    /// Returns `false` and leaves the packet untouched past [`TOUCHPAD_FRAMES`].
    pub fn set_touchpad_frame(&mut self, index: usize, frame: &TouchpadFrame) -> bool {
        if index >= TOUCHPAD_FRAMES {
            return false;
        }
        let start = offset::TOUCH_FRAMES + index * TOUCHPAD_FRAME_SIZE;
        self.bytes[start..start + TOUCHPAD_FRAME_SIZE].copy_from_slice(&frame.to_wire());
        true
    }

    /// All three touchpad frames, valid or not.
    #[must_use]
    pub fn touchpad_frames(&self) -> [TouchpadFrame; TOUCHPAD_FRAMES] {
        let mut frames = [TouchpadFrame::default(); TOUCHPAD_FRAMES];
        for (i, frame) in frames.iter_mut().enumerate() {
            if let Some(decoded) = self.touchpad_frame(i) {
                *frame = decoded;
            }
        }
        frames
    }

    // --- Output state mirror ---

    /// Pulse width the bridge is currently driving on `axis`, overridden or not.
    #[must_use]
    pub fn output_pulse_width(&self, axis: Axis) -> u16 {
        wire::read_pulse_width(&self.bytes, output_pulse_width_offset(axis))
    }

    pub fn set_output_pulse_width(&mut self, axis: Axis, micros: u16) {
        wire::write_pulse_width(&mut self.bytes, output_pulse_width_offset(axis), micros);
    }

    /// State the bridge is currently driving on the `button` output.
    #[must_use]
    pub fn output_button(&self, button: Button) -> bool {
        output_button_field(button).is_set(&self.bytes)
    }

    pub fn set_output_button(&mut self, button: Button, on: bool) {
        output_button_field(button).write(&mut self.bytes, on);
    }
}

impl From<[u8; INPUT_PACKET_SIZE]> for InputPacket {
    fn from(bytes: [u8; INPUT_PACKET_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for InputPacket {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touchpad::Finger;

    #[test]
    fn test_sticks_and_report_id() {
        let mut bytes = [0u8; INPUT_PACKET_SIZE];
        bytes[8..13].copy_from_slice(&[0x11, 1, 2, 3, 4]);
        let packet = InputPacket::from_bytes(bytes);
        assert_eq!(packet.report_id(), 0x11);
        assert_eq!(packet.left_stick(), Stick::new(1, 2));
        assert_eq!(packet.right_stick(), Stick::new(3, 4));
    }

    #[test]
    fn test_live_button_positions() {
        let mut packet = InputPacket::new();
        packet.set_button(Button::Square, true);
        assert_eq!(packet.as_bytes()[13], 0x10);
        packet.set_button(Button::Triangle, true);
        assert_eq!(packet.as_bytes()[13], 0x90);
        packet.set_button(Button::Share, true);
        assert_eq!(packet.as_bytes()[14], 0x10);
        packet.set_button(Button::R3, true);
        assert_eq!(packet.as_bytes()[14], 0x90);
        packet.set_button(Button::TouchpadPress, true);
        assert_eq!(packet.as_bytes()[15], 0x02);
    }

    #[test]
    fn test_counter_shares_byte_with_buttons() {
        let mut packet = InputPacket::new();
        packet.set_button(Button::Ps, true);
        packet.set_counter(0x3F);
        assert_eq!(packet.as_bytes()[15], 0xFD);
        assert_eq!(packet.counter(), 0x3F);
        assert!(packet.button(Button::Ps));
        assert!(!packet.button(Button::TouchpadPress));
    }

    #[test]
    fn test_normalize_dpad_keeps_face_buttons() {
        let mut bytes = [0u8; INPUT_PACKET_SIZE];
        // code 3 (down-right) with square and triangle held
        bytes[13] = 0x90 | 0x03;
        let mut packet = InputPacket::from_bytes(bytes);

        assert_eq!(packet.normalize_dpad(), DpadDirection::DownRight);
        assert!(!packet.button(Button::DpadUp));
        assert!(packet.button(Button::DpadRight));
        assert!(packet.button(Button::DpadDown));
        assert!(!packet.button(Button::DpadLeft));
        assert_eq!(packet.as_bytes()[13], 0x90 | 0b0110);
    }

    #[test]
    fn test_normalize_dpad_released() {
        let mut packet = InputPacket::new();
        packet.set_dpad_code(8);
        assert_eq!(packet.normalize_dpad(), DpadDirection::Released);
        assert_eq!(packet.dpad_code(), 0);
    }

    #[test]
    fn test_normalize_dpad_zero_is_up() {
        let mut packet = InputPacket::new();
        assert_eq!(packet.normalize_dpad(), DpadDirection::Up);
        assert!(packet.button(Button::DpadUp));
    }

    #[test]
    fn test_imu_big_endian_offsets() {
        let mut packet = InputPacket::new();
        packet.set_gyro(Vector3::new(1, -1, 0x0203));
        packet.set_accel(Vector3::new(-32768, 32767, 0));
        let b = packet.as_bytes();
        assert_eq!(b[21..27], [0x00, 0x01, 0xFF, 0xFF, 0x02, 0x03]);
        assert_eq!(b[27..33], [0x80, 0x00, 0x7F, 0xFF, 0x00, 0x00]);
        assert_eq!(packet.gyro(), Vector3::new(1, -1, 0x0203));
        assert_eq!(packet.accel(), Vector3::new(-32768, 32767, 0));
    }

    #[test]
    fn test_battery_and_usb() {
        let mut bytes = [0u8; INPUT_PACKET_SIZE];
        bytes[38] = 0xFB;
        let mut packet = InputPacket::from_bytes(bytes);
        assert_eq!(packet.battery(), 0x0B);
        assert!(packet.usb_connected());

        packet.set_usb_connected(false);
        assert_eq!(packet.as_bytes()[38], 0xEB);
    }

    #[test]
    fn test_touchpad_frame_slots() {
        let mut packet = InputPacket::new();
        let frame = TouchpadFrame {
            counter: 7,
            fingers: [
                Finger {
                    id: 3,
                    touching: true,
                    x: 1919,
                    y: 942,
                },
                Finger::default(),
            ],
        };
        assert!(packet.set_touchpad_frame(2, &frame));
        assert_eq!(packet.as_bytes()[42 + 18], 7);
        assert_eq!(packet.touchpad_frame(2), Some(frame));
        assert_eq!(packet.touchpad_frame(3), None);

        let before = packet;
        assert!(!packet.set_touchpad_frame(3, &frame));
        assert_eq!(packet, before);
        assert_eq!(packet.touchpad_frames()[2], frame);
    }

    #[test]
    fn test_output_mirror() {
        let mut packet = InputPacket::new();
        packet.set_output_pulse_width(Axis::LeftStickX, 1500);
        packet.set_output_pulse_width(Axis::TiltY, 2000);
        assert_eq!(packet.as_bytes()[69..71], 1500u16.to_le_bytes());
        assert_eq!(packet.as_bytes()[91..93], 2000u16.to_le_bytes());

        packet.set_output_button(Button::Ps, true);
        assert_eq!(packet.as_bytes()[95], 0x02);
        packet.set_output_button(Button::L1, true);
        assert_eq!(packet.as_bytes()[94], 0x01);
        assert!(packet.output_button(Button::L1));
    }
}
