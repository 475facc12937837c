//! Touchpad records carried in the inbound packet.
//!
//! A frame is 9 bytes: a packet counter followed by two 4-byte finger entries.
//! A finger entry packs a 7-bit rolling touch id and an inverted "touching" bit
//! into its first byte, then a 12-bit X and 12-bit Y coordinate into the next
//! three bytes, least significant bits first:
//!
//! ```text
//! byte 0: [7] no finger   [6:0] touch id
//! byte 1: x[7:0]
//! byte 2: y[3:0] x[11:8]
//! byte 3: y[11:4]
//! ```

/// Size of one finger entry on the wire.
pub const FINGER_SIZE: usize = 4;

/// Size of one touchpad frame on the wire.
pub const TOUCHPAD_FRAME_SIZE: usize = 1 + 2 * FINGER_SIZE;

/// One finger contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Finger {
    /// Rolling id, incremented by the controller for each new touch (7 bits).
    pub id: u8,
    /// The finger is on the touchpad.
    pub touching: bool,
    /// X position, 12 bits.
    pub x: u16,
    /// Y position, 12 bits.
    pub y: u16,
}

impl Finger {
    #[must_use]
    pub fn from_wire(bytes: &[u8; FINGER_SIZE]) -> Self {
        Self {
            id: bytes[0] & 0x7F,
            touching: bytes[0] & 0x80 == 0,
            x: u16::from(bytes[1]) | (u16::from(bytes[2] & 0x0F) << 8),
            y: u16::from(bytes[2] >> 4) | (u16::from(bytes[3]) << 4),
        }
    }

    /// Encode to the wire layout. `id`, `x` and `y` are truncated to their field widths.
    #[must_use]
    pub fn to_wire(&self) -> [u8; FINGER_SIZE] {
        let x = self.x & 0x0FFF;
        let y = self.y & 0x0FFF;
        [
            (self.id & 0x7F) | if self.touching { 0 } else { 0x80 },
            x as u8,
            ((x >> 8) as u8) | ((y as u8 & 0x0F) << 4),
            (y >> 4) as u8,
        ]
    }
}

/// One touchpad report: a counter and up to two concurrent fingers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchpadFrame {
    pub counter: u8,
    pub fingers: [Finger; 2],
}

impl TouchpadFrame {
    #[must_use]
    pub fn from_wire(bytes: &[u8; TOUCHPAD_FRAME_SIZE]) -> Self {
        let finger = |i: usize| {
            let start = 1 + i * FINGER_SIZE;
            let mut entry = [0u8; FINGER_SIZE];
            entry.copy_from_slice(&bytes[start..start + FINGER_SIZE]);
            Finger::from_wire(&entry)
        };
        Self {
            counter: bytes[0],
            fingers: [finger(0), finger(1)],
        }
    }

    #[must_use]
    pub fn to_wire(&self) -> [u8; TOUCHPAD_FRAME_SIZE] {
        let mut bytes = [0u8; TOUCHPAD_FRAME_SIZE];
        bytes[0] = self.counter;
        for (i, finger) in self.fingers.iter().enumerate() {
            let start = 1 + i * FINGER_SIZE;
            bytes[start..start + FINGER_SIZE].copy_from_slice(&finger.to_wire());
        }
        bytes
    }

    /// Fingers currently touching the pad.
    pub fn touching(&self) -> impl Iterator<Item = &Finger> {
        self.fingers.iter().filter(|f| f.touching)
    }
}
