//! D-pad direction decoding.
//!
//! The controller reports the d-pad as a 4-bit clockwise direction code
//! (0 = up, 1 = up-right, ... 7 = up-left, 8 = released) carried in the four
//! bits the inbound packet names up/right/down/left. After every exchange the
//! driver replaces that code with four independent button states.

/// Direction reported by the d-pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DpadDirection {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
    #[default]
    Released = 8,
}

impl DpadDirection {
    /// Decode a 4-bit direction code. Every code from 8 to 15 is released.
    ///
    /// Code 0 decodes to [`DpadDirection::Up`]. An all-zero nibble (for
    /// example an empty bus) therefore reads as "up pressed".
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x0F {
            0 => Self::Up,
            1 => Self::UpRight,
            2 => Self::Right,
            3 => Self::DownRight,
            4 => Self::Down,
            5 => Self::DownLeft,
            6 => Self::Left,
            7 => Self::UpLeft,
            _ => Self::Released,
        }
    }

    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Independent button states for this direction.
    #[must_use]
    pub const fn buttons(self) -> DpadButtons {
        let code = self as u8;
        DpadButtons {
            up: matches!(code, 7 | 0 | 1),
            right: matches!(code, 1..=3),
            down: matches!(code, 3..=5),
            left: matches!(code, 5..=7),
        }
    }
}

/// Per-direction d-pad button states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DpadButtons {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl DpadButtons {
    /// Pack the four flags into a direction code nibble: `up + 2·right + 4·down + 8·left`.
    #[must_use]
    pub const fn code(self) -> u8 {
        (self.up as u8) | (self.right as u8) << 1 | (self.down as u8) << 2 | (self.left as u8) << 3
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self {
            up: code & 0b0001 != 0,
            right: code & 0b0010 != 0,
            down: code & 0b0100 != 0,
            left: code & 0b1000 != 0,
        }
    }
}
