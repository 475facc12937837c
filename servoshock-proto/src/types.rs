//! Channel identifiers and small value types shared by both packets.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Number of servo-style axes the bridge can drive.
pub const AXIS_COUNT: usize = 12;

/// Number of digital outputs (d-pad directions and buttons).
pub const BUTTON_COUNT: usize = 18;

/// Servo-style output channel, driven as a pulse width in microseconds.
///
/// Discriminants follow the order of the override bits, the outbound pulse
/// width table and the inbound output-state mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Axis {
    LeftStickX = 0,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
    /// Touchpad left half, X.
    LeftTouchX,
    LeftTouchY,
    /// Touchpad right half, X.
    RightTouchX,
    RightTouchY,
    TiltX,
    TiltY,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::LeftStickX,
        Axis::LeftStickY,
        Axis::RightStickX,
        Axis::RightStickY,
        Axis::LeftTrigger,
        Axis::RightTrigger,
        Axis::LeftTouchX,
        Axis::LeftTouchY,
        Axis::RightTouchX,
        Axis::RightTouchY,
        Axis::TiltX,
        Axis::TiltY,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Digital output channel.
///
/// Discriminants follow the "output order" shared by the outbound override
/// bits, the outbound button values and the inbound output-state mirror. The
/// live controller buttons in the inbound report use a different order; see
/// [`InputPacket::button`](crate::InputPacket::button).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    DpadUp = 0,
    DpadRight,
    DpadDown,
    DpadLeft,
    Triangle,
    Circle,
    Cross,
    Square,
    L1,
    R1,
    /// Digital threshold of the left trigger.
    L2,
    R2,
    /// Left stick press.
    L3,
    R3,
    Share,
    Options,
    TouchpadPress,
    Ps,
}

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::DpadUp,
        Button::DpadRight,
        Button::DpadDown,
        Button::DpadLeft,
        Button::Triangle,
        Button::Circle,
        Button::Cross,
        Button::Square,
        Button::L1,
        Button::R1,
        Button::L2,
        Button::R2,
        Button::L3,
        Button::R3,
        Button::Share,
        Button::Options,
        Button::TouchpadPress,
        Button::Ps,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Controller feedback channels that can be taken over by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Feedback {
    /// Lightbar colour and blink pattern.
    Led = 0,
    /// Left, heavy rumble motor.
    RumbleLow,
    /// Right, light rumble motor.
    RumbleHigh,
}

impl Feedback {
    pub const ALL: [Feedback; 3] = [Feedback::Led, Feedback::RumbleLow, Feedback::RumbleHigh];
}

/// Set of [`Button`]s, one bit per button in output order.
///
/// # Example
///
/// ```
/// use servoshock_proto::{Button, Buttons};
///
/// let buttons = Buttons::from(Button::Cross) | Buttons::from(Button::L1);
/// assert!(buttons.is_pressed(Button::Cross));
/// assert!(!buttons.is_pressed(Button::Circle));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u32);

impl Buttons {
    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn of(button: Button) -> Self {
        Self(1 << button.index())
    }

    /// Check if every button in `other` is pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Buttons) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    #[must_use]
    pub const fn is_pressed(self, button: Button) -> bool {
        self.contains(Self::of(button))
    }

    /// Set or clear a button.
    #[inline]
    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.0 |= Self::of(button).0;
        } else {
            self.0 &= !Self::of(button).0;
        }
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the pressed buttons in output order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |&b| self.is_pressed(b))
    }
}

impl From<Button> for Buttons {
    fn from(button: Button) -> Self {
        Self::of(button)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Raw analog stick position, 0-255 per axis.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stick {
    pub x: u8,
    pub y: u8,
}

impl Stick {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Three-axis IMU reading in raw sensor counts.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vector3 {
    #[must_use]
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Lightbar colour.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Lightbar blink pattern.
///
/// Durations are in device-defined units: 0-255 covers roughly 0-2.5 s on a
/// non-linear scale owned by the controller. Both zero means steady.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedBlink {
    pub on: u8,
    pub off: u8,
}
