//! Bit-field descriptors over packet storage.
//!
//! Every named field in both packets is described by a [`BitField`]: a byte
//! offset, a shift and a width. Bit 0 is the least significant bit of the byte,
//! and fields inside one byte are packed upward from bit 0 in the order the
//! bridge firmware declares them. This ordering is part of the wire contract:
//! the remote device reads the same bytes.

/// A run of `width` bits starting at bit `shift` of byte `byte`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    pub byte: usize,
    pub shift: u8,
    pub width: u8,
}

impl BitField {
    /// Describe a field of `width` bits (1-8) at `shift` inside `byte`.
    #[must_use]
    pub const fn new(byte: usize, shift: u8, width: u8) -> Self {
        debug_assert!(width >= 1 && shift + width <= 8);
        Self { byte, shift, width }
    }

    /// Single-bit flag at `bit` of `byte`.
    #[must_use]
    pub const fn flag(byte: usize, bit: u8) -> Self {
        Self::new(byte, bit, 1)
    }

    /// Flag addressed by its absolute bit number (`byte * 8 + bit`).
    #[must_use]
    pub const fn flag_at(bit_index: usize) -> Self {
        Self::flag(bit_index / 8, (bit_index % 8) as u8)
    }

    /// Mask of this field within its byte.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Read the field, right-aligned.
    #[inline]
    #[must_use]
    pub fn get(self, buf: &[u8]) -> u8 {
        (buf[self.byte] & self.mask()) >> self.shift
    }

    /// Write the field. Bits of `value` above `width` are dropped; the rest of
    /// the byte is left untouched.
    #[inline]
    pub fn set(self, buf: &mut [u8], value: u8) {
        let mask = self.mask();
        buf[self.byte] = (buf[self.byte] & !mask) | ((value << self.shift) & mask);
    }

    #[inline]
    #[must_use]
    pub fn is_set(self, buf: &[u8]) -> bool {
        self.get(buf) != 0
    }

    #[inline]
    pub fn write(self, buf: &mut [u8], on: bool) {
        self.set(buf, u8::from(on));
    }
}
