//! Byte-order conversion for multi-byte packet fields.
//!
//! Two byte orders share the wire:
//!
//! - Pulse widths are written by the bridge's own microcontroller in its native
//!   little-endian order.
//! - IMU readings are forwarded untouched from the controller report, which
//!   stores them big-endian.
//!
//! All swaps happen here; field accessors only pick an offset.

/// Read a pulse width (µs) stored little-endian at `offset`.
#[inline]
#[must_use]
pub fn read_pulse_width(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

/// Write a pulse width (µs) little-endian at `offset`.
#[inline]
pub fn write_pulse_width(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

/// Read a signed IMU reading stored big-endian at `offset`.
#[inline]
#[must_use]
pub fn read_imu(buf: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([buf[offset], buf[offset + 1]])
}

/// Write a signed IMU reading big-endian at `offset`.
#[inline]
pub fn write_imu(buf: &mut [u8], offset: usize, value: i16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}
