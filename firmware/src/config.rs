//! Board wiring, bus timing and lightbar colours.
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | SPI0 SCK  | 18   | Bus clock |
//! | SPI0 MOSI | 19   | Host → bridge |
//! | SPI0 MISO | 16   | Bridge → host |
//! | Select    | 17   | Bridge slave select, active low |
//! | LED       | 25   | On-board LED (toggles on PS press) |
//!
//! Pins are taken by name in `main`; this table is the reference for wiring.

use servoshock_core::proto::Rgb;

/// SPI clock. The bridge is known to keep up at 1 MHz.
pub const SPI_FREQUENCY: u32 = 1_000_000;

/// Time between exchanges. The bridge must not be polled faster than 100 Hz.
pub const POLL_PERIOD_MS: u32 = 10;

/// Battery level at or below which the lightbar shows [`BATTERY_LOW_COLOR`].
pub const BATTERY_LOW: u8 = 2;
/// Battery level at or below which the lightbar shows [`BATTERY_MID_COLOR`].
pub const BATTERY_MID: u8 = 6;

pub const BATTERY_LOW_COLOR: Rgb = Rgb::new(255, 0, 0);
pub const BATTERY_MID_COLOR: Rgb = Rgb::new(255, 96, 0);
pub const BATTERY_HIGH_COLOR: Rgb = Rgb::new(0, 255, 0);

/// Lightbar colour for a battery level nibble.
#[must_use]
pub const fn battery_color(level: u8) -> Rgb {
    if level <= BATTERY_LOW {
        BATTERY_LOW_COLOR
    } else if level <= BATTERY_MID {
        BATTERY_MID_COLOR
    } else {
        BATTERY_HIGH_COLOR
    }
}
