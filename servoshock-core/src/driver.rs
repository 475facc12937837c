//! Servoshock: one bridge board on one SPI select line.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};
use servoshock_proto::{
    ControllerState, DpadDirection, InputPacket, OutputPacket, DPAD_BYTE, INPUT_PACKET_SIZE,
    PAD_BYTE,
};

use crate::error::Error;

/// Error type of [`Servoshock`] for a given bus and select pin.
pub type DriverError<SPI, CS> =
    Error<<SPI as spi::ErrorType>::Error, <CS as digital::ErrorType>::Error>;

/// Driver for a Servoshock 2 bridge board.
///
/// Owns the SPI bus, the board's select line and both packets. Each
/// [`update`](Self::update) clocks the current [`OutputPacket`] out while
/// clocking a fresh [`InputPacket`] in, in a single select-framed transaction.
///
/// The bus must already be configured for the bridge: SPI mode 0, MSB first,
/// and a clock the board can follow (1 MHz is known good). Do not update faster
/// than 100 Hz.
///
/// # Example
///
/// ```ignore
/// let mut servoshock = Servoshock::new(spi, select)?;
///
/// loop {
///     servoshock.update()?;
///
///     if servoshock.in_packet().button(Button::DpadUp) {
///         // ...
///     }
///
///     // Drive a servo from the host instead of the left stick.
///     servoshock.out_packet_mut().override_axis(Axis::LeftStickX, servo_us);
///
///     delay.delay_ms(10);
/// }
/// ```
pub struct Servoshock<SPI, CS> {
    spi: SPI,
    select: CS,
    out_packet: OutputPacket,
    in_packet: InputPacket,
    dpad: DpadDirection,
}

impl<SPI, CS> Servoshock<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Take ownership of the bus and select line and park the line high (idle).
    ///
    /// Both packets start zeroed: no output is overridden.
    pub fn new(spi: SPI, mut select: CS) -> Result<Self, DriverError<SPI, CS>> {
        select.set_high().map_err(Error::Select)?;
        Ok(Self {
            spi,
            select,
            out_packet: OutputPacket::new(),
            in_packet: InputPacket::new(),
            dpad: DpadDirection::Released,
        })
    }

    /// Exchange packets with the bridge once.
    pub fn update(&mut self) -> Result<(), DriverError<SPI, CS>> {
        self.exchange()
    }

    /// One full-duplex transaction.
    ///
    /// Asserts select, exchanges [`INPUT_PACKET_SIZE`] bytes in index order
    /// (outbound bytes first, then [`PAD_BYTE`] once the outbound packet runs
    /// out), storing each received byte at the same index of the inbound
    /// packet, then deasserts select and normalizes the d-pad bits.
    ///
    /// Select is deasserted even when the bus fails mid-packet. The inbound
    /// packet then holds a partial transfer; its d-pad bits are still
    /// normalized as long as the d-pad byte arrived.
    pub fn exchange(&mut self) -> Result<(), DriverError<SPI, CS>> {
        self.select.set_low().map_err(Error::Select)?;
        let mut stored = 0;
        let transferred = self.transfer_packets(&mut stored);
        let released = self.select.set_high().map_err(Error::Select);

        if stored > DPAD_BYTE {
            self.dpad = self.in_packet.normalize_dpad();
        }
        transferred?;
        released
    }

    /// Clock both packets, counting inbound bytes stored in `stored`.
    fn transfer_packets(&mut self, stored: &mut usize) -> Result<(), DriverError<SPI, CS>> {
        let outbound = self.out_packet.as_bytes();
        let inbound = self.in_packet.as_bytes_mut();
        debug_assert_eq!(inbound.len(), INPUT_PACKET_SIZE);

        for (index, slot) in inbound.iter_mut().enumerate() {
            let mut word = [outbound.get(index).copied().unwrap_or(PAD_BYTE)];
            self.spi.transfer_in_place(&mut word).map_err(Error::Bus)?;
            *slot = word[0];
            *stored = index + 1;
        }
        self.spi.flush().map_err(Error::Bus)
    }

    /// Set lightbar colour and blink durations (0-255, roughly 0-2.5 s).
    ///
    /// Only writes the values. Enable `Feedback::Led` on
    /// [`out_packet_mut`](Self::out_packet_mut) for them to take effect.
    pub fn set_led(&mut self, red: u8, green: u8, blue: u8, blink_on: u8, blink_off: u8) {
        self.out_packet.set_led(red, green, blue, blink_on, blink_off);
    }

    /// Packet sent on the next exchange.
    #[inline]
    #[must_use]
    pub fn out_packet(&self) -> &OutputPacket {
        &self.out_packet
    }

    #[inline]
    pub fn out_packet_mut(&mut self) -> &mut OutputPacket {
        &mut self.out_packet
    }

    /// Packet received on the last exchange.
    #[inline]
    #[must_use]
    pub fn in_packet(&self) -> &InputPacket {
        &self.in_packet
    }

    /// Decoded copy of the last inbound packet.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        ControllerState::from(&self.in_packet)
    }

    /// D-pad direction decoded on the last exchange.
    #[inline]
    #[must_use]
    pub fn dpad_direction(&self) -> DpadDirection {
        self.dpad
    }

    /// Give back the bus and select line.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.select)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    extern crate std;

    use embedded_hal::digital::{self, OutputPin};
    use embedded_hal::spi::{self, SpiBus};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Event {
        SelectLow,
        SelectHigh,
        Byte(u8),
        Flush,
    }

    pub type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MockBusError;

    impl spi::Error for MockBusError {
        fn kind(&self) -> spi::ErrorKind {
            spi::ErrorKind::Other
        }
    }

    /// SPI bus whose reply depends on the byte's position in the transaction.
    pub struct MockBus {
        pub log: Log,
        pub reply: fn(usize) -> u8,
        /// Fail the transfer of this transaction byte index.
        pub fail_at: Option<usize>,
    }

    impl MockBus {
        pub fn new(log: Log, reply: fn(usize) -> u8) -> Self {
            Self {
                log,
                reply,
                fail_at: None,
            }
        }

        fn position(&self) -> usize {
            self.log
                .borrow()
                .iter()
                .rev()
                .take_while(|e| **e != Event::SelectLow)
                .filter(|e| matches!(e, Event::Byte(_)))
                .count()
        }

        fn exchange(&mut self, out: u8) -> Result<u8, MockBusError> {
            let position = self.position();
            if self.fail_at == Some(position) {
                return Err(MockBusError);
            }
            self.log.borrow_mut().push(Event::Byte(out));
            Ok((self.reply)(position))
        }
    }

    impl spi::ErrorType for MockBus {
        type Error = MockBusError;
    }

    impl SpiBus<u8> for MockBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            for word in words.iter_mut() {
                *word = self.exchange(0)?;
            }
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            for &word in words {
                self.exchange(word)?;
            }
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            let len = read.len().max(write.len());
            for i in 0..len {
                let rx = self.exchange(write.get(i).copied().unwrap_or(0))?;
                if let Some(slot) = read.get_mut(i) {
                    *slot = rx;
                }
            }
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            for word in words.iter_mut() {
                *word = self.exchange(*word)?;
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Flush);
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MockSelectError;

    impl digital::Error for MockSelectError {
        fn kind(&self) -> digital::ErrorKind {
            digital::ErrorKind::Other
        }
    }

    pub struct MockSelect {
        pub log: Log,
        /// Refuse to deassert.
        pub fail_high: bool,
    }

    impl MockSelect {
        pub fn new(log: Log) -> Self {
            Self {
                log,
                fail_high: false,
            }
        }
    }

    impl digital::ErrorType for MockSelect {
        type Error = MockSelectError;
    }

    impl OutputPin for MockSelect {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::SelectLow);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail_high {
                return Err(MockSelectError);
            }
            self.log.borrow_mut().push(Event::SelectHigh);
            Ok(())
        }
    }

    /// Bytes clocked out during the last transaction.
    pub fn sent(log: &Log) -> Vec<u8> {
        let log = log.borrow();
        let start = log
            .iter()
            .rposition(|e| *e == Event::SelectLow)
            .map_or(0, |i| i + 1);
        log[start..]
            .iter()
            .filter_map(|e| match e {
                Event::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}
