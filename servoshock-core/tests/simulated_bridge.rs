//! Driver against a simulated bridge board.
//!
//! The simulated board latches whatever the host clocks in and, on the next
//! transaction, mirrors overridden outputs back in the inbound packet the way
//! the real board reports what it is driving.

use core::convert::Infallible;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};
use proptest::prelude::*;
use servoshock_core::{
    Axis, Button, DpadDirection, Feedback, InputPacket, OutputPacket, Servoshock,
    INPUT_PACKET_SIZE, OUTPUT_PACKET_SIZE, PAD_BYTE,
};

#[derive(Default)]
struct SimulatedBridge {
    /// Inbound packet served on the next transaction.
    report: InputPacket,
    /// Every byte clocked in, across all transactions.
    received: Vec<u8>,
    flushes: usize,
}

impl SimulatedBridge {
    fn position(&self) -> usize {
        self.received.len() % INPUT_PACKET_SIZE
    }

    /// Last complete outbound packet the host sent.
    fn last_command(&self) -> Option<OutputPacket> {
        let start = self.received.len().checked_sub(INPUT_PACKET_SIZE)?;
        let mut bytes = [0u8; OUTPUT_PACKET_SIZE];
        bytes.copy_from_slice(&self.received[start..start + OUTPUT_PACKET_SIZE]);
        Some(OutputPacket::from_bytes(bytes))
    }

    /// Act on the last command: overridden channels take the host's value.
    fn apply(&mut self) {
        let Some(command) = self.last_command() else {
            return;
        };
        for axis in Axis::ALL {
            if command.axis_override(axis) {
                self.report
                    .set_output_pulse_width(axis, command.pulse_width(axis));
            }
        }
        for button in Button::ALL {
            if command.button_override(button) {
                self.report.set_output_button(button, command.button(button));
            }
        }
    }
}

impl spi::ErrorType for SimulatedBridge {
    type Error = Infallible;
}

impl SpiBus<u8> for SimulatedBridge {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            let mut w = [0];
            self.transfer_in_place(&mut w)?;
            *word = w[0];
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            self.transfer_in_place(&mut [word])?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        for i in 0..read.len().max(write.len()) {
            let mut w = [write.get(i).copied().unwrap_or(0)];
            self.transfer_in_place(&mut w)?;
            if let Some(slot) = read.get_mut(i) {
                *slot = w[0];
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            let reply = self.report.as_bytes()[self.position()];
            self.received.push(*word);
            *word = reply;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Default)]
struct Select {
    high: bool,
    cycles: usize,
}

impl digital::ErrorType for Select {
    type Error = Infallible;
}

impl OutputPin for Select {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.cycles += 1;
        }
        self.high = true;
        Ok(())
    }
}

fn connect(report: InputPacket) -> Servoshock<SimulatedBridge, Select> {
    let bridge = SimulatedBridge {
        report,
        ..SimulatedBridge::default()
    };
    Servoshock::new(bridge, Select::default()).unwrap()
}

#[test]
fn overrides_are_mirrored_on_next_update() {
    let mut servoshock = connect(InputPacket::new());
    servoshock
        .out_packet_mut()
        .override_axis(Axis::RightStickY, 1750);
    servoshock.out_packet_mut().override_button(Button::R2, true);

    servoshock.update().unwrap();
    assert_eq!(servoshock.in_packet().output_pulse_width(Axis::RightStickY), 0);

    let (mut bridge, select) = servoshock.release();
    bridge.apply();
    let mut servoshock = Servoshock::new(bridge, select).unwrap();
    *servoshock.out_packet_mut() = OutputPacket::new();
    servoshock.update().unwrap();

    let state = servoshock.state();
    assert_eq!(state.outputs.pulse_width(Axis::RightStickY), 1750);
    assert!(state.outputs.buttons.is_pressed(Button::R2));
    assert_eq!(state.outputs.pulse_width(Axis::LeftStickX), 0);
}

#[test]
fn controller_report_is_decoded() {
    let mut report = InputPacket::new();
    report.set_report_id(0x01);
    report.set_dpad_code(2); // right
    report.set_button(Button::Triangle, true);
    report.set_battery(8);

    let mut servoshock = connect(report);
    servoshock.update().unwrap();

    assert_eq!(servoshock.dpad_direction(), DpadDirection::Right);
    let state = servoshock.state();
    assert_eq!(state.report_id, 0x01);
    assert_eq!(state.battery, 8);
    assert!(state.buttons.is_pressed(Button::DpadRight));
    assert!(state.buttons.is_pressed(Button::Triangle));
    assert!(!state.buttons.is_pressed(Button::DpadUp));
}

#[test]
fn one_select_cycle_and_flush_per_update() {
    let mut servoshock = connect(InputPacket::new());
    for _ in 0..3 {
        servoshock.update().unwrap();
    }
    let (bridge, select) = servoshock.release();
    assert!(select.high);
    // One from construction plus one per update.
    assert_eq!(select.cycles, 4);
    assert_eq!(bridge.flushes, 3);
    assert_eq!(bridge.received.len(), 3 * INPUT_PACKET_SIZE);
}

#[test]
fn led_staging_needs_override_flag() {
    let mut servoshock = connect(InputPacket::new());
    servoshock.set_led(0, 0, 255, 10, 20);
    servoshock.update().unwrap();

    let (bridge, _select) = servoshock.release();
    let command = bridge.last_command().unwrap();
    assert!(!command.feedback_override(Feedback::Led));
    assert_eq!(command.as_bytes()[1..6], [0, 0, 255, 10, 20]);
}

proptest! {
    /// Whatever the packets hold, the wire carries the outbound packet then
    /// padding, and the inbound packet is the board's report bar the d-pad nibble.
    #[test]
    fn prop_exchange_wire_contract(
        out in proptest::collection::vec(any::<u8>(), OUTPUT_PACKET_SIZE),
        inp in proptest::collection::vec(any::<u8>(), INPUT_PACKET_SIZE),
    ) {
        let mut report_bytes = [0u8; INPUT_PACKET_SIZE];
        report_bytes.copy_from_slice(&inp);
        let mut servoshock = connect(InputPacket::from_bytes(report_bytes));
        servoshock.out_packet_mut().as_bytes_mut().copy_from_slice(&out);

        servoshock.update().unwrap();

        let received = servoshock.in_packet().as_bytes();
        for i in 0..INPUT_PACKET_SIZE {
            if i != 13 {
                prop_assert_eq!(received[i], report_bytes[i]);
            }
        }
        prop_assert_eq!(received[13] & 0xF0, report_bytes[13] & 0xF0);
        prop_assert_eq!(
            servoshock.dpad_direction(),
            DpadDirection::from_code(report_bytes[13] & 0x0F)
        );

        let (bridge, _select) = servoshock.release();
        prop_assert_eq!(&bridge.received[..OUTPUT_PACKET_SIZE], &out[..]);
        prop_assert!(bridge.received[OUTPUT_PACKET_SIZE..].iter().all(|&b| b == PAD_BYTE));
    }
}
