//! Human-readable logging of controller state changes.

use defmt::{debug, info};
use servoshock_core::{Button, ControllerState};

/// Logs what changed between consecutive controller states.
pub struct StateReporter {
    previous: ControllerState,
}

impl StateReporter {
    pub fn new() -> Self {
        Self {
            previous: ControllerState::default(),
        }
    }

    /// Log the differences from the previous state.
    ///
    /// Returns `true` when PS went down in this state.
    pub fn report(&mut self, state: &ControllerState) -> bool {
        let previous = &self.previous;

        if state.report_id != previous.report_id {
            info!("Controller report id {=u8:#x}", state.report_id);
        }
        for button in state.pressed_since(previous).iter() {
            info!("Pressed {}", button);
        }
        for button in state.released_since(previous).iter() {
            debug!("Released {}", button);
        }
        if state.battery != previous.battery {
            info!("Battery level {}", state.battery);
        }
        if state.usb_connected != previous.usb_connected {
            let link = if state.usb_connected {
                "connected"
            } else {
                "disconnected"
            };
            info!("Controller USB data {}", link);
        }

        let ps_pressed = state.pressed_since(previous).is_pressed(Button::Ps);
        self.previous = *state;
        ps_pressed
    }
}

impl Default for StateReporter {
    fn default() -> Self {
        Self::new()
    }
}
