//! Knob input rules
//!
//! Turns knob events into changes of the [`DisplayState`]. Rotation moves the
//! brightness one step per detent, with a short guard so a fast spin does not skip
//! through every level. A click toggles the color temperature.

use crate::system::event::Key;
use crate::system::state::{ColorTemperature, DisplayState, STEP_PERCENT};
use embassy_time::{Duration, Instant};

/// Minimum time between two accepted detents
pub const KEY_GUARD: Duration = Duration::from_millis(200);

/// Applies knob input to the display state
pub struct InputHandler {
    guard: Duration,
    last_key: Option<Instant>,
}

impl InputHandler {
    pub const fn new(guard: Duration) -> Self {
        Self {
            guard,
            last_key: None,
        }
    }

    /// Applies one detent
    ///
    /// Returns the signed brightness change in percent, or `None` when the detent
    /// arrived inside the guard window or the brightness is already at its limit.
    pub fn on_key(&mut self, state: &mut DisplayState, key: Key, now: Instant) -> Option<i8> {
        if let Some(last) = self.last_key {
            if now.saturating_duration_since(last) < self.guard {
                return None;
            }
        }
        self.last_key = Some(now);

        let previous = state.brightness;
        state.brightness = match key {
            Key::Right => previous.raised(),
            Key::Left => previous.lowered(),
        };

        match state.brightness.cmp(&previous) {
            core::cmp::Ordering::Greater => Some(STEP_PERCENT as i8),
            core::cmp::Ordering::Less => Some(-(STEP_PERCENT as i8)),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// Toggles the color temperature and returns the new one
    pub fn on_click(&self, state: &mut DisplayState) -> ColorTemperature {
        state.temperature = state.temperature.toggled();
        state.temperature
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(KEY_GUARD)
    }
}
