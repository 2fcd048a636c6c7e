//! Brightness State Tracker
//!
//! Runs on every UI tick and compares the live [`DisplayState`] against the state
//! it last acted on. On a difference it records the new state first, then drives
//! the LED and the screen, and finally emits one change notification when the
//! brightness step moved. Color temperature changes refresh LED and screen but are
//! never announced.
//!
//! The shadow starts out empty, so the first tick after entering the screen always
//! renders and announces the initial state.

use crate::system::indicator::RgbLed;
use crate::system::readout::Display;
use crate::system::state::{BrightnessStep, DisplayState};

/// Receiver of brightness change notifications
///
/// `notify` is fire-and-forget and must be callable at any time.
pub trait Notify {
    fn notify(&self, step: BrightnessStep);
}

/// Change detector for the light state
#[derive(Debug, Default)]
pub struct StateTracker {
    last: Option<DisplayState>,
}

impl StateTracker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// State the tracker last acted on
    pub fn last_announced(&self) -> Option<DisplayState> {
        self.last
    }

    /// Forgets the shadow state so the next tick refreshes everything
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Evaluates the live state once
    ///
    /// Returns the step that was announced, if any. Never blocks.
    pub fn tick<D, L, N>(
        &mut self,
        current: DisplayState,
        display: &mut D,
        led: &mut L,
        announcer: &N,
    ) -> Option<BrightnessStep>
    where
        D: Display,
        L: RgbLed,
        N: Notify + ?Sized,
    {
        if self.last == Some(current) {
            return None;
        }
        // Shadow first, so the same value can never trigger twice.
        let previous = self.last.replace(current);

        led.set_rgb(current.led_color());
        display.render_state(current.brightness, current.temperature);

        if previous.is_some_and(|previous| previous.brightness == current.brightness) {
            debug!("Color temperature changed to {:?}", current.temperature);
            return None;
        }

        info!("Brightness settled at {}%", current.brightness.percent());
        announcer.notify(current.brightness);
        Some(current.brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingDisplay, RecordingLed, RecordingNotifier};
    use crate::system::indicator::Rgb;
    use crate::system::state::ColorTemperature;

    fn doubles() -> (RecordingDisplay, RecordingLed, RecordingNotifier) {
        Default::default()
    }

    fn state(step: BrightnessStep, temperature: ColorTemperature) -> DisplayState {
        DisplayState::new(step, temperature)
    }

    #[test]
    fn first_tick_refreshes_and_announces() {
        let (mut display, mut led, notifier) = doubles();
        let mut tracker = StateTracker::new();

        let announced = tracker.tick(DisplayState::INITIAL, &mut display, &mut led, &notifier);

        assert_eq!(announced, Some(BrightnessStep::Full));
        assert_eq!(tracker.last_announced(), Some(DisplayState::INITIAL));
        assert_eq!(led.colors, [Rgb::new(0xFF, 0xFF, 0x33)]);
        assert_eq!(display.frames, [(BrightnessStep::Full, ColorTemperature::Warm)]);
        assert_eq!(notifier.steps(), [BrightnessStep::Full]);
    }

    #[test]
    fn unchanged_state_is_a_no_op() {
        let (mut display, mut led, notifier) = doubles();
        let mut tracker = StateTracker::new();

        for _ in 0..50 {
            tracker.tick(DisplayState::INITIAL, &mut display, &mut led, &notifier);
        }

        assert_eq!(notifier.steps().len(), 1);
        assert_eq!(led.colors.len(), 1);
        assert_eq!(display.frames.len(), 1);
    }

    #[test]
    fn single_transition_notifies_once() {
        let (mut display, mut led, notifier) = doubles();
        let mut tracker = StateTracker::new();
        tracker.tick(DisplayState::INITIAL, &mut display, &mut led, &notifier);

        let dimmed = state(BrightnessStep::ThreeQuarters, ColorTemperature::Warm);
        tracker.tick(dimmed, &mut display, &mut led, &notifier);
        tracker.tick(dimmed, &mut display, &mut led, &notifier);

        assert_eq!(
            notifier.steps(),
            [BrightnessStep::Full, BrightnessStep::ThreeQuarters]
        );
        assert_eq!(tracker.last_announced(), Some(dimmed));
    }

    #[test]
    fn temperature_change_recolors_without_announcing() {
        let (mut display, mut led, notifier) = doubles();
        let mut tracker = StateTracker::new();
        tracker.tick(DisplayState::INITIAL, &mut display, &mut led, &notifier);

        let cool = state(BrightnessStep::Full, ColorTemperature::Cool);
        assert_eq!(tracker.tick(cool, &mut display, &mut led, &notifier), None);

        assert_eq!(notifier.steps(), [BrightnessStep::Full]);
        assert_eq!(led.colors.last(), Some(&Rgb::new(0xFF, 0xFF, 0xFF)));
        assert_eq!(
            display.frames.last(),
            Some(&(BrightnessStep::Full, ColorTemperature::Cool))
        );
    }

    #[test]
    fn notifications_follow_clamped_sequence() {
        let (mut display, mut led, notifier) = doubles();
        let mut tracker = StateTracker::new();
        let mut live = DisplayState::INITIAL;
        let mut expected = Vec::new();

        // +25 past the ceiling, then all the way down past the floor
        let deltas = [25i8, -25, -25, -25, -25, -25, -25, 25];
        tracker.tick(live, &mut display, &mut led, &notifier);
        expected.push(live.brightness);
        for delta in deltas {
            let next = if delta > 0 {
                live.brightness.raised()
            } else {
                live.brightness.lowered()
            };
            if next != live.brightness {
                expected.push(next);
            }
            live.brightness = next;
            tracker.tick(live, &mut display, &mut led, &notifier);
            tracker.tick(live, &mut display, &mut led, &notifier);
        }

        assert_eq!(notifier.steps(), expected);
        assert_eq!(tracker.last_announced(), Some(live));
    }

    #[test]
    fn reset_forces_refresh() {
        let (mut display, mut led, notifier) = doubles();
        let mut tracker = StateTracker::new();
        tracker.tick(DisplayState::INITIAL, &mut display, &mut led, &notifier);

        tracker.reset();
        tracker.tick(DisplayState::INITIAL, &mut display, &mut led, &notifier);

        assert_eq!(notifier.steps().len(), 2);
    }
}
