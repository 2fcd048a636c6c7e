//! Light Panel
//!
//! The UI control loop of the two-color light screen. It owns the live
//! [`DisplayState`], applies knob events to it as they arrive, and lets the
//! [`StateTracker`] evaluate it on a fixed tick. Nothing else touches the state,
//! so it needs no lock.

use crate::system::event::Events;
use crate::system::indicator::{Rgb, RgbLed};
use crate::system::input::{InputHandler, KEY_GUARD};
use crate::system::readout::Display;
use crate::system::state::{BrightnessStep, DisplayState};
use crate::system::tracker::{Notify, StateTracker};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Instant, Ticker};

/// Period of the state evaluation tick
pub const TICK_PERIOD: Duration = Duration::from_millis(20);

/// Panel tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    pub tick_period: Duration,
    /// Minimum time between two accepted knob detents
    pub key_guard: Duration,
    /// State shown when the screen is entered
    pub initial: DisplayState,
}

impl PanelConfig {
    pub const DEFAULT: PanelConfig = PanelConfig {
        tick_period: TICK_PERIOD,
        key_guard: KEY_GUARD,
        initial: DisplayState::INITIAL,
    };
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Returned when the user leaves the screen with a long press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelExit;

/// Light control screen
pub struct LightPanel<'a, D, L, A: ?Sized> {
    initial: DisplayState,
    state: DisplayState,
    tracker: StateTracker,
    input: InputHandler,
    tick_period: Duration,
    display: D,
    led: L,
    announcer: &'a A,
}

impl<'a, D, L, A> LightPanel<'a, D, L, A>
where
    D: Display,
    L: RgbLed,
    A: Notify + ?Sized,
{
    pub fn new(config: PanelConfig, display: D, led: L, announcer: &'a A) -> Self {
        Self {
            initial: config.initial,
            state: config.initial,
            tracker: StateTracker::new(),
            input: InputHandler::new(config.key_guard),
            tick_period: config.tick_period,
            display,
            led,
            announcer,
        }
    }

    /// Live state, including changes the next tick has not picked up yet
    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    /// Applies one knob event
    ///
    /// Returns [`PanelExit`] when the event leaves the screen.
    pub fn handle_event(&mut self, event: Events, now: Instant) -> Option<PanelExit> {
        match event {
            Events::Key(key) => {
                if let Some(delta) = self.input.on_key(&mut self.state, key, now) {
                    debug!("Brightness {}", delta);
                }
                None
            }
            Events::Clicked => {
                self.input.on_click(&mut self.state);
                None
            }
            Events::LongPressed => Some(self.exit()),
        }
    }

    /// Evaluates the live state once
    pub fn tick(&mut self) -> Option<BrightnessStep> {
        self.tracker
            .tick(self.state, &mut self.display, &mut self.led, self.announcer)
    }

    /// Prepares the screen for entering it again
    ///
    /// Restores the initial state; the next tick refreshes LED and screen and
    /// announces it like a first entry.
    pub fn reenter(&mut self) {
        self.state = self.initial;
        self.tracker.reset();
    }

    /// Leaves the screen and switches the light off
    pub fn exit(&mut self) -> PanelExit {
        info!("Leaving light panel");
        self.led.set_rgb(Rgb::OFF);
        PanelExit
    }

    /// Runs the screen until the user leaves it
    pub async fn run<M: RawMutex, const N: usize>(
        &mut self,
        events: Receiver<'_, M, Events, N>,
    ) -> PanelExit {
        info!("Light panel entered");
        let mut ticker = Ticker::every(self.tick_period);
        loop {
            match select(ticker.next(), events.receive()).await {
                Either::First(()) => {
                    self.tick();
                }
                Either::Second(event) => {
                    if let Some(exit) = self.handle_event(event, Instant::now()) {
                        return exit;
                    }
                }
            }
        }
    }
}
