//! Recording collaborators for tests.

use crate::system::indicator::{Rgb, RgbLed};
use crate::system::readout::Display;
use crate::system::sound::{AudioError, AudioOutput, Sound};
use crate::system::state::{BrightnessStep, ColorTemperature};
use crate::system::tracker::Notify;
use core::cell::RefCell;
use embassy_time::{with_timeout, Duration, Timer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Polls `done` until it holds, failing the test after five seconds
pub async fn wait_until(mut done: impl FnMut() -> bool) {
    let polled = with_timeout(Duration::from_secs(5), async {
        while !done() {
            Timer::after_millis(2).await;
        }
    })
    .await;
    assert!(polled.is_ok(), "condition not reached in time");
}

/// Display that remembers every rendered state
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub frames: Vec<(BrightnessStep, ColorTemperature)>,
}

impl Display for RecordingDisplay {
    fn render_state(&mut self, step: BrightnessStep, temperature: ColorTemperature) {
        self.frames.push((step, temperature));
    }
}

/// LED that remembers every color
#[derive(Debug, Default)]
pub struct RecordingLed {
    pub colors: Vec<Rgb>,
}

impl RgbLed for RecordingLed {
    fn set_rgb(&mut self, color: Rgb) {
        self.colors.push(color);
    }
}

/// Notification sink that remembers every step
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    steps: RefCell<Vec<BrightnessStep>>,
}

impl RecordingNotifier {
    pub fn steps(&self) -> Vec<BrightnessStep> {
        self.steps.borrow().clone()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&self, step: BrightnessStep) {
        self.steps.borrow_mut().push(step);
    }
}

/// Shared view on what one or more [`MockAudio`] devices did
#[derive(Debug, Default)]
pub struct SpeakerLog {
    played: Mutex<Vec<Sound>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SpeakerLog {
    /// Sounds whose playback ended, in order, failed ones included
    pub fn played(&self) -> Vec<Sound> {
        self.played.lock().unwrap().clone()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of `play` calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Audio device that "plays" for a fixed time
pub struct MockAudio<'a> {
    speaker: &'a SpeakerLog,
    duration: Duration,
    failure: Option<AudioError>,
}

impl<'a> MockAudio<'a> {
    pub fn new(speaker: &'a SpeakerLog, duration: Duration) -> Self {
        Self {
            speaker,
            duration,
            failure: None,
        }
    }

    /// Every playback ends with `error`
    pub fn failing(mut self, error: AudioError) -> Self {
        self.failure = Some(error);
        self
    }
}

impl AudioOutput for MockAudio<'_> {
    async fn play(&mut self, sound: Sound) -> Result<(), AudioError> {
        let running = self.speaker.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.speaker.max_in_flight.fetch_max(running, Ordering::SeqCst);

        Timer::after(self.duration).await;

        self.speaker.played.lock().unwrap().push(sound);
        self.speaker.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.failure.map_or(Ok(()), Err)
    }
}
