//! Tone patterns
//!
//! Renders each announcement as a short tone sequence on a square-wave output
//! such as a passive buzzer.

use crate::system::sound::{AudioError, AudioOutput, Sound};
use embassy_time::{Duration, Timer};

/// Square-wave output
pub trait ToneOutput {
    /// Starts a tone at `hz`, replacing the current one
    fn tone(&mut self, hz: u32) -> Result<(), AudioError>;
    fn silence(&mut self);
}

/// One element of a tone pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Note {
    /// Tone frequency, 0 is a rest
    hz: u32,
    duration: Duration,
}

impl Note {
    const fn tone(hz: u32, ms: u64) -> Self {
        Self {
            hz,
            duration: Duration::from_millis(ms),
        }
    }

    const fn rest(ms: u64) -> Self {
        Self::tone(0, ms)
    }
}

/// Falling two-tone chime for the closed light
const LIGHT_OFF: &[Note] = &[Note::tone(880, 120), Note::rest(40), Note::tone(440, 240)];
const LIGHT_25: &[Note] = &[Note::tone(660, 120)];
const LIGHT_50: &[Note] = &[Note::tone(660, 120), Note::rest(80), Note::tone(784, 120)];
const LIGHT_75: &[Note] = &[
    Note::tone(660, 120),
    Note::rest(80),
    Note::tone(784, 120),
    Note::rest(80),
    Note::tone(988, 120),
];
const LIGHT_100: &[Note] = &[
    Note::tone(660, 120),
    Note::rest(80),
    Note::tone(784, 120),
    Note::rest(80),
    Note::tone(988, 120),
    Note::rest(80),
    Note::tone(1320, 240),
];

/// Tone sequence announcing `sound`
fn pattern(sound: Sound) -> &'static [Note] {
    match sound {
        Sound::LightOff => LIGHT_OFF,
        Sound::Light25 => LIGHT_25,
        Sound::Light50 => LIGHT_50,
        Sound::Light75 => LIGHT_75,
        Sound::Light100 => LIGHT_100,
    }
}

/// Plays announcements as tone patterns on a [`ToneOutput`]
pub struct TonePlayer<T> {
    output: T,
}

impl<T: ToneOutput> TonePlayer<T> {
    pub fn new(output: T) -> Self {
        Self { output }
    }
}

impl<T: ToneOutput> AudioOutput for TonePlayer<T> {
    async fn play(&mut self, sound: Sound) -> Result<(), AudioError> {
        // Silenced on every exit, including a dropped future
        let mut sounding = Sounding(&mut self.output);
        for note in pattern(sound) {
            if note.hz == 0 {
                sounding.0.silence();
            } else {
                sounding.0.tone(note.hz)?;
            }
            Timer::after(note.duration).await;
        }
        Ok(())
    }
}

/// Silences the output when dropped
struct Sounding<'a, T: ToneOutput>(&'a mut T);

impl<T: ToneOutput> Drop for Sounding<'_, T> {
    fn drop(&mut self) {
        self.0.silence();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::with_timeout;

    #[derive(Debug, Default)]
    struct RecordingTone {
        calls: Vec<Option<u32>>,
        reject: Option<u32>,
    }

    impl RecordingTone {
        fn sounding(&self) -> bool {
            matches!(self.calls.last(), Some(Some(_)))
        }
    }

    impl ToneOutput for RecordingTone {
        fn tone(&mut self, hz: u32) -> Result<(), AudioError> {
            if self.reject == Some(hz) {
                return Err(AudioError::Device);
            }
            self.calls.push(Some(hz));
            Ok(())
        }

        fn silence(&mut self) {
            self.calls.push(None);
        }
    }

    #[test]
    fn every_sound_has_a_distinct_pattern() {
        let sounds = [
            Sound::LightOff,
            Sound::Light25,
            Sound::Light50,
            Sound::Light75,
            Sound::Light100,
        ];
        for (i, a) in sounds.iter().enumerate() {
            assert!(!pattern(*a).is_empty());
            for b in &sounds[i + 1..] {
                assert_ne!(pattern(*a), pattern(*b));
            }
        }
    }

    #[test]
    fn finished_pattern_ends_silent() {
        let mut player = TonePlayer::new(RecordingTone::default());

        assert_eq!(block_on(player.play(Sound::Light50)), Ok(()));

        assert_eq!(
            player.output.calls,
            [Some(660), None, Some(784), None]
        );
    }

    #[test]
    fn cancelled_pattern_is_silenced() {
        let mut player = TonePlayer::new(RecordingTone::default());

        let result = block_on(with_timeout(
            Duration::from_millis(50),
            player.play(Sound::Light100),
        ));

        assert!(result.is_err());
        assert_eq!(player.output.calls.first(), Some(&Some(660)));
        assert!(!player.output.sounding());
    }

    #[test]
    fn rejected_tone_fails_silently() {
        let mut player = TonePlayer::new(RecordingTone {
            reject: Some(784),
            ..Default::default()
        });

        assert_eq!(
            block_on(player.play(Sound::Light75)),
            Err(AudioError::Device)
        );
        assert_eq!(player.output.calls, [Some(660), None, None]);
    }
}
