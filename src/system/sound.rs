//! Announcement catalog and audio collaborator
//!
//! Every brightness step has exactly one spoken announcement. The audio device
//! plays one sound at a time and `play` only returns once playback is over.

use crate::system::state::BrightnessStep;

/// Sounds the panel can announce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sound {
    /// "Light closed"
    LightOff,
    /// "25 percent"
    Light25,
    /// "50 percent"
    Light50,
    /// "75 percent"
    Light75,
    /// "100 percent"
    Light100,
}

impl Sound {
    /// Announcement for a brightness step
    pub const fn for_step(step: BrightnessStep) -> Self {
        match step {
            BrightnessStep::Off => Sound::LightOff,
            BrightnessStep::Quarter => Sound::Light25,
            BrightnessStep::Half => Sound::Light50,
            BrightnessStep::ThreeQuarters => Sound::Light75,
            BrightnessStep::Full => Sound::Light100,
        }
    }
}

/// Failures reported by the audio device
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// The output peripheral rejected the request
    #[error("audio device failure")]
    Device,
    /// The sound data could not be decoded
    #[error("sound could not be decoded")]
    Decode,
    /// The device is still busy with another sound
    #[error("audio device busy")]
    Busy,
}

/// Audio collaborator
///
/// `play` occupies the caller until the sound has finished or failed.
#[allow(async_fn_in_trait)]
pub trait AudioOutput {
    async fn play(&mut self, sound: Sound) -> Result<(), AudioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_has_its_own_sound() {
        let sounds = BrightnessStep::ALL.map(Sound::for_step);
        assert_eq!(
            sounds,
            [
                Sound::LightOff,
                Sound::Light25,
                Sound::Light50,
                Sound::Light75,
                Sound::Light100
            ]
        );
    }
}
