//! RGB LED Indicator Module
//!
//! Derives the LED color from the light state and hands it to the LED driver.
//! The firmware LED task listens on [`LED_COLOR`]; the panel talks to it through
//! [`SignalLed`], so setting a color never waits on the PWM hardware.
use crate::system::state::{BrightnessStep, ColorTemperature};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Full-scale value of the blue channel in warm white
const WARM_BLUE_SCALE: u16 = 0x33;

/// Full-scale value of every other channel
const FULL_SCALE: u16 = 0xFF;

/// Channel values of the RGB LED, 0-255 each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// LED switched off
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color rendering a brightness step at a color temperature
    ///
    /// Cool scales all channels equally by the step. Warm scales red and green the
    /// same way but caps blue at `0x33`, which gives the warmer tint.
    pub const fn for_light(step: BrightnessStep, temperature: ColorTemperature) -> Self {
        let percent = step.percent() as u16;
        let level = (FULL_SCALE * percent / 100) as u8;
        let blue = match temperature {
            ColorTemperature::Cool => level,
            ColorTemperature::Warm => (WARM_BLUE_SCALE * percent / 100) as u8,
        };
        Rgb::new(level, level, blue)
    }
}

/// LED collaborator
///
/// Fire-and-forget: driver failures stay inside the implementation.
pub trait RgbLed {
    fn set_rgb(&mut self, color: Rgb);
}

/// Signal carrying the latest LED color to the LED task
///
/// Only the newest color matters, so a signal (which overwrites) is used instead of a channel.
pub static LED_COLOR: Signal<CriticalSectionRawMutex, Rgb> = Signal::new();

/// Publishes a new LED color
///
/// Synchronous, never waits for the LED task.
pub fn update(color: Rgb) {
    LED_COLOR.signal(color);
}

/// Waits for the next LED color
pub async fn wait() -> Rgb {
    LED_COLOR.wait().await
}

/// [`RgbLed`] that forwards colors to the LED task through [`LED_COLOR`]
pub struct SignalLed;

impl RgbLed for SignalLed {
    fn set_rgb(&mut self, color: Rgb) {
        update(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cool_scales_all_channels() {
        assert_eq!(
            Rgb::for_light(BrightnessStep::Full, ColorTemperature::Cool),
            Rgb::new(0xFF, 0xFF, 0xFF)
        );
        assert_eq!(
            Rgb::for_light(BrightnessStep::Half, ColorTemperature::Cool),
            Rgb::new(127, 127, 127)
        );
    }

    #[test]
    fn warm_attenuates_blue() {
        assert_eq!(
            Rgb::for_light(BrightnessStep::Full, ColorTemperature::Warm),
            Rgb::new(0xFF, 0xFF, 0x33)
        );
        assert_eq!(
            Rgb::for_light(BrightnessStep::Quarter, ColorTemperature::Warm),
            Rgb::new(63, 63, 12)
        );
    }

    #[test]
    fn closed_light_is_dark_in_both_temperatures() {
        assert_eq!(Rgb::for_light(BrightnessStep::Off, ColorTemperature::Warm), Rgb::OFF);
        assert_eq!(Rgb::for_light(BrightnessStep::Off, ColorTemperature::Cool), Rgb::OFF);
    }

    #[test]
    fn signal_led_publishes_latest_color() {
        let mut led = SignalLed;
        led.set_rgb(Rgb::new(1, 2, 3));
        led.set_rgb(Rgb::new(4, 5, 6));
        assert_eq!(LED_COLOR.try_take(), Some(Rgb::new(4, 5, 6)));
        assert_eq!(LED_COLOR.try_take(), None);
    }
}
