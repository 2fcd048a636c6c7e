//! Screen readout
//!
//! What the screen shows for a light state, independent of any GUI toolkit.
//! A [`Display`] implementation turns the [`Readout`] into widgets.

use crate::system::state::{BrightnessStep, ColorTemperature};
use core::fmt;

/// GUI collaborator
///
/// Refreshing with the same state twice must be harmless.
pub trait Display {
    fn render_state(&mut self, step: BrightnessStep, temperature: ColorTemperature);
}

/// Percentage label under the step glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Label {
    /// "N%"
    Percent(u8),
    /// "--", the light is closed
    Closed,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Percent(percent) => write!(f, "{}%", percent),
            Label::Closed => f.write_str("--"),
        }
    }
}

/// Background artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Background {
    /// Dark background of a closed light
    Closed,
    /// Background tinted for the color temperature
    Tinted(ColorTemperature),
}

/// The single visible step glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Closed-light status glyph
    Closed,
    /// Step glyph in the variant of a color temperature
    Step(BrightnessStep, ColorTemperature),
}

/// Everything the screen shows for one light state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readout {
    pub label: Label,
    pub glyph: Glyph,
    pub background: Background,
}

impl Readout {
    pub const fn new(step: BrightnessStep, temperature: ColorTemperature) -> Self {
        match step {
            BrightnessStep::Off => Readout {
                label: Label::Closed,
                glyph: Glyph::Closed,
                background: Background::Closed,
            },
            _ => Readout {
                label: Label::Percent(step.percent()),
                glyph: Glyph::Step(step, temperature),
                background: Background::Tinted(temperature),
            },
        }
    }
}
