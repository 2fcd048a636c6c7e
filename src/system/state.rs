//! Light State
//!
//! The state shown on the panel: one discrete brightness step and one color
//! temperature. The UI control loop owns a [`DisplayState`] exclusively; nothing
//! else mutates it, so it carries no lock.
//!
//! # Brightness steps
//! The knob moves brightness in steps of 25% between 0% (light closed) and 100%.
//! Steps saturate at both ends instead of wrapping.

use crate::system::indicator::Rgb;

/// Percentage covered by one knob detent
pub const STEP_PERCENT: u8 = 25;

/// Discrete dimmer level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessStep {
    /// 0%, the light is closed
    Off,
    /// 25%
    Quarter,
    /// 50%
    Half,
    /// 75%
    ThreeQuarters,
    /// 100%
    Full,
}

impl BrightnessStep {
    /// All steps from darkest to brightest
    pub const ALL: [BrightnessStep; 5] = [
        BrightnessStep::Off,
        BrightnessStep::Quarter,
        BrightnessStep::Half,
        BrightnessStep::ThreeQuarters,
        BrightnessStep::Full,
    ];

    /// Brightness as a percentage (0, 25, 50, 75 or 100)
    pub const fn percent(self) -> u8 {
        self.index() * STEP_PERCENT
    }

    /// Position of the step, 0 for `Off` up to 4 for `Full`
    pub const fn index(self) -> u8 {
        match self {
            BrightnessStep::Off => 0,
            BrightnessStep::Quarter => 1,
            BrightnessStep::Half => 2,
            BrightnessStep::ThreeQuarters => 3,
            BrightnessStep::Full => 4,
        }
    }

    /// Next brighter step, saturating at `Full`
    pub const fn raised(self) -> Self {
        match self {
            BrightnessStep::Off => BrightnessStep::Quarter,
            BrightnessStep::Quarter => BrightnessStep::Half,
            BrightnessStep::Half => BrightnessStep::ThreeQuarters,
            BrightnessStep::ThreeQuarters | BrightnessStep::Full => BrightnessStep::Full,
        }
    }

    /// Next darker step, saturating at `Off`
    pub const fn lowered(self) -> Self {
        match self {
            BrightnessStep::Off | BrightnessStep::Quarter => BrightnessStep::Off,
            BrightnessStep::Half => BrightnessStep::Quarter,
            BrightnessStep::ThreeQuarters => BrightnessStep::Half,
            BrightnessStep::Full => BrightnessStep::ThreeQuarters,
        }
    }

    /// Flag of this step inside a [`StepSet`]
    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Color temperature of the light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorTemperature {
    /// Warm white, blue channel attenuated
    Warm,
    /// Cool white, all channels equal
    Cool,
}

impl ColorTemperature {
    /// The other temperature
    pub const fn toggled(self) -> Self {
        match self {
            ColorTemperature::Warm => ColorTemperature::Cool,
            ColorTemperature::Cool => ColorTemperature::Warm,
        }
    }
}

/// Brightness and color temperature currently selected on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Selected brightness step
    pub brightness: BrightnessStep,
    /// Selected color temperature
    pub temperature: ColorTemperature,
}

impl DisplayState {
    /// State the panel opens with: full brightness, warm
    pub const INITIAL: DisplayState = DisplayState {
        brightness: BrightnessStep::Full,
        temperature: ColorTemperature::Warm,
    };

    /// Creates a state from its two components
    pub const fn new(brightness: BrightnessStep, temperature: ColorTemperature) -> Self {
        Self {
            brightness,
            temperature,
        }
    }

    /// LED color that renders this state
    pub const fn led_color(&self) -> Rgb {
        Rgb::for_light(self.brightness, self.temperature)
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Set of brightness steps, one flag per step
///
/// Records which steps have an outstanding announcement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepSet(u8);

impl StepSet {
    /// Set without any step
    pub const EMPTY: StepSet = StepSet(0);

    /// Adds a step to the set
    pub fn insert(&mut self, step: BrightnessStep) {
        self.0 |= step.bit();
    }

    /// Whether the step is part of the set
    pub const fn contains(&self, step: BrightnessStep) -> bool {
        self.0 & step.bit() != 0
    }

    /// Whether no step is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Steps in the set, darkest first
    pub fn iter(&self) -> impl Iterator<Item = BrightnessStep> + '_ {
        BrightnessStep::ALL
            .into_iter()
            .filter(move |step| self.contains(*step))
    }
}
