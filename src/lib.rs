//! Two-color dimmable light panel
//!
//! Hardware agnostic core of a knob-driven light control screen. The panel keeps the
//! brightness step and color temperature, mirrors them onto an RGB LED and the screen,
//! and speaks the brightness level whenever it settles on a new step.
//!
//! The pieces talk to the outside world only through small collaborator traits
//! ([`system::readout::Display`], [`system::indicator::RgbLed`],
//! [`system::sound::AudioOutput`]), so the firmware binary plugs in real peripherals
//! while the tests plug in recording doubles.
//!
//! # Announcement pipeline
//! ```text
//! LightPanel::tick ──notify(step)──▶ Arbiter::run_dispatcher ──slot──▶ Arbiter::run_worker ──▶ AudioOutput::play
//! ```
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod system;

#[cfg(test)]
mod mock;
