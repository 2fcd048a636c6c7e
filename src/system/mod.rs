//! Core components of the light panel
pub mod arbiter;
pub mod event;
pub mod indicator;
pub mod input;
pub mod panel;
pub mod readout;
pub mod sound;
pub mod state;
pub mod tone;
pub mod tracker;
