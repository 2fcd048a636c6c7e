//! Embassy tasks of the light panel firmware
pub mod announce;
pub mod knob;
pub mod rgb_led;
pub mod screen;
