//! Input Events
//!
//! Defines the knob events and the channel that carries them from the input
//! tasks to the light panel.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};

/// Capacity of the input event channel
pub const EVENT_CAPACITY: usize = 10;

/// Multi-producer, single-consumer input channel
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Events, EVENT_CAPACITY> =
    Channel::new();

/// Sends an event to the panel
pub async fn send(event: Events) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Receiving end handed to the panel loop
pub fn receiver() -> Receiver<'static, CriticalSectionRawMutex, Events, EVENT_CAPACITY> {
    EVENT_CHANNEL.receiver()
}

/// Knob events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Events {
    /// Knob rotated one detent
    Key(Key),
    /// Knob pressed and released
    Clicked,
    /// Knob held down past the hold threshold
    LongPressed,
}

/// Rotation direction of one detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Counter-clockwise, darker
    Left,
    /// Clockwise, brighter
    Right,
}
