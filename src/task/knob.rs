//! Knob handling
//!
//! Turns the rotary encoder and its push switch into panel events.

use crate::resources::{KnobButtonResources, KnobResources};
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};
use light_panel::system::event::{self, Events, Key};

/// Button hold threshold (ms)
const HOLD_DURATION: Duration = Duration::from_millis(700);

/// Button debounce delay (ms)
const DEBOUNCE_DURATION: Duration = Duration::from_millis(30);

/// Encoder contact settle time (ms)
const ENCODER_SETTLE: Duration = Duration::from_millis(2);

/// Rotary encoder handler
///
/// Each falling edge of phase A is one detent; phase B tells the direction.
#[embassy_executor::task]
pub async fn knob_rotation(r: KnobResources) {
    let mut phase_a = Input::new(r.encoder_a, Pull::Up);
    let phase_b = Input::new(r.encoder_b, Pull::Up);

    loop {
        phase_a.wait_for_falling_edge().await;
        Timer::after(ENCODER_SETTLE).await;
        if phase_a.is_high() {
            // bounce
            continue;
        }

        let key = if phase_b.is_high() {
            Key::Right
        } else {
            Key::Left
        };
        event::send(Events::Key(key)).await;
    }
}

/// Knob push switch handler
#[embassy_executor::task]
pub async fn knob_button(r: KnobButtonResources) {
    let mut btn = Input::new(r.button, Pull::Up);
    handle_button(&mut btn).await;
}

/// Turns switch presses into events
///
/// Generates:
/// - Clicked for short press
/// - LongPressed once the hold threshold is reached
async fn handle_button(button: &mut Input<'static>) {
    loop {
        if !settled_press(button).await {
            continue;
        }

        match select(Timer::after(HOLD_DURATION), settled_press(button)).await {
            Either::First(()) => {
                event::send(Events::LongPressed).await;
                button.wait_for_high().await;
            }
            Either::Second(_) => {
                event::send(Events::Clicked).await;
            }
        }
    }
}

/// Waits for the switch to change and stay changed, then reports whether it is held
///
/// The switch pulls the pin low while pressed.
async fn settled_press(button: &mut Input<'static>) -> bool {
    loop {
        let was_pressed = button.is_low();
        button.wait_for_any_edge().await;
        Timer::after(DEBOUNCE_DURATION).await;
        let pressed = button.is_low();
        if pressed != was_pressed {
            return pressed;
        }
    }
}
