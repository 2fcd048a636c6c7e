//! Hardware Resource Management
//!
//! Assigns the RP2350 pins and PWM slices to the tasks that own them.
//! Every group is moved into exactly one task, so no peripheral is shared.
//!
//! # Resource Groups
//! - RGB LED: three PWM-driven channels of the light preview LED
//! - Knob: quadrature encoder inputs
//! - Knob button: push switch of the knob
//! - Buzzer: PWM output of the passive buzzer used for announcements

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// PWM-controlled RGB LED pins, channel A of three slices
    rgb_led: RgbLedResources {
        pwm_red: PWM_SLICE1,
        red_pin: PIN_2,
        pwm_green: PWM_SLICE2,
        green_pin: PIN_4,
        pwm_blue: PWM_SLICE3,
        blue_pin: PIN_6,
    },
    /// Rotary encoder phases
    knob: KnobResources {
        encoder_a: PIN_16,
        encoder_b: PIN_17,
    },
    /// Rotary encoder push switch, active low
    knob_button: KnobButtonResources {
        button: PIN_18,
    },
    /// Passive buzzer
    buzzer: BuzzerResources {
        pwm: PWM_SLICE4,
        pin: PIN_8,
    },
}
