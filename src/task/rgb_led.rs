//! RGB LED Module
//!
//! Drives the light preview LED. The panel publishes colors through the
//! indicator signal; this task only mirrors the latest one onto the PWM outputs.
use crate::resources::RgbLedResources;
use defmt::info;
use embassy_rp::pwm;
use embassy_rp::pwm::SetDutyCycle;
use light_panel::system::indicator;

/// PWM frequency of the LED channels
const LED_PWM_FREQ_HZ: u32 = 100;

/// Full-scale channel value of an [`indicator::Rgb`]
const CHANNEL_MAX: u16 = u8::MAX as u16;

/// Mirrors the published LED color onto the three PWM channels.
#[embassy_executor::task]
pub async fn rgb_led(r: RgbLedResources) {
    info!("RGB LED task started");

    let clock_freq_hz = embassy_rp::clocks::clk_sys_freq(); // 150MHz

    // Calculate minimum divider needed to keep period under 16-bit limit (65535)
    let divider = ((clock_freq_hz / LED_PWM_FREQ_HZ) / 65535 + 1) as u8;
    let period = (clock_freq_hz / (LED_PWM_FREQ_HZ * divider as u32)) as u16 - 1;

    let mut config = pwm::Config::default();
    config.divider = divider.into();
    config.top = period;

    let mut pwm_red = pwm::Pwm::new_output_a(r.pwm_red, r.red_pin, config.clone());
    let mut pwm_green = pwm::Pwm::new_output_a(r.pwm_green, r.green_pin, config.clone());
    let mut pwm_blue = pwm::Pwm::new_output_a(r.pwm_blue, r.blue_pin, config);

    // off until the panel renders its first state
    let _ = pwm_red.set_duty_cycle_fully_off();
    let _ = pwm_green.set_duty_cycle_fully_off();
    let _ = pwm_blue.set_duty_cycle_fully_off();

    loop {
        let color = indicator::wait().await;
        info!("LED color {:?}", color);

        // Driver errors are not surfaced, the next color overwrites anyway
        let _ = pwm_red.set_duty_cycle_fraction(color.r as u16, CHANNEL_MAX);
        let _ = pwm_green.set_duty_cycle_fraction(color.g as u16, CHANNEL_MAX);
        let _ = pwm_blue.set_duty_cycle_fraction(color.b as u16, CHANNEL_MAX);
    }
}
