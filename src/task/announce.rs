//! Announcement tasks
//!
//! Hosts the two long-lived halves of the announcement arbiter: the dispatcher
//! and the single playback worker. The worker owns the buzzer, which renders
//! each announcement as a short tone pattern.

use crate::resources::BuzzerResources;
use defmt::info;
use embassy_rp::pwm::{self, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use light_panel::system::arbiter::Arbiter;
use light_panel::system::sound::AudioError;
use light_panel::system::tone::{TonePlayer, ToneOutput};

/// Passive buzzer on one PWM channel
struct Buzzer {
    pwm: Pwm<'static>,
}

impl Buzzer {
    fn new(r: BuzzerResources) -> Self {
        Self {
            pwm: Pwm::new_output_a(r.pwm, r.pin, pwm::Config::default()),
        }
    }
}

impl ToneOutput for Buzzer {
    /// Square wave at `hz` with 50% duty
    fn tone(&mut self, hz: u32) -> Result<(), AudioError> {
        let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();
        let cycles = clock_freq_hz.checked_div(hz).ok_or(AudioError::Device)?;

        // Smallest divider that keeps the period within 16 bits
        let divider = u8::try_from(cycles / 65535 + 1).map_err(|_| AudioError::Device)?;
        let top = (clock_freq_hz / (hz * divider as u32)) as u16 - 1;

        let mut config = pwm::Config::default();
        config.divider = divider.into();
        config.top = top;
        config.compare_a = top / 2;
        self.pwm.set_config(&config);
        Ok(())
    }

    fn silence(&mut self) {
        let mut config = pwm::Config::default();
        config.compare_a = 0;
        self.pwm.set_config(&config);
    }
}

/// Announcement dispatcher task
#[embassy_executor::task]
pub async fn announce_dispatch(arbiter: &'static Arbiter<CriticalSectionRawMutex>) {
    arbiter.run_dispatcher().await;
    info!("Announcement dispatch task finished");
}

/// Announcement worker task, sole user of the buzzer
#[embassy_executor::task]
pub async fn announce_worker(
    arbiter: &'static Arbiter<CriticalSectionRawMutex>,
    r: BuzzerResources,
) {
    let mut buzzer = TonePlayer::new(Buzzer::new(r));
    arbiter.run_worker(&mut buzzer).await;
    info!("Announcement worker task finished");
}
