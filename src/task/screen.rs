//! Light panel screen task
//!
//! Runs the light control screen. A long press leaves the screen and switches
//! the light off; the next long press enters it again with a fresh state.

use defmt::info;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use light_panel::system::arbiter::Arbiter;
use light_panel::system::event::{self, Events};
use light_panel::system::indicator::SignalLed;
use light_panel::system::panel::{LightPanel, PanelConfig};
use light_panel::system::readout::{Display, Readout};
use light_panel::system::state::{BrightnessStep, ColorTemperature};

/// Screen that reports its readout on the log
struct LogDisplay;

impl Display for LogDisplay {
    fn render_state(&mut self, step: BrightnessStep, temperature: ColorTemperature) {
        let readout = Readout::new(step, temperature);
        info!(
            "Screen: label {:?}, glyph {:?}, background {:?}",
            readout.label, readout.glyph, readout.background
        );
    }
}

#[embassy_executor::task]
pub async fn screen(arbiter: &'static Arbiter<CriticalSectionRawMutex>) {
    let mut panel = LightPanel::new(PanelConfig::DEFAULT, LogDisplay, SignalLed, arbiter);
    loop {
        panel.run(event::receiver()).await;

        info!("Light panel closed, long press to reopen");
        while event::receiver().receive().await != Events::LongPressed {}
        panel.reenter();
    }
}
