//! Light panel firmware entry point
//!
//! Initializes the RP2350, assigns the peripherals and spawns the panel tasks.

#![no_std]
#![no_main]

use crate::task::{
    announce::{announce_dispatch, announce_worker},
    knob::{knob_button, knob_rotation},
    rgb_led::rgb_led,
    screen::screen,
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use light_panel::system::arbiter::{Arbiter, ArbiterConfig};
use resources::{
    AssignedResources, BuzzerResources, KnobButtonResources, KnobResources, RgbLedResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Peripheral assignment
mod resources;
/// Task implementations
mod task;

/// Announcement arbiter shared by the screen and the announcement tasks
static ARBITER: Arbiter<CriticalSectionRawMutex> = Arbiter::new(ArbiterConfig::DEFAULT);

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task
    let r = split_resources!(p);

    // Announcement side first, so the first screen refresh is heard
    spawner.spawn(announce_dispatch(&ARBITER)).unwrap();
    spawner.spawn(announce_worker(&ARBITER, r.buzzer)).unwrap();
    spawner.spawn(rgb_led(r.rgb_led)).unwrap();
    spawner.spawn(knob_rotation(r.knob)).unwrap();
    spawner.spawn(knob_button(r.knob_button)).unwrap();
    spawner.spawn(screen(&ARBITER)).unwrap();
}
