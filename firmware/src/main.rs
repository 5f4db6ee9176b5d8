#![no_std]
#![no_main]

use defmt::{debug, error, info};
use embassy_executor::Spawner;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Timer};
use level_crossing::State;
use {defmt_rtt as _, panic_probe as _};

mod config;
mod config_resources;
mod tasks;

use crate::config_resources::{
    AssignedResources, ButtonResources, CrossingOutputResources, LightResources, LinkResources,
    ManualGateResources, SwitchResources,
};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    info!("Starting up...");

    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_secs(config::WATCHDOG_TIMEOUT_S));

    // Outputs and the link come up before anything can produce events
    if spawner
        .spawn(tasks::light_driver::light_driver_task(r.lights))
        .is_err()
    {
        error!("Failed to spawn light driver task");
    }

    if spawner
        .spawn(tasks::remote_link::remote_link_task(r.link))
        .is_err()
    {
        error!("Failed to spawn remote link task");
    }

    if spawner
        .spawn(tasks::crossing::crossing_task(r.crossing_outputs))
        .is_err()
    {
        error!("Failed to spawn crossing task");
    }

    if spawner
        .spawn(tasks::gpio_input::analog_input_task(r.manual_gate))
        .is_err()
    {
        error!("Failed to spawn analog input task");
    }

    tasks::gpio_input::spawn_digital_inputs(&spawner, r.buttons, r.switches);

    let mut running = true;
    loop {
        Timer::after(Duration::from_secs(config::WATCHDOG_FEED_INTERVAL_S)).await;

        watchdog.feed();

        if !running {
            continue;
        }
        let state = *tasks::crossing::CROSSING_STATE.lock().await;
        debug!(
            "state: {:?} | manual gate: {}%",
            state,
            tasks::gpio_input::manual_gate_percent()
        );
        if state == State::Done {
            info!("Crossing shut down");
            running = false;
        }
    }
}
