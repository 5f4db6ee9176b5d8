use defmt::*;
use embassy_executor::task;
use embassy_rp::{
    adc::{Adc, Channel, Config, InterruptHandler},
    bind_interrupts,
    gpio::{AnyPin, Input, Pull},
};
use embassy_time::{Duration, Ticker, Timer};
use level_crossing::Event;
use portable_atomic::{AtomicU8, Ordering};

use crate::{
    config::{ADC_FULL_SCALE, DEBOUNCE_MS, MANUAL_GATE_POLL_MS},
    config_resources::{ButtonResources, ManualGateResources, SwitchResources},
    tasks::crossing::CROSSING_EVENT_CHANNEL,
};

/// Latest potentiometer reading, 0 to 100 percent.
pub static MANUAL_GATE_PERCENT: AtomicU8 = AtomicU8::new(0);

pub fn manual_gate_percent() -> u8 {
    MANUAL_GATE_PERCENT.load(Ordering::Relaxed)
}

#[task(pool_size = 4)]
async fn button_task(index: u8, pin: AnyPin) {
    let mut button = Input::new(pin, Pull::Up);

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        if button.is_high() {
            continue;
        }
        debug!("Button {} pressed", index);
        CROSSING_EVENT_CHANNEL.send(Event::Button(index)).await;
        button.wait_for_high().await;
    }
}

#[task(pool_size = 2)]
async fn switch_task(index: u8, pin: AnyPin) {
    let mut switch = Input::new(pin, Pull::Down);
    let mut level = switch.is_high();

    loop {
        switch.wait_for_any_edge().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        let high = switch.is_high();
        if high == level {
            continue;
        }
        level = high;
        debug!("Switch {} -> {}", index, high);
        CROSSING_EVENT_CHANNEL
            .send(Event::Switch { index, high })
            .await;
    }
}

/// Spawn one watcher per button and per switch.
pub fn spawn_digital_inputs(
    spawner: &embassy_executor::Spawner,
    buttons: ButtonResources,
    switches: SwitchResources,
) {
    info!("Starting digital input tasks");

    let buttons: [AnyPin; 4] = [
        buttons.btn0.into(),
        buttons.btn1.into(),
        buttons.btn2.into(),
        buttons.btn3.into(),
    ];
    for (index, pin) in buttons.into_iter().enumerate() {
        if spawner.spawn(button_task(index as u8, pin)).is_err() {
            error!("Failed to spawn button task {}", index);
        }
    }

    let switches: [AnyPin; 2] = [switches.maintenance.into(), switches.train.into()];
    for (index, pin) in switches.into_iter().enumerate() {
        if spawner.spawn(switch_task(index as u8, pin)).is_err() {
            error!("Failed to spawn switch task {}", index);
        }
    }
}

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => InterruptHandler;
});

#[task]
pub async fn analog_input_task(r: ManualGateResources) {
    info!("Starting analog input task");
    let mut adc = Adc::new(r.adc, Irqs, Config::default());
    let mut pot = Channel::new_pin(r.pot, Pull::None);

    let mut ticker = Ticker::every(Duration::from_millis(MANUAL_GATE_POLL_MS));

    info!("Analog input task initialized");

    loop {
        ticker.next().await;

        let raw = match adc.read(&mut pot).await {
            Ok(raw) => raw as u32,
            Err(e) => {
                warn!("Manual gate read failed: {:?}", e);
                continue;
            }
        };
        let percent = (raw.min(ADC_FULL_SCALE) * 100 / ADC_FULL_SCALE) as u8;
        MANUAL_GATE_PERCENT.store(percent, Ordering::Relaxed);
        trace!("Manual gate: {}%", percent);
    }
}
