use defmt::*;
use embassy_executor::task;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{self, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use level_crossing::message::RequestFrame;
use level_crossing::{Crossing, CrossingConfig, CrossingIo, Event, GatePosition, LightColor, State};

use crate::config::*;
use crate::config_resources::CrossingOutputResources;
use crate::tasks::gpio_input::manual_gate_percent;
use crate::tasks::light_driver::{LIGHT_EVENT_CHANNEL, LightEvents};
use crate::tasks::remote_link::LINK_TX_CHANNEL;

pub type CrossingChannelType = channel::Channel<CriticalSectionRawMutex, Event, CROSSING_EVENT_QUEUE_DEPTH>;
pub static CROSSING_EVENT_CHANNEL: CrossingChannelType = channel::Channel::new();

/// Last state reported by the crossing task.
pub static CROSSING_STATE: Mutex<CriticalSectionRawMutex, State> = Mutex::new(State::Pedestrian);

fn servo_config(position: GatePosition) -> pwm::Config {
    let span = (SERVO_PULSE_OPEN - SERVO_PULSE_CLOSED) as u32;
    let pulse = SERVO_PULSE_CLOSED + (span * position.percent() as u32 / 100) as u16;

    let mut config = pwm::Config::default();
    config.divider = SERVO_PWM_DIVIDER.into();
    config.top = SERVO_PWM_TOP;
    config.compare_b = pulse;
    config
}

/// Board outputs driven by the crossing.
struct Hardware {
    ticker: Ticker,
    pedestrian_light: Output<'static>,
    gate: Pwm<'static>,
}

impl Hardware {
    fn new(r: CrossingOutputResources) -> Self {
        Self {
            ticker: Ticker::every(Duration::from_millis(TICK_PERIOD_MS)),
            pedestrian_light: Output::new(r.pedestrian_light, Level::Low),
            gate: Pwm::new_output_b(r.pwm_slice, r.gate_pwm, servo_config(GatePosition::Open)),
        }
    }

    fn send_light(&self, event: LightEvents) {
        if LIGHT_EVENT_CHANNEL.try_send(event).is_err() {
            warn!("Light queue full, dropping {:?}", event);
        }
    }
}

impl CrossingIo for Hardware {
    fn set_gate(&mut self, position: GatePosition) {
        self.gate.set_config(&servo_config(position));
    }

    fn set_traffic_light(&mut self, color: LightColor) {
        self.send_light(LightEvents::Traffic(color));
    }

    fn set_pedestrian_light(&mut self, on: bool) {
        self.pedestrian_light.set_level(if on { Level::High } else { Level::Low });
    }

    fn set_blue_light(&mut self, on: bool) {
        self.send_light(LightEvents::Blue(on));
    }

    fn read_manual_gate(&mut self) -> u8 {
        manual_gate_percent()
    }

    fn restart_timer(&mut self) {
        self.ticker.reset();
    }

    fn send_frame(&mut self, frame: &RequestFrame) {
        if LINK_TX_CHANNEL.try_send(*frame).is_err() {
            warn!("Link queue full, dropping frame");
        }
    }
}

#[task]
pub async fn crossing_task(r: CrossingOutputResources) {
    info!("Starting crossing task");

    let mut hw = Hardware::new(r);
    let mut crossing = Crossing::new(CrossingConfig::default());
    let receiver = CROSSING_EVENT_CHANNEL.receiver();

    crossing.init_state(&mut hw);
    *CROSSING_STATE.lock().await = crossing.state();

    info!("Crossing task initialized");

    loop {
        let event = match select(hw.ticker.next(), receiver.receive()).await {
            Either::First(_) => Event::Tick,
            Either::Second(event) => event,
        };
        crossing.handle(event, &mut hw);

        let state = crossing.state();
        *CROSSING_STATE.lock().await = state;

        if state == State::Done {
            break;
        }
    }

    // leave the crossing dark once the program is over
    hw.set_pedestrian_light(false);
    hw.set_traffic_light(LightColor::Off);
    hw.set_blue_light(false);
    info!("Crossing task stopped");
}
