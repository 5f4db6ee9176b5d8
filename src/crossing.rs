//! The crossing state machine.
//!
//! [`Crossing`] owns the current state, the countdown, the blue-light status
//! and the remote reconciliation context. Collaborators deliver events
//! through the `on_*` entry points (or [`Crossing::handle`]) and receive
//! commands through the [`CrossingIo`] passed with each call.

use crate::config::CrossingConfig;
use crate::io::{CrossingIo, GatePosition, LightColor};
use crate::message::Request;
use crate::remote::RemoteSync;
use crate::state::{Regime, State, Transition};
use crate::table;
use crate::timer::Countdown;

const MAINTENANCE_SWITCH: u8 = 0;
const TRAIN_SWITCH: u8 = 1;
const QUIT_BUTTON: u8 = 3;

/// Input delivered by a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Button(u8),
    Switch { index: u8, high: bool },
    Tick,
    LinkByte(u8),
}

#[derive(Debug)]
pub struct Crossing {
    config: CrossingConfig,
    state: State,
    countdown: Countdown,
    blue_on: bool,
    train_switch_high: bool,
    remote: RemoteSync,
}

impl Crossing {
    pub fn new(config: CrossingConfig) -> Self {
        Self {
            config,
            state: State::Pedestrian,
            countdown: Countdown::new(config.ticks_per_second),
            blue_on: false,
            train_switch_high: false,
            remote: RemoteSync::new(config.status_slot, config.fetch_every_ticks),
        }
    }

    /// Announce this crossing to the peer and enter `Pedestrian`.
    pub fn init_state<C: CrossingIo>(&mut self, io: &mut C) {
        self.send(Request::Announce, io);
        log_info!("starting in pedestrian state");
        self.state = State::Pedestrian;
        self.generate_outputs(io);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    pub fn blue_light(&self) -> bool {
        self.blue_on
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn remote(&self) -> &RemoteSync {
        &self.remote
    }

    pub fn handle<C: CrossingIo>(&mut self, event: Event, io: &mut C) {
        match event {
            Event::Button(index) => self.on_button(index, io),
            Event::Switch { index, high } => self.on_switch_edge(index, high, io),
            Event::Tick => self.on_timer_tick(io),
            Event::LinkByte(byte) => self.on_link_byte(byte, io),
        }
    }

    pub fn on_button<C: CrossingIo>(&mut self, index: u8, io: &mut C) {
        match index {
            0 | 1 => self.dispatch(Transition::PedestrianButton, io),
            QUIT_BUTTON => self.dispatch(Transition::Quit, io),
            _ => log_debug!("button {} not assigned", index),
        }
    }

    /// A local switch moved. The resulting symbol is dispatched and then
    /// published so the peer crossing follows.
    pub fn on_switch_edge<C: CrossingIo>(&mut self, index: u8, high: bool, io: &mut C) {
        let transition = match (index, high) {
            (MAINTENANCE_SWITCH, true) => Transition::MaintenanceSwitchHigh,
            (MAINTENANCE_SWITCH, false) => Transition::MaintenanceSwitchLow,
            (TRAIN_SWITCH, true) => Transition::TrainSwitchHigh,
            (TRAIN_SWITCH, false) => Transition::TrainSwitchLow,
            _ => {
                log_debug!("switch {} not assigned", index);
                return;
            }
        };
        if index == TRAIN_SWITCH {
            self.train_switch_high = high;
        }
        if self.is_done() {
            return;
        }

        self.dispatch(transition, io);
        self.remote.record_local(transition);
        self.send(Request::Publish(transition), io);
    }

    pub fn on_timer_tick<C: CrossingIo>(&mut self, io: &mut C) {
        if self.is_done() {
            return;
        }

        if self.remote.poll_due() {
            self.send(Request::Poll, io);
        }

        if !self.countdown.is_active() {
            return;
        }
        let expired = self.countdown.advance();
        let maintaining = self.state.regime() == Regime::Maintenance;

        // the potentiometer drives the gate directly while in maintenance
        if maintaining {
            let percent = io.read_manual_gate();
            io.set_gate(GatePosition::Percent(percent));
        }

        if !expired {
            return;
        }
        if maintaining {
            self.countdown.rewind();
            self.set_blue(!self.blue_on, io);
        } else {
            self.countdown.stop();
            self.dispatch(Transition::TimerExpired, io);
        }
    }

    pub fn on_link_byte<C: CrossingIo>(&mut self, byte: u8, io: &mut C) {
        if self.is_done() {
            return;
        }
        if let Some(transition) = self.remote.on_byte(byte) {
            log_info!("remote crossing reports {:?}", transition);
            self.dispatch(transition, io);
        }
    }

    /// Feed one symbol to the state machine.
    ///
    /// Outputs are generated only when the state actually changes. A
    /// transient target is resolved within this call, so it is never
    /// observable through [`Crossing::state`].
    pub fn dispatch<C: CrossingIo>(&mut self, transition: Transition, io: &mut C) {
        if self.is_done() {
            return;
        }
        if transition == Transition::Quit {
            log_info!("{:?} -> {:?}", self.state, State::Done);
            self.state = State::Done;
            return;
        }

        let prior = self.state;
        let mut next = table::next_state(prior, transition);
        if next == prior {
            log_debug!("{:?} ignored in {:?}", transition, prior);
            return;
        }
        log_info!("{:?} -> {:?} ({:?})", prior, next, transition);

        while next.is_transient() {
            let resolution = if self.train_switch_high {
                Transition::TrainSwitchHigh
            } else {
                Transition::Default
            };
            let resolved = table::next_state(next, resolution);
            debug_assert!(!resolved.is_transient());
            log_info!("{:?} -> {:?} ({:?})", next, resolved, resolution);
            next = resolved;
        }
        if next == prior {
            return;
        }

        self.cross_regime_boundary(prior, next, transition, io);
        self.state = next;
        self.generate_outputs(io);
    }

    fn cross_regime_boundary<C: CrossingIo>(
        &mut self,
        prior: State,
        next: State,
        transition: Transition,
        io: &mut C,
    ) {
        let was = prior.regime();
        let now = next.regime();

        if was != Regime::Maintenance && now == Regime::Maintenance {
            log_info!("maintenance entry");
        }
        if was == Regime::Maintenance && now != Regime::Maintenance {
            log_info!("maintenance exit");
            self.countdown.stop();
            self.set_blue(false, io);
        }
        if transition == Transition::TrainSwitchHigh && was != Regime::Train {
            log_info!("train arriving");
        }
        if transition == Transition::TrainSwitchLow && was == Regime::Train {
            log_info!("train clearing");
        }
    }

    fn generate_outputs<C: CrossingIo>(&mut self, io: &mut C) {
        let timing = self.config.timing;

        io.set_pedestrian_light(false);
        io.set_traffic_light(LightColor::Off);

        match self.state {
            State::Pedestrian | State::PedestrianDuringTrainClearing => {
                self.restart_countdown(timing.pedestrian_secs, io);
                io.set_gate(GatePosition::Open);
                if self.state == State::PedestrianDuringTrainClearing {
                    log_info!("gate open");
                }
                io.set_pedestrian_light(true);
                io.set_traffic_light(LightColor::Red);
            }
            State::YellowToGreen | State::YellowToRed | State::YellowThenTrain => {
                self.restart_countdown(timing.light_secs, io);
                io.set_gate(GatePosition::Open);
                io.set_traffic_light(LightColor::Yellow);
            }
            State::GreenMinHold | State::GreenOk | State::GreenMinPedestrianPending => {
                // only the hold starts the minimum-green countdown; the others
                // let it run out
                if self.state == State::GreenMinHold {
                    self.restart_countdown(timing.vehicle_min_secs, io);
                }
                io.set_gate(GatePosition::Open);
                io.set_traffic_light(LightColor::Green);
            }
            State::TrainPresent => {
                self.countdown.stop();
                io.set_gate(GatePosition::Closed);
                log_info!("gate closed");
                io.set_pedestrian_light(true);
                io.set_traffic_light(LightColor::Red);
            }
            State::Maintenance | State::MaintenanceDuringTrain => {
                self.set_blue(true, io);
                self.restart_countdown(timing.blue_secs, io);
            }
            State::MaintenanceClearing | State::Done => {}
        }
    }

    fn restart_countdown<C: CrossingIo>(&mut self, trigger_secs: u32, io: &mut C) {
        self.countdown.restart(trigger_secs);
        io.restart_timer();
    }

    fn set_blue<C: CrossingIo>(&mut self, on: bool, io: &mut C) {
        self.blue_on = on;
        io.set_blue_light(on);
    }

    fn send<C: CrossingIo>(&self, request: Request, io: &mut C) {
        match request.encode(&self.config) {
            Ok(frame) => io.send_frame(&frame),
            Err(e) => log_warn!("dropping {:?}: {:?}", request, e),
        }
    }
}
