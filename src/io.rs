use crate::message::RequestFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightColor {
    Off,
    Red,
    Yellow,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatePosition {
    Open,
    Closed,
    /// Manual position, 0 (closed) to 100 (open).
    Percent(u8),
}

impl GatePosition {
    pub fn percent(self) -> u8 {
        match self {
            GatePosition::Open => 100,
            GatePosition::Closed => 0,
            GatePosition::Percent(p) => p.min(100),
        }
    }
}

/// Hardware driven by the crossing.
///
/// Every call comes from the crossing's single serialized context and must
/// return without blocking. Actuator commands are assumed to take effect
/// before the next tick.
pub trait CrossingIo {
    fn set_gate(&mut self, position: GatePosition);
    fn set_traffic_light(&mut self, color: LightColor);
    fn set_pedestrian_light(&mut self, on: bool);
    fn set_blue_light(&mut self, on: bool);

    /// Potentiometer position in percent. Only polled during maintenance.
    fn read_manual_gate(&mut self) -> u8;

    /// Stop, reset and start the tick source so the next countdown starts on
    /// a fresh tick boundary.
    fn restart_timer(&mut self);

    /// Queue a request for the remote link. Fire and forget.
    fn send_frame(&mut self, frame: &RequestFrame);
}

#[cfg(test)]
pub mod mock {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Gate(GatePosition),
        TrafficLight(LightColor),
        PedestrianLight(bool),
        BlueLight(bool),
        ReadManualGate,
        RestartTimer,
        Frame(RequestFrame),
    }

    /// Records every call made by the crossing.
    #[derive(Debug, Default)]
    pub struct RecordingIo {
        pub calls: Vec<Call>,
        pub manual_gate: u8,
    }

    impl RecordingIo {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn take(&mut self) -> Vec<Call> {
            core::mem::take(&mut self.calls)
        }

        /// Calls other than link traffic.
        pub fn hardware_calls(&self) -> Vec<Call> {
            self.calls
                .iter()
                .filter(|c| !matches!(c, Call::Frame(_)))
                .cloned()
                .collect()
        }

        pub fn frames(&self) -> Vec<RequestFrame> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Frame(f) => Some(*f),
                    _ => None,
                })
                .collect()
        }

        pub fn last_gate(&self) -> Option<GatePosition> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Gate(g) => Some(*g),
                _ => None,
            })
        }

        pub fn last_traffic_light(&self) -> Option<LightColor> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::TrafficLight(l) => Some(*l),
                _ => None,
            })
        }

        pub fn last_pedestrian_light(&self) -> Option<bool> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::PedestrianLight(on) => Some(*on),
                _ => None,
            })
        }

        pub fn last_blue_light(&self) -> Option<bool> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::BlueLight(on) => Some(*on),
                _ => None,
            })
        }

        pub fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }
    }

    impl CrossingIo for RecordingIo {
        fn set_gate(&mut self, position: GatePosition) {
            self.calls.push(Call::Gate(position));
        }

        fn set_traffic_light(&mut self, color: LightColor) {
            self.calls.push(Call::TrafficLight(color));
        }

        fn set_pedestrian_light(&mut self, on: bool) {
            self.calls.push(Call::PedestrianLight(on));
        }

        fn set_blue_light(&mut self, on: bool) {
            self.calls.push(Call::BlueLight(on));
        }

        fn read_manual_gate(&mut self) -> u8 {
            self.calls.push(Call::ReadManualGate);
            self.manual_gate
        }

        fn restart_timer(&mut self) {
            self.calls.push(Call::RestartTimer);
        }

        fn send_frame(&mut self, frame: &RequestFrame) {
            self.calls.push(Call::Frame(*frame));
        }
    }
}
