/// Group of states sharing entry and exit side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Regime {
    Normal,
    Train,
    Maintenance,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    // normal traffic cycle
    Pedestrian,
    YellowToGreen,
    GreenMinHold,
    GreenOk,
    GreenMinPedestrianPending,
    YellowToRed,

    // train approaching, present, clearing
    YellowThenTrain,
    TrainPresent,
    PedestrianDuringTrainClearing,

    // operator maintenance
    Maintenance,
    MaintenanceDuringTrain,
    MaintenanceClearing,

    Done,
}

impl State {
    pub const ALL: [State; 13] = [
        State::Pedestrian,
        State::YellowToGreen,
        State::GreenMinHold,
        State::GreenOk,
        State::GreenMinPedestrianPending,
        State::YellowToRed,
        State::YellowThenTrain,
        State::TrainPresent,
        State::PedestrianDuringTrainClearing,
        State::Maintenance,
        State::MaintenanceDuringTrain,
        State::MaintenanceClearing,
        State::Done,
    ];

    pub const fn regime(self) -> Regime {
        match self {
            State::Pedestrian
            | State::YellowToGreen
            | State::GreenMinHold
            | State::GreenOk
            | State::GreenMinPedestrianPending
            | State::YellowToRed => Regime::Normal,
            State::YellowThenTrain | State::TrainPresent | State::PedestrianDuringTrainClearing => {
                Regime::Train
            }
            State::Maintenance | State::MaintenanceDuringTrain | State::MaintenanceClearing => {
                Regime::Maintenance
            }
            State::Done => Regime::Terminal,
        }
    }

    /// A transient state never drives outputs; the dispatcher resolves it
    /// further before returning.
    pub const fn is_transient(self) -> bool {
        matches!(self, State::MaintenanceClearing)
    }
}

/// Abstract event fed to the dispatcher.
///
/// The discriminants are the values exchanged with the remote peer. Only the
/// four switch symbols are ever accepted from the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum Transition {
    MaintenanceSwitchHigh = 0,
    MaintenanceSwitchLow = 1,
    TrainSwitchHigh = 2,
    TrainSwitchLow = 3,
    PedestrianButton = 4,
    TimerExpired = 5,
    Default = 6,
    Quit = -1,
}

impl Transition {
    pub const ALL: [Transition; 8] = [
        Transition::MaintenanceSwitchHigh,
        Transition::MaintenanceSwitchLow,
        Transition::TrainSwitchHigh,
        Transition::TrainSwitchLow,
        Transition::PedestrianButton,
        Transition::TimerExpired,
        Transition::Default,
        Transition::Quit,
    ];

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn is_switch(self) -> bool {
        matches!(
            self,
            Transition::MaintenanceSwitchHigh
                | Transition::MaintenanceSwitchLow
                | Transition::TrainSwitchHigh
                | Transition::TrainSwitchLow
        )
    }

    /// Switch symbol for a status value read from the peer, if it is one.
    pub const fn from_switch_code(code: i32) -> Option<Transition> {
        match code {
            0 => Some(Transition::MaintenanceSwitchHigh),
            1 => Some(Transition::MaintenanceSwitchLow),
            2 => Some(Transition::TrainSwitchHigh),
            3 => Some(Transition::TrainSwitchLow),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_codes_round_trip_through_the_link_range() {
        for transition in Transition::ALL {
            let decoded = Transition::from_switch_code(transition.code());
            if transition.is_switch() {
                assert_eq!(decoded, Some(transition));
            } else {
                assert_eq!(decoded, None);
            }
        }
        assert_eq!(Transition::from_switch_code(-1), None);
        assert_eq!(Transition::from_switch_code(4), None);
    }

    #[test]
    fn only_maintenance_clearing_is_transient() {
        let transient: Vec<State> = State::ALL.into_iter().filter(|s| s.is_transient()).collect();
        assert_eq!(transient, vec![State::MaintenanceClearing]);
        assert_eq!(State::MaintenanceClearing.regime(), Regime::Maintenance);
    }

    #[test]
    fn regimes_partition_the_states() {
        let count = |regime| State::ALL.iter().filter(|s| s.regime() == regime).count();
        assert_eq!(count(Regime::Normal), 6);
        assert_eq!(count(Regime::Train), 3);
        assert_eq!(count(Regime::Maintenance), 3);
        assert_eq!(count(Regime::Terminal), 1);
    }
}
