//! Transition table of the crossing.
//!
//! [`next_state`] is a pure function of the current state and the incoming
//! symbol: the base table first, then the precedence overrides in fixed order
//! (train arrival, then maintenance). Pairs without an entry keep the current
//! state.

use crate::state::{Regime, State, Transition};

/// Next state according to the base table alone.
pub fn base(state: State, transition: Transition) -> State {
    match (state, transition) {
        (State::Pedestrian, Transition::TimerExpired) => State::YellowToGreen,
        (State::YellowToGreen, Transition::TimerExpired) => State::GreenMinHold,
        (State::GreenMinHold, Transition::TimerExpired) => State::GreenOk,
        (State::GreenMinHold, Transition::PedestrianButton) => State::GreenMinPedestrianPending,
        (State::GreenOk, Transition::PedestrianButton) => State::YellowToRed,
        (State::GreenMinPedestrianPending, Transition::TimerExpired) => State::YellowToRed,
        (State::YellowToRed, Transition::TimerExpired) => State::Pedestrian,

        (State::YellowThenTrain, Transition::MaintenanceSwitchHigh) => {
            State::MaintenanceDuringTrain
        }
        (State::YellowThenTrain, Transition::TimerExpired) => State::TrainPresent,
        (State::YellowThenTrain, Transition::TrainSwitchLow) => {
            State::PedestrianDuringTrainClearing
        }
        (State::TrainPresent, Transition::MaintenanceSwitchHigh) => State::MaintenanceDuringTrain,
        (State::TrainPresent, Transition::TrainSwitchLow) => State::PedestrianDuringTrainClearing,
        (State::PedestrianDuringTrainClearing, Transition::TrainSwitchHigh) => State::TrainPresent,
        (State::PedestrianDuringTrainClearing, Transition::TimerExpired) => State::YellowToGreen,

        (State::Maintenance, Transition::TrainSwitchHigh) => State::MaintenanceDuringTrain,
        (State::Maintenance, Transition::MaintenanceSwitchLow) => State::Pedestrian,
        (State::MaintenanceDuringTrain, Transition::TrainSwitchLow) => State::MaintenanceClearing,
        (State::MaintenanceDuringTrain, Transition::MaintenanceSwitchLow) => State::TrainPresent,
        // Never maps back onto itself, so resolving it always terminates.
        (State::MaintenanceClearing, Transition::TrainSwitchHigh) => State::MaintenanceDuringTrain,
        (State::MaintenanceClearing, _) => State::Maintenance,

        (state, _) => state,
    }
}

/// Next state after the base table and the precedence overrides.
///
/// `Done` absorbs every symbol and `Quit` leads to `Done` from anywhere.
pub fn next_state(state: State, transition: Transition) -> State {
    if state == State::Done || transition == Transition::Quit {
        return State::Done;
    }

    let regime = state.regime();
    let mut next = base(state, transition);

    // train arrival preempts the normal cycle and the yellow warning
    if transition == Transition::TrainSwitchHigh
        && regime != Regime::Maintenance
        && !matches!(
            state,
            State::TrainPresent | State::PedestrianDuringTrainClearing
        )
    {
        next = State::YellowThenTrain;
    }

    // maintenance preempts everything except a train event in progress
    if transition == Transition::MaintenanceSwitchHigh
        && regime != Regime::Train
        && regime != Regime::Maintenance
    {
        next = State::Maintenance;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_cycle_follows_the_timer() {
        let mut state = State::Pedestrian;
        let mut visited = vec![state];
        for _ in 0..4 {
            state = next_state(state, Transition::TimerExpired);
            visited.push(state);
        }
        assert_eq!(
            visited,
            vec![
                State::Pedestrian,
                State::YellowToGreen,
                State::GreenMinHold,
                State::GreenOk,
                State::GreenOk,
            ]
        );
        assert_eq!(next_state(State::GreenOk, Transition::PedestrianButton), State::YellowToRed);
        assert_eq!(next_state(State::YellowToRed, Transition::TimerExpired), State::Pedestrian);
    }

    #[test]
    fn pedestrian_request_during_minimum_green_waits() {
        let pending = next_state(State::GreenMinHold, Transition::PedestrianButton);
        assert_eq!(pending, State::GreenMinPedestrianPending);
        assert_eq!(next_state(pending, Transition::PedestrianButton), pending);
        assert_eq!(next_state(pending, Transition::TimerExpired), State::YellowToRed);
    }

    #[test]
    fn train_arrival_preempts_the_normal_regime() {
        for state in State::ALL.into_iter().filter(|s| s.regime() == Regime::Normal) {
            assert_eq!(
                next_state(state, Transition::TrainSwitchHigh),
                State::YellowThenTrain,
                "from {:?}",
                state
            );
        }
        assert_eq!(
            next_state(State::YellowThenTrain, Transition::TrainSwitchHigh),
            State::YellowThenTrain
        );
    }

    #[test]
    fn train_arrival_is_ignored_while_a_train_is_signalled() {
        assert_eq!(
            next_state(State::TrainPresent, Transition::TrainSwitchHigh),
            State::TrainPresent
        );
        // clearing falls back to the base table
        assert_eq!(
            next_state(State::PedestrianDuringTrainClearing, Transition::TrainSwitchHigh),
            State::TrainPresent
        );
    }

    #[test]
    fn train_arrival_during_maintenance_keeps_maintenance() {
        assert_eq!(
            next_state(State::Maintenance, Transition::TrainSwitchHigh),
            State::MaintenanceDuringTrain
        );
        assert_eq!(
            next_state(State::MaintenanceDuringTrain, Transition::TrainSwitchHigh),
            State::MaintenanceDuringTrain
        );
    }

    #[test]
    fn maintenance_preempts_everything_but_a_train() {
        for state in State::ALL.into_iter().filter(|s| s.regime() == Regime::Normal) {
            assert_eq!(next_state(state, Transition::MaintenanceSwitchHigh), State::Maintenance);
        }
        for state in [State::YellowThenTrain, State::TrainPresent] {
            assert_eq!(
                next_state(state, Transition::MaintenanceSwitchHigh),
                State::MaintenanceDuringTrain
            );
        }
        assert_eq!(
            next_state(State::PedestrianDuringTrainClearing, Transition::MaintenanceSwitchHigh),
            State::PedestrianDuringTrainClearing
        );
        assert_eq!(
            next_state(State::Maintenance, Transition::MaintenanceSwitchHigh),
            State::Maintenance
        );
    }

    #[test]
    fn leaving_maintenance() {
        assert_eq!(
            next_state(State::Maintenance, Transition::MaintenanceSwitchLow),
            State::Pedestrian
        );
        assert_eq!(
            next_state(State::MaintenanceDuringTrain, Transition::MaintenanceSwitchLow),
            State::TrainPresent
        );
        assert_eq!(
            next_state(State::MaintenanceDuringTrain, Transition::TrainSwitchLow),
            State::MaintenanceClearing
        );
    }

    #[test]
    fn quit_reaches_done_and_done_absorbs() {
        for state in State::ALL {
            assert_eq!(next_state(state, Transition::Quit), State::Done);
        }
        for transition in Transition::ALL {
            assert_eq!(next_state(State::Done, transition), State::Done);
        }
    }

    #[test]
    fn maintenance_clearing_never_resolves_to_itself() {
        for transition in Transition::ALL {
            let next = next_state(State::MaintenanceClearing, transition);
            assert!(!next.is_transient(), "{:?} re-enters clearing", transition);
        }
        assert_eq!(
            next_state(State::MaintenanceClearing, Transition::Default),
            State::Maintenance
        );
        assert_eq!(
            next_state(State::MaintenanceClearing, Transition::TrainSwitchHigh),
            State::MaintenanceDuringTrain
        );
    }

    #[test]
    fn default_is_only_meaningful_for_the_transient_state() {
        for state in State::ALL.into_iter().filter(|s| !s.is_transient()) {
            assert_eq!(next_state(state, Transition::Default), state);
        }
    }
}
