//! Reconciliation with the remote peer.
//!
//! Response bytes arrive one at a time and are accumulated into a fixed-size
//! frame. Once complete, the value at this crossing's status slot is compared
//! with the last one seen; an in-range change becomes a transition for the
//! local dispatcher.
//!
//! The very first response after start-up is only recorded, so that whatever
//! the peer held before this crossing announced itself is never acted on.

use crate::message::{ResponseFrame, UPDATE_RESPONSE_SIZE, UpdateResponse};
use crate::state::Transition;
use crate::timer::PollPacer;

/// Collects link bytes until a full response frame is held.
#[derive(Debug)]
pub struct Accumulator {
    frame: ResponseFrame,
    len: usize,
}

impl Accumulator {
    pub const fn new() -> Self {
        Self {
            frame: [0; UPDATE_RESPONSE_SIZE],
            len: 0,
        }
    }

    /// Append one byte. Returns the frame once complete and starts over.
    /// A partial frame just waits for more bytes.
    pub fn push(&mut self, byte: u8) -> Option<ResponseFrame> {
        self.frame[self.len] = byte;
        self.len += 1;
        if self.len < UPDATE_RESPONSE_SIZE {
            return None;
        }
        self.len = 0;
        Some(self.frame)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct RemoteSync {
    slot: usize,
    accumulator: Accumulator,
    pacer: PollPacer,
    last_known: Option<i32>,
    initialized: bool,
}

impl RemoteSync {
    pub const fn new(slot: usize, poll_every_ticks: u32) -> Self {
        Self {
            slot,
            accumulator: Accumulator::new(),
            pacer: PollPacer::new(poll_every_ticks),
            last_known: None,
            initialized: false,
        }
    }

    /// Count one base tick. Returns true when a status poll should be sent.
    pub fn poll_due(&mut self) -> bool {
        self.pacer.tick()
    }

    /// Feed one link byte. Returns the transition to dispatch, if the
    /// completed frame calls for one.
    pub fn on_byte(&mut self, byte: u8) -> Option<Transition> {
        let frame = self.accumulator.push(byte)?;
        let response = match UpdateResponse::decode(&frame) {
            Ok(response) => response,
            Err(e) => {
                log_warn!("dropping status frame: {:?}", e);
                return None;
            }
        };
        let Some(value) = response.value(self.slot) else {
            log_warn!("status slot {} outside the status table", self.slot);
            return None;
        };
        self.reconcile(value)
    }

    /// Apply the reconciliation policy to a status value read from the peer.
    pub fn reconcile(&mut self, value: i32) -> Option<Transition> {
        if !self.initialized {
            log_debug!("initial remote status {}", value);
            self.last_known = Some(value);
            self.initialized = true;
            return None;
        }

        let changed = self.last_known != Some(value);
        self.last_known = Some(value);
        if !changed {
            return None;
        }
        let transition = Transition::from_switch_code(value);
        if transition.is_none() {
            log_debug!("ignoring remote status {}", value);
        }
        transition
    }

    /// Remember a transition this crossing published itself, so that its
    /// echo from the peer is not dispatched a second time.
    pub fn record_local(&mut self, transition: Transition) {
        self.last_known = Some(transition.code());
    }

    pub fn last_known(&self) -> Option<i32> {
        self.last_known
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn pending_bytes(&self) -> usize {
        self.accumulator.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::STATUS_TABLE_LEN;

    fn response_with(slot: usize, value: i32) -> ResponseFrame {
        let mut values = [0; STATUS_TABLE_LEN];
        values[slot] = value;
        UpdateResponse::new(0, 0, values).encode().unwrap()
    }

    fn feed(sync: &mut RemoteSync, frame: &[u8]) -> Vec<Transition> {
        frame.iter().filter_map(|b| sync.on_byte(*b)).collect()
    }

    #[test]
    fn first_value_is_only_recorded() {
        let mut sync = RemoteSync::new(27, 3);
        assert!(feed(&mut sync, &response_with(27, 2)).is_empty());
        assert!(sync.is_initialized());
        assert_eq!(sync.last_known(), Some(2));
    }

    #[test]
    fn unchanged_then_changed_value() {
        let mut sync = RemoteSync::new(27, 3);
        assert_eq!(sync.reconcile(1), None);
        assert_eq!(sync.reconcile(1), None);
        assert_eq!(sync.reconcile(2), Some(Transition::TrainSwitchHigh));
        assert_eq!(sync.reconcile(2), None);
    }

    #[test]
    fn out_of_range_values_are_recorded_but_not_dispatched() {
        let mut sync = RemoteSync::new(27, 3);
        sync.reconcile(-1);
        assert_eq!(sync.reconcile(4), None);
        assert_eq!(sync.last_known(), Some(4));
        assert_eq!(sync.reconcile(-1), None);
        // back in range after garbage counts as a change
        assert_eq!(sync.reconcile(0), Some(Transition::MaintenanceSwitchHigh));
    }

    #[test]
    fn local_publication_suppresses_the_echo() {
        let mut sync = RemoteSync::new(27, 3);
        sync.reconcile(-1);
        sync.record_local(Transition::MaintenanceSwitchHigh);
        assert_eq!(sync.reconcile(0), None);
        assert_eq!(sync.reconcile(1), Some(Transition::MaintenanceSwitchLow));
    }

    #[test]
    fn partial_frame_waits_for_more_bytes() {
        let mut sync = RemoteSync::new(27, 3);
        let first = response_with(27, 0);
        let second = response_with(27, 3);

        assert!(feed(&mut sync, &first[..100]).is_empty());
        assert_eq!(sync.pending_bytes(), 100);
        assert!(!sync.is_initialized());
        assert!(feed(&mut sync, &first[100..]).is_empty());
        assert_eq!(sync.pending_bytes(), 0);

        assert_eq!(feed(&mut sync, &second), vec![Transition::TrainSwitchLow]);
    }

    #[test]
    fn undecodable_frame_is_dropped_without_recording() {
        let mut sync = RemoteSync::new(27, 3);
        let mut frame = response_with(27, 0);
        frame[0] = 1;
        assert!(feed(&mut sync, &frame).is_empty());
        assert!(!sync.is_initialized());
        assert_eq!(sync.last_known(), None);
    }

    #[test]
    fn accumulator_restarts_after_each_frame() {
        let mut accumulator = Accumulator::new();
        for i in 0..UPDATE_RESPONSE_SIZE - 1 {
            assert!(accumulator.push(i as u8).is_none());
        }
        let frame = accumulator.push(0xaa).unwrap();
        assert_eq!(frame[0], 0);
        assert_eq!(frame[UPDATE_RESPONSE_SIZE - 1], 0xaa);
        assert!(accumulator.is_empty());
    }
}
