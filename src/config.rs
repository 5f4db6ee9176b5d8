use crate::message::STATUS_TABLE_LEN;

pub const TICKS_PER_SECOND: u32 = 10; // Hz; base rate of the tick source
pub const FETCH_FREQ: u32 = 3; // ticks between status polls (300 ms > the peer's 250 ms refresh)

// Countdown lengths, in seconds
pub const PED_TIME: u32 = 10;
pub const LIGHT_TIME: u32 = 3;
pub const V_MIN_TIME: u32 = 10;
pub const BLUE_TIME: u32 = 1; // half period of the blinking maintenance light

// Index of the shared crossing status inside the peer's status table.
// Both crossings of a pair must use the same slot.
pub const STATUS_SLOT: usize = 27;

// Polls write a dummy value into a scratch slot; the reply carries the whole table.
pub const POLL_ID: i32 = 0;
pub const POLL_VALUE: i32 = 0;

// Value written into the status slot on start-up, before any switch has moved.
pub const ANNOUNCE_VALUE: i32 = -1;

const _: () = assert!(STATUS_SLOT < STATUS_TABLE_LEN);

/// Countdown lengths for the timed states, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub pedestrian_secs: u32,
    pub light_secs: u32,
    pub vehicle_min_secs: u32,
    pub blue_secs: u32,
}

impl Timing {
    pub const fn new() -> Self {
        Self {
            pedestrian_secs: PED_TIME,
            light_secs: LIGHT_TIME,
            vehicle_min_secs: V_MIN_TIME,
            blue_secs: BLUE_TIME,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrossingConfig {
    pub ticks_per_second: u32,
    pub fetch_every_ticks: u32,
    pub timing: Timing,
    pub status_slot: usize,
    pub poll_id: i32,
    pub poll_value: i32,
    pub announce_value: i32,
}

impl CrossingConfig {
    pub const fn new() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            fetch_every_ticks: FETCH_FREQ,
            timing: Timing::new(),
            status_slot: STATUS_SLOT,
            poll_id: POLL_ID,
            poll_value: POLL_VALUE,
            announce_value: ANNOUNCE_VALUE,
        }
    }
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self::new()
    }
}
