/// State-driven countdown counted in base ticks.
///
/// `elapsed` returns to zero on every (re)start and stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    ticks_per_second: u32,
    trigger_secs: u32,
    elapsed_ticks: u32,
    active: bool,
}

impl Countdown {
    pub const fn new(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second,
            trigger_secs: 0,
            elapsed_ticks: 0,
            active: false,
        }
    }

    pub fn restart(&mut self, trigger_secs: u32) {
        self.trigger_secs = trigger_secs;
        self.elapsed_ticks = 0;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.elapsed_ticks = 0;
        self.active = false;
    }

    /// Start counting the same trigger again without stopping.
    pub fn rewind(&mut self) {
        self.elapsed_ticks = 0;
    }

    /// Count one tick. Returns true once the trigger has been reached.
    pub fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        self.elapsed_ticks >= self.trigger_ticks()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn trigger_secs(&self) -> u32 {
        self.trigger_secs
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    fn trigger_ticks(&self) -> u32 {
        self.trigger_secs.saturating_mul(self.ticks_per_second)
    }
}

/// Divides the base tick down to the poll rate of the remote link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollPacer {
    every_ticks: u32,
    count: u32,
}

impl PollPacer {
    pub const fn new(every_ticks: u32) -> Self {
        Self {
            every_ticks,
            count: 0,
        }
    }

    /// Count one tick. Returns true when a poll is due.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.every_ticks {
            self.count = 0;
            true
        } else {
            false
        }
    }
}
