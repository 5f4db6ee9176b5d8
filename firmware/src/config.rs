use level_crossing::config::TICKS_PER_SECOND;

pub const TICK_PERIOD_MS: u64 = 1000 / TICKS_PER_SECOND as u64; // ms; base tick of the crossing

pub const UART_BAUD: u32 = 9600; // remote peer link
pub const UART_TX_BUFFER_SIZE: usize = 64;
pub const UART_RX_BUFFER_SIZE: usize = 256; // holds almost two status replies

pub const DEBOUNCE_MS: u64 = 20; // ms; settle time for buttons and switches

pub const MANUAL_GATE_POLL_MS: u64 = 50; // ms; potentiometer sampling period
pub const ADC_FULL_SCALE: u32 = 4095;

// Gate servo: 125 MHz / 64 = 1.953 MHz counter, 39062 counts per 20 ms frame.
pub const SERVO_PWM_DIVIDER: u8 = 64;
pub const SERVO_PWM_TOP: u16 = 39_062;
pub const SERVO_PULSE_CLOSED: u16 = 1_953; // 1 ms
pub const SERVO_PULSE_OPEN: u16 = 3_906; // 2 ms

pub const CROSSING_EVENT_QUEUE_DEPTH: usize = 16;
pub const LINK_TX_QUEUE_DEPTH: usize = 4;
pub const LIGHT_QUEUE_DEPTH: usize = 8;

pub const LIGHT_BRIGHTNESS: u8 = 0x40;

pub const WATCHDOG_TIMEOUT_S: u64 = 8;
pub const WATCHDOG_FEED_INTERVAL_S: u64 = 1;
