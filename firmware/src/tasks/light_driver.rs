use defmt::*;
use embassy_executor::task;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel;
use level_crossing::LightColor;
use smart_leds::{RGB8, brightness, gamma};

use crate::config::{LIGHT_BRIGHTNESS, LIGHT_QUEUE_DEPTH};
use crate::config_resources::LightResources;

const NUM_LEDS: usize = 1;

#[derive(Clone, Copy, Format)]
pub enum LightEvents {
    Traffic(LightColor),
    Blue(bool),
}

pub type LightChannelType = channel::Channel<CriticalSectionRawMutex, LightEvents, LIGHT_QUEUE_DEPTH>;
pub static LIGHT_EVENT_CHANNEL: LightChannelType = channel::Channel::new();

fn traffic_rgb(color: LightColor) -> RGB8 {
    match color {
        LightColor::Off => RGB8::default(),
        LightColor::Red => RGB8::new(255, 0, 0),
        LightColor::Yellow => RGB8::new(255, 160, 0),
        LightColor::Green => RGB8::new(0, 255, 0),
    }
}

const BLUE: RGB8 = RGB8::new(0, 0, 255);

/// The traffic light and the blue maintenance light share one pixel. A lit
/// traffic light wins.
fn pixel(traffic: LightColor, blue: bool) -> RGB8 {
    match traffic {
        LightColor::Off if blue => BLUE,
        color => traffic_rgb(color),
    }
}

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

#[task]
pub async fn light_driver_task(r: LightResources) {
    info!("Initializing light driver task");
    let Pio {
        mut common, sm0, ..
    } = Pio::new(r.pio, Irqs);

    let program = PioWs2812Program::new(&mut common);
    let mut ws2812: PioWs2812<'_, PIO0, 0, NUM_LEDS> =
        PioWs2812::new(&mut common, sm0, r.dma_ch, r.pin, &program);

    let mut traffic = LightColor::Off;
    let mut blue = false;
    ws2812.write(&[RGB8::default(); NUM_LEDS]).await;

    let receiver = LIGHT_EVENT_CHANNEL.receiver();

    info!("Light driver task initialized");

    loop {
        match receiver.receive().await {
            LightEvents::Traffic(color) => traffic = color,
            LightEvents::Blue(on) => blue = on,
        }

        let data = [pixel(traffic, blue); NUM_LEDS];
        let mut output = [RGB8::default(); NUM_LEDS];
        let corrected = brightness(gamma(data.iter().cloned()), LIGHT_BRIGHTNESS);
        for (led, color) in output.iter_mut().zip(corrected) {
            *led = color;
        }
        trace!("Light: {:?} blue {}", traffic, blue);
        ws2812.write(&output).await;
    }
}
