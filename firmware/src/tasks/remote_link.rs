use defmt::*;
use embassy_executor::task;
use embassy_futures::select::{Either, select};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel;
use embedded_io_async::{Read, Write};
use level_crossing::Event;
use level_crossing::message::RequestFrame;
use static_cell::StaticCell;

use crate::config::{LINK_TX_QUEUE_DEPTH, UART_BAUD, UART_RX_BUFFER_SIZE, UART_TX_BUFFER_SIZE};
use crate::config_resources::LinkResources;
use crate::tasks::crossing::CROSSING_EVENT_CHANNEL;

/// Outgoing request frames, queued by the crossing and written in order.
pub type LinkTxChannelType = channel::Channel<CriticalSectionRawMutex, RequestFrame, LINK_TX_QUEUE_DEPTH>;
pub static LINK_TX_CHANNEL: LinkTxChannelType = channel::Channel::new();

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static TX_BUFFER: StaticCell<[u8; UART_TX_BUFFER_SIZE]> = StaticCell::new();
static RX_BUFFER: StaticCell<[u8; UART_RX_BUFFER_SIZE]> = StaticCell::new();

/// Moves bytes between the UART and the crossing.
///
/// Received bytes are forwarded one by one; framing is the crossing's job.
#[task]
pub async fn remote_link_task(r: LinkResources) {
    info!("Starting remote link task");

    let mut config = Config::default();
    config.baudrate = UART_BAUD;

    let tx_buffer = &mut TX_BUFFER.init([0; UART_TX_BUFFER_SIZE])[..];
    let rx_buffer = &mut RX_BUFFER.init([0; UART_RX_BUFFER_SIZE])[..];
    let uart = BufferedUart::new(r.uart, Irqs, r.tx, r.rx, tx_buffer, rx_buffer, config);
    let (mut tx, mut rx) = uart.split();

    let mut buf = [0u8; 32];

    info!("Remote link task initialized");

    loop {
        match select(rx.read(&mut buf), LINK_TX_CHANNEL.receive()).await {
            Either::First(Ok(n)) => {
                for &byte in &buf[..n] {
                    CROSSING_EVENT_CHANNEL.send(Event::LinkByte(byte)).await;
                }
            }
            Either::First(Err(e)) => warn!("Link read failed: {:?}", e),
            Either::Second(frame) => {
                if let Err(e) = tx.write_all(&frame).await {
                    warn!("Link write failed: {:?}", e);
                }
            }
        }
    }
}
