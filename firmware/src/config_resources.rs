// Provide a mapping for the controller GPIO pins

//
//| GPIO # | Name        | Description                                                  |
//| ------ | ----------- | ------------------------------------------------------------ |
//| 0      | LINK_TX     | UART0 TX to the remote status peer.                          |
//| 1      | LINK_RX     | UART0 RX from the remote status peer.                        |
//| 2      | BTN0        | Pedestrian button, north side. Active low.                   |
//| 3      | BTN1        | Pedestrian button, south side. Active low.                   |
//| 4      | BTN2        | Spare button. Active low, not used.                          |
//| 5      | BTN3        | Quit button. Active low.                                     |
//| 6      | SW0         | Maintenance switch. Active high.                             |
//| 7      | SW1         | Train detection switch. Active high.                         |
//| 8      | PED_LIGHT   | Pedestrian light output. Active high.                        |
//| 15     | GATE_PWM    | Servo signal for the gate arm (PWM slice 7, channel B).      |
//| 16     | LIGHTS      | Data output for the WS2812 pixel: traffic light and blue.    |
//| 26     | MANUAL_GATE | Analog: potentiometer for the manual gate position.          |

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
  /// Serial link to the remote peer
  link: LinkResources {
    uart: UART0,
    tx: PIN_0,
    rx: PIN_1,
  },
  buttons: ButtonResources {
    btn0: PIN_2,
    btn1: PIN_3,
    btn2: PIN_4,
    btn3: PIN_5,
  },
  switches: SwitchResources {
    maintenance: PIN_6,
    train: PIN_7,
  },
  crossing_outputs: CrossingOutputResources {
    pedestrian_light: PIN_8,
    gate_pwm: PIN_15,
    pwm_slice: PWM_SLICE7,
  },
  lights: LightResources {
    dma_ch: DMA_CH0,
    pin: PIN_16,
    pio: PIO0,
  },
  manual_gate: ManualGateResources {
    adc: ADC,
    pot: PIN_26,
  },
}
