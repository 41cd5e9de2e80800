//! Liftpanel Display Firmware
//!
//! Firmware for the 16x2 floor indicator (STM32F042K6 + PCF8574 LCD backpack).
//! Receives `L1:`/`L2:` text lines from the elevator controller over UART.

#![no_std]
#![no_main]

use core::mem::MaybeUninit;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::USART2;
use embassy_stm32::usart::{self, BufferedUart};
use embassy_time::{Delay, Duration, Ticker};
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use liftpanel_display::{Dispatch, Hd44780, Panel, PanelConfig, PanelError};
use liftpanel_hal_stm32f0::{usart_config, PolledRx};

bind_interrupts!(struct Irqs {
    USART2 => usart::BufferedInterruptHandler<USART2>;
});

// Heap for the line buffer, which has no fixed bound
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 2KB of the F042's 6KB
const HEAP_SIZE: usize = 2 * 1024;

/// Poll interval; at 9600 baud a byte arrives roughly every millisecond
const POLL_INTERVAL_MS: u64 = 1;

// UART buffers must outlive the driver
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

type Lcd = Hd44780<I2c<'static, Blocking, i2c::Master>, Delay>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Liftpanel display firmware starting...");

    init_heap();

    let p = embassy_stm32::init(Default::default());
    let config = PanelConfig::default();

    // Setup I2C for the LCD backpack (PB6=SCL, PB7=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.timeout = Duration::from_millis(100);

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config);

    // Initialize LCD and show the greeting
    let lcd = Hd44780::new(i2c, Delay, config.lcd);
    let mut panel = Panel::new(lcd, config);
    if let Err(e) = panel.start() {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("LCD initialized at {=u8:#x}", config.lcd.address);
    }

    // Setup UART for the controller link (PA2=TX, PA3=RX on F042K6)
    let tx_buf = TX_BUF.init([0; 16]);
    let rx_buf = RX_BUF.init([0; 128]);

    let uart = BufferedUart::new(
        p.USART2,
        p.PA3, // RX
        p.PA2, // TX
        tx_buf,
        rx_buf,
        Irqs,
        usart_config(&config.uart),
    )
    .unwrap();

    info!("UART ready at {} baud", config.uart.baudrate);

    spawner.spawn(panel_task(panel, uart)).unwrap();
}

/// Set up the global allocator
fn init_heap() {
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Panel task - drains received bytes and applies completed lines
///
/// Runs forever; each tick is one receive-then-dispatch pass.
#[embassy_executor::task]
async fn panel_task(mut panel: Panel<Lcd>, uart: BufferedUart<'static>) {
    info!("Panel task started");

    // Nothing is ever sent back to the controller
    let (_tx, rx) = uart.split();
    let mut rx = PolledRx::new(rx);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        match panel.poll(&mut rx) {
            Ok(Dispatch::Idle) => {}
            Ok(Dispatch::Applied(row)) => {
                debug!("Row {} updated", row.index());
            }
            Ok(Dispatch::Ignored) => {
                trace!("Unrecognized line dropped");
            }
            Err(PanelError::Serial(e)) => {
                warn!("UART read error: {:?}", e);
            }
            Err(PanelError::Display(e)) => {
                warn!("LCD write failed: {:?}", e);
            }
        }

        ticker.next().await;
    }
}
