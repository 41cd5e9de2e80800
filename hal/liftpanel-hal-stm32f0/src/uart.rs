//! UART driver for STM32F0
//!
//! Bridges the buffered embassy receiver to the non-blocking
//! [`liftpanel_hal::UartRx`] trait.

use embassy_stm32::usart::{self, BufferedUartRx, Error as UsartError};
use embedded_io::{Read, ReadReady};
use liftpanel_hal::uart::{DataBits, Parity, SerialError, StopBits, UartConfig, UartRx};

/// Convert a board-independent UART configuration into embassy's
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}

/// Map an embassy USART error onto the shared serial error set
pub fn serial_error(e: UsartError) -> SerialError {
    match e {
        UsartError::Framing => SerialError::Framing,
        UsartError::Noise => SerialError::Noise,
        UsartError::Overrun => SerialError::Overrun,
        UsartError::Parity => SerialError::Parity,
        _ => SerialError::Other,
    }
}

/// Poll-style wrapper around the receive half of a `BufferedUart`
///
/// The interrupt handler fills the ring buffer in the background; reads
/// here only ever take what has already arrived.
pub struct PolledRx<'d> {
    rx: BufferedUartRx<'d>,
}

impl<'d> PolledRx<'d> {
    /// Wrap a buffered receiver
    pub fn new(rx: BufferedUartRx<'d>) -> Self {
        Self { rx }
    }

    /// Release the underlying receiver
    pub fn into_inner(self) -> BufferedUartRx<'d> {
        self.rx
    }
}

impl UartRx for PolledRx<'_> {
    type Error = SerialError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.has_pending()? {
            return Ok(None);
        }

        let mut buf = [0u8; 1];
        match self.rx.read(&mut buf).map_err(serial_error)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    fn has_pending(&mut self) -> Result<bool, Self::Error> {
        self.rx.read_ready().map_err(serial_error)
    }
}
