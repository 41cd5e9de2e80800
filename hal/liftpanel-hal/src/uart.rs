//! UART serial communication abstractions
//!
//! The panel runs a single cooperative loop, so the receive side is
//! poll-based: a read either yields a byte that is already buffered or
//! reports that nothing is waiting.

/// UART receiver
///
/// Non-blocking byte source for the line receiver.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read one byte if one is already buffered
    ///
    /// Returns `Ok(None)` when no byte is available. Never waits.
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Check whether at least one byte can be read without waiting
    fn has_pending(&mut self) -> Result<bool, Self::Error>;
}

impl<T: UartRx + ?Sized> UartRx for &mut T {
    type Error = T::Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).try_read_byte()
    }

    fn has_pending(&mut self) -> Result<bool, Self::Error> {
        (**self).has_pending()
    }
}

/// Serial receive errors, chip-independent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Framing error (bad stop bit)
    Framing,
    /// Noise detected on the line
    Noise,
    /// Receive overrun, bytes were lost
    Overrun,
    /// Parity mismatch
    Parity,
    /// Other error
    Other,
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600, // Host controller talks 9600 8N1
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted<'a> {
        bytes: &'a [u8],
    }

    impl UartRx for Scripted<'_> {
        type Error = SerialError;

        fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            match self.bytes.split_first() {
                Some((&b, rest)) => {
                    self.bytes = rest;
                    Ok(Some(b))
                }
                None => Ok(None),
            }
        }

        fn has_pending(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.bytes.is_empty())
        }
    }

    #[test]
    fn test_default_config_is_9600_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut rx = Scripted { bytes: b"ab" };
        {
            let mut by_ref = &mut rx;
            let first = <&mut Scripted as UartRx>::try_read_byte(&mut by_ref);
            assert_eq!(first, Ok(Some(b'a')));
        }
        assert!(rx.has_pending().unwrap());
        assert_eq!(rx.try_read_byte(), Ok(Some(b'b')));
        assert_eq!(rx.try_read_byte(), Ok(None));
        assert!(!rx.has_pending().unwrap());
    }
}
