//! Line assembly for the serial command stream.
//!
//! Bytes are accumulated until the terminator arrives. At that point the
//! receiver holds exactly one complete line and stops consuming input until
//! the line is dispatched, so a burst containing several commands is worked
//! off one line per pass while the rest waits in the UART buffer.

use alloc::vec::Vec;
use liftpanel_hal::UartRx;

/// Byte that ends one command line
pub const LINE_TERMINATOR: u8 = b'\n';

/// Initial buffer reservation, enough for any line the controller sends
const INITIAL_CAPACITY: usize = 200;

/// Accumulates serial bytes into a single command line
///
/// `ready` is true if and only if `buffer` holds a complete line that has
/// not yet been dispatched. The buffer has no upper bound.
#[derive(Debug, Clone, Default)]
pub struct LineReceiver {
    buffer: Vec<u8>,
    ready: bool,
}

impl LineReceiver {
    /// Create an empty receiver without allocating
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            ready: false,
        }
    }

    /// Create an empty receiver with the default reservation
    pub fn with_default_capacity() -> Self {
        Self {
            buffer: Vec::with_capacity(INITIAL_CAPACITY),
            ready: false,
        }
    }

    /// Feed a single byte to the receiver
    ///
    /// Returns `true` once a complete line is available. The terminator is
    /// not stored; every other byte, `\r` included, is. Bytes fed while a
    /// line is already pending are dropped.
    pub fn feed(&mut self, byte: u8) -> bool {
        if self.ready {
            return true;
        }

        if byte == LINE_TERMINATOR {
            self.ready = true;
        } else {
            self.buffer.push(byte);
        }
        self.ready
    }

    /// Feed bytes from a slice, up to the end of a line
    ///
    /// Stops right after the first terminator, like [`drain`](Self::drain).
    /// Returns how many bytes were consumed; the caller keeps the rest for
    /// after the line is dispatched.
    pub fn feed_slice(&mut self, bytes: &[u8]) -> usize {
        let mut consumed = 0;
        for &byte in bytes {
            if self.ready {
                break;
            }
            self.feed(byte);
            consumed += 1;
        }
        consumed
    }

    /// Pull every byte the source has available, up to the end of a line
    ///
    /// Stops as soon as a line is complete so later lines stay queued in the
    /// source. Returns whether a line is ready.
    pub fn drain<R: UartRx>(&mut self, rx: &mut R) -> Result<bool, R::Error> {
        while !self.ready {
            match rx.try_read_byte()? {
                Some(byte) => {
                    self.feed(byte);
                }
                None => break,
            }
        }
        Ok(self.ready)
    }

    /// Check whether a complete, undispatched line is buffered
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The completed line, without its terminator
    pub fn line(&self) -> Option<&[u8]> {
        if self.ready {
            Some(&self.buffer)
        } else {
            None
        }
    }

    /// Bytes received so far, complete or not
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }


    /// Discard the buffer and reset the ready flag
    ///
    /// Keeps the allocation for the next line.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.ready = false;
    }
}
