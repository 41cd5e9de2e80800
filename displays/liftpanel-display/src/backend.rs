//! Display backend trait
//!
//! Defines the interface for character displays addressed by row and column.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Row or column outside the display
    InvalidPosition,
    /// Display not initialized
    NotInitialized,
}

/// Character display backend
///
/// Provides a hardware-agnostic interface for text displays with a
/// write cursor. Writes start at the cursor and advance it one column per
/// byte; bytes past the last visible column are hardware-dependent.
pub trait CharDisplay {
    /// Bring the controller into a known state
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Blank every cell and move the cursor to (0, 0)
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Switch the backlight on or off
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Move the write cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write raw character codes at the cursor
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;

    /// Write text at the cursor
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        self.write_bytes(text.as_bytes())
    }

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}

impl<T: CharDisplay + ?Sized> CharDisplay for &mut T {
    fn init(&mut self) -> Result<(), DisplayError> {
        (**self).init()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        (**self).set_backlight(on)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        (**self).set_cursor(col, row)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        (**self).write_bytes(bytes)
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }
}
