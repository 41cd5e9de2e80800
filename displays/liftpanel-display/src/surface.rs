//! In-memory character surface
//!
//! Models the visible cells of a 16x2 LCD so panel behavior can be checked
//! on the host.

use crate::backend::{CharDisplay, DisplayError};

/// Number of character rows on the display
pub const LCD_ROWS: usize = 2;

/// Number of visible character columns on the display
pub const LCD_COLS: usize = 16;

/// Width of one row of HD44780 display RAM
const DDRAM_ROW_LEN: u8 = 40;

/// Blank cell
const BLANK: u8 = b' ';

/// Character surface with a write cursor
///
/// Bytes written past the last visible column move the cursor but leave
/// no trace, which is how the panel sees overlong text on real glass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    cells: [[u8; LCD_COLS]; LCD_ROWS],
    col: u8,
    row: u8,
    backlight: bool,
    initialized: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Create a blank, uninitialized surface
    pub const fn new() -> Self {
        Self {
            cells: [[BLANK; LCD_COLS]; LCD_ROWS],
            col: 0,
            row: 0,
            backlight: false,
            initialized: false,
        }
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> Option<&[u8; LCD_COLS]> {
        self.cells.get(row)
    }

    /// One row as text, if it is valid UTF-8
    pub fn row_str(&self, row: usize) -> Option<&str> {
        self.row(row).and_then(|cells| core::str::from_utf8(cells).ok())
    }

    /// Current cursor position as (col, row)
    pub fn cursor(&self) -> (u8, u8) {
        (self.col, self.row)
    }

    /// Whether the backlight is on
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl CharDisplay for Surface {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.initialized = true;
        self.clear()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        for row in &mut self.cells {
            row.fill(BLANK);
        }
        self.col = 0;
        self.row = 0;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.backlight = on;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        if row as usize >= LCD_ROWS || col >= DDRAM_ROW_LEN {
            return Err(DisplayError::InvalidPosition);
        }
        self.col = col;
        self.row = row;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        let row = &mut self.cells[self.row as usize];
        for &byte in bytes {
            if let Some(cell) = row.get_mut(self.col as usize) {
                *cell = byte;
            }
            self.col = self.col.saturating_add(1);
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (LCD_COLS as u8, LCD_ROWS as u8)
    }
}
