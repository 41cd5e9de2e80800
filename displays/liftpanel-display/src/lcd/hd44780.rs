//! HD44780 character LCD driver
//!
//! Driver for HD44780-compatible 16x2 LCDs wired through a PCF8574 I2C
//! port expander ("LCD backpack"). The controller runs in 4-bit mode; every
//! byte goes out as two nibbles, each latched by pulsing EN.
//!
//! Expander pin map:
//!
//! ```text
//! P7 P6 P5 P4 │ P3 │ P2 │ P1 │ P0
//! D7 D6 D5 D4 │ BL │ EN │ RW │ RS
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::backend::{CharDisplay, DisplayError};
use crate::config::LcdConfig;

/// PCF8574 control bits
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instructions and flags
#[allow(dead_code)]
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode
    pub const ENTRY_LEFT: u8 = 0x02;

    // Display control
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    // Function set
    pub const MODE_4BIT: u8 = 0x00;
    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X8: u8 = 0x00;
}

/// DDRAM start address of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Width of one row of display RAM
const DDRAM_ROW_LEN: u8 = 40;

/// HD44780 LCD behind a PCF8574 backpack
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    config: LcdConfig,
    backlight: u8,
    initialized: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new driver; call [`CharDisplay::init`] before use
    pub fn new(i2c: I2C, delay: D, config: LcdConfig) -> Self {
        Self {
            i2c,
            delay,
            config,
            backlight: 0,
            initialized: false,
        }
    }

    /// Release the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Write one byte to the expander, backlight bit included
    fn expander_write(&mut self, data: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.config.address, &[data | self.backlight])
            .map_err(|_| DisplayError::Communication)
    }

    /// Latch the data lines into the controller
    fn pulse_enable(&mut self, data: u8) -> Result<(), DisplayError> {
        self.expander_write(data | pin::EN)?;
        self.delay.delay_us(1); // EN pulse > 450 ns
        self.expander_write(data & !pin::EN)?;
        self.delay.delay_us(50); // commands need > 37 us to settle
        Ok(())
    }

    /// Send the high nibble of `bits` together with the control bits
    fn write4(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.expander_write(bits)?;
        self.pulse_enable(bits)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write4((value & 0xF0) | mode)?;
        self.write4(((value << 4) & 0xF0) | mode)
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, pin::RS)
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<I2C, D> CharDisplay for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on: wait for Vcc to rise above 2.7 V
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1000);

        // Force 8-bit mode three times, then switch to 4-bit
        self.write4(0x03 << 4)?;
        self.delay.delay_us(4500);
        self.write4(0x03 << 4)?;
        self.delay.delay_us(4500);
        self.write4(0x03 << 4)?;
        self.delay.delay_us(150);
        self.write4(0x02 << 4)?;

        let lines = if self.config.rows > 1 { cmd::TWO_LINE } else { 0 };
        self.command(cmd::FUNCTION_SET | cmd::MODE_4BIT | lines | cmd::FONT_5X8)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.initialized = true;

        self.clear()?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT)?;
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(2000); // clear takes 1.52 ms
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = if on { pin::BACKLIGHT } else { 0 };
        self.expander_write(0)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        if row >= self.config.rows || row as usize >= ROW_OFFSETS.len() || col >= DDRAM_ROW_LEN {
            return Err(DisplayError::InvalidPosition);
        }
        self.command(cmd::SET_DDRAM_ADDR | (col + ROW_OFFSETS[row as usize]))
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        for &byte in bytes {
            self.data(byte)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.config.columns, self.config.rows)
    }
}
