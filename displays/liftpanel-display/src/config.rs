//! Panel configuration
//!
//! Everything is fixed at build time; there is no config file.

use liftpanel_hal::UartConfig;

/// Default 7-bit address of a PCF8574 LCD backpack (A0..A2 pulled high)
pub const PCF8574_DEFAULT_ADDR: u8 = 0x27;

/// Character LCD settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdConfig {
    /// 7-bit I2C address of the backpack
    pub address: u8,
    /// Visible columns
    pub columns: u8,
    /// Visible rows
    pub rows: u8,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            address: PCF8574_DEFAULT_ADDR,
            columns: 16,
            rows: 2,
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// Host link settings
    pub uart: UartConfig,
    /// Display settings
    pub lcd: LcdConfig,
    /// Text shown on each row at startup
    pub greeting: [&'static str; 2],
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::default(),
            lcd: LcdConfig::default(),
            greeting: ["Elevator System", "Ready..."],
        }
    }
}
