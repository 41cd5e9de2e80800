//! Character display abstraction and command dispatch for Liftpanel
//!
//! This crate provides:
//! - `CharDisplay` trait for row/column character displays
//! - `Surface`, an in-memory 16x2 display used on the host
//! - `Hd44780`, a driver for HD44780 LCDs behind a PCF8574 I2C backpack
//! - `Panel`, which owns the line receiver and applies commands to a display
//!
//! # Architecture
//!
//! The firmware constructs a `Panel` around the real LCD and calls
//! [`Panel::poll`] on every tick. Host tests do the same against a
//! `Surface` and inspect the resulting cells.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod config;
pub mod lcd;
pub mod panel;
pub mod surface;

// Re-export key types
pub use backend::{CharDisplay, DisplayError};
pub use config::{LcdConfig, PanelConfig};
pub use lcd::Hd44780;
pub use panel::{Dispatch, Panel, PanelError};
pub use surface::{Surface, LCD_COLS, LCD_ROWS};
