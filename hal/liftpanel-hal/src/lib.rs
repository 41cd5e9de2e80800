//! Liftpanel Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the panel logic is
//! written against, so the same code runs on the STM32F0 display board and
//! on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (liftpanel-display, -fw)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  liftpanel-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌────────────────┐
//!             │ liftpanel-hal- │
//!             │    stm32f0     │
//!             └────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartRx`] - Non-blocking serial receive
//!
//! The display bus itself goes through `embedded-hal`'s I2C trait.

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key items at crate root for convenience
pub use uart::{SerialError, UartConfig, UartRx};
