//! STM32F0-specific HAL for the Liftpanel firmware
//!
//! This crate adapts embassy-stm32 peripherals to the `liftpanel-hal`
//! traits. It supports:
//!
//! - STM32F042K6 (display board)
//! - STM32F042F6
//!
//! # Features
//!
//! - `stm32f042k6` / `stm32f042f6` - Select the chip
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware creates the embassy `BufferedUart` itself and wraps the
//! receive half in [`uart::PolledRx`] so the panel can poll it without
//! waiting.

#![no_std]

pub mod uart;

pub use uart::{usart_config, PolledRx};
