//! Liftpanel Serial Protocol
//!
//! This crate defines the text protocol between the elevator controller
//! (host) and the display module. The display is a "dumb terminal": it
//! never answers, it only shows what it is told.
//!
//! # Protocol Overview
//!
//! Every command is one line of ASCII terminated by `\n`:
//! ```text
//! ┌────────┬──────────────────────┬────┐
//! │ PREFIX │ TEXT                 │ \n │
//! │ 3B     │ 0..n bytes           │ 1B │
//! └────────┴──────────────────────┴────┘
//! ```
//!
//! | Prefix | Effect                         |
//! |--------|--------------------------------|
//! | `L1:`  | replace the top row with TEXT    |
//! | `L2:`  | replace the bottom row with TEXT |
//!
//! Any other line is dropped without a reply. A carriage return before the
//! terminator is part of TEXT.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod command;
pub mod line;

pub use command::{CommandError, LineCommand, Row, MAX_ENCODED_LEN};
pub use line::{LineReceiver, LINE_TERMINATOR};
