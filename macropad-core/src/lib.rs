//! Platform-agnostic core of a three-key + rotary-knob USB macro keypad.
//!
//! This crate holds the only part of the firmware with real state and timing
//! coordination: debounced edge detection for the keys and the knob switch,
//! quadrature decoding for the knob, the persistent-storage-backed action
//! table, simultaneous multi-key dispatch, and the indicator fade animation,
//! all driven by one cooperative polling loop. It has no platform
//! dependencies and can be tested on the host.
//!
//! # Overview
//!
//! - [`types`]: Core data structures ([`KeyAction`], [`KeySlot`], [`PixelColor`])
//! - [`hal`]: The board seams as traits ([`Pins`], [`HidKeyboard`], [`PixelLink`],
//!   [`ActionStorage`], [`Delay`], [`Watchdog`])
//! - [`keymap`]: The 33-byte persistent action table ([`ActionTable`])
//! - [`debounce`]: Loop-rate edge detection ([`DebouncedKey`])
//! - [`encoder`]: Quadrature decoding and the detent wait
//! - [`dispatch`]: Simultaneous multi-key press emission
//! - [`report`]: Stored-encoding translation and boot report state ([`BootReport`])
//! - [`lights`]: Indicator brightness animation ([`Indicators`])
//! - [`engine`]: The polling loop itself ([`MacroPad`])
//!
//! # Example
//!
//! One loop iteration against mocked hardware looks like this in the tests:
//! build an [`ActionTable`] from 33 bytes, hand it to [`MacroPad::new`]
//! together with the board seams, and `tick().await` — every poll, dispatch,
//! render, fade, sleep, and watchdog feed of that iteration happens inside.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod debounce;
pub mod dispatch;
pub mod encoder;
pub mod engine;
pub mod hal;
pub mod keymap;
pub mod lights;
pub mod report;
pub mod types;

#[cfg(test)]
mod testutil;

// Re-export main types at crate root
pub use debounce::{DebouncedKey, Edge};
pub use dispatch::{dispatch, HOLD_MS};
pub use encoder::DetentTimeout;
pub use engine::{bootloader_requested, MacroPad, ENCODER_DEBOUNCE_MS, LOOP_MS};
pub use hal::{ActionStorage, Delay, HidKeyboard, Line, PixelLink, Pins, Watchdog};
pub use keymap::{ActionTable, BASE_OFFSET, TABLE_LEN};
pub use lights::{flood, Indicators, BOOT_FLOOD_LEVEL, FULL_LEVEL, PIXEL_COUNT};
pub use report::BootReport;
pub use types::{Direction, KeyAction, KeySlot, PixelColor, EMPTY_SLOT};
