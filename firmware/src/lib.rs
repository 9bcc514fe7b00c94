//! RP2040 firmware for the 3-key + rotary-encoder macro keypad.
//!
//! This crate implements the board seams the core drives: GPIO sampling,
//! USB HID keyboard output, the WS2812 indicator wire, flash-backed action
//! storage, and the watchdog.

#![no_std]

// Re-export core types for convenience
pub use macropad_core::{
    bootloader_requested, dispatch, flood, ActionStorage, ActionTable, Delay, Direction,
    HidKeyboard, Indicators, KeyAction, KeySlot, Line, MacroPad, PixelColor, PixelLink, Pins,
    Watchdog, BOOT_FLOOD_LEVEL,
};

pub mod board;
pub mod usb_keyboard;
pub mod ws2812;

pub use board::{BoardPins, FlashStorage, TimerDelay, WatchdogFeeder, CONFIG_FLASH_OFFSET};
pub use usb_keyboard::{configure_usb_hid, KeyboardRequestHandler, UsbKeyboard};
pub use ws2812::Ws2812;
