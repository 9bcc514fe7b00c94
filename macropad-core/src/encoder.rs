//! Quadrature decoding for the rotary knob.
//!
//! Single-step decoding with a detent wait: when phase A goes active the
//! level of phase B at that instant gives the direction, then the loop parks
//! until A returns to its rest level. One direction event per detent, never
//! an accumulation of ticks.

use crate::hal::{Delay, Line, Pins};
use crate::types::Direction;

/// Poll interval while parked waiting for the detent.
const DETENT_POLL_MS: u32 = 1;

/// The knob sat between detents longer than the caller's limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetentTimeout;

/// Sample both phases once and decode a direction, if the knob moved.
///
/// Phase A is active-low; with A at rest this returns `None` regardless of
/// phase B. With A active, B high means clockwise, B low counter-clockwise.
pub fn poll<P: Pins>(pins: &mut P) -> Option<Direction> {
    if pins.read(Line::EncoderA) {
        return None;
    }
    if pins.read(Line::EncoderB) {
        Some(Direction::Clockwise)
    } else {
        Some(Direction::CounterClockwise)
    }
}

/// Park until phase A returns to its rest level (the next detent).
///
/// With `limit = None` this waits as long as it takes: a knob stuck
/// mid-detent stalls the whole loop until the watchdog resets the device. A
/// caller that wants a bound instead passes a limit in milliseconds and gets
/// [`DetentTimeout`] once it elapses.
pub async fn wait_detent<P: Pins, D: Delay>(
    pins: &mut P,
    delay: &mut D,
    limit: Option<u32>,
) -> Result<(), DetentTimeout> {
    let mut waited = 0u32;
    while !pins.read(Line::EncoderA) {
        if let Some(limit) = limit {
            if waited >= limit {
                return Err(DetentTimeout);
            }
        }
        delay.delay_ms(DETENT_POLL_MS).await;
        waited = waited.saturating_add(DETENT_POLL_MS);
    }
    Ok(())
}
