//! Action dispatch: simultaneous multi-key press emission.

use crate::hal::{Delay, HidKeyboard};
use crate::types::KeyAction;

/// How long all keys of an action are held down together, in milliseconds.
/// One full host-side scan interval.
pub const HOLD_MS: u32 = 1;

/// Press every occupied slot of `action` in order, hold, release in the same
/// order.
///
/// From the host's point of view the whole action is one chord: all keys go
/// down together, stay down for [`HOLD_MS`], and come up together. Presses
/// and releases are never interleaved. Transport failures are not observable
/// here; dispatch is fire-and-forget.
pub async fn dispatch<K: HidKeyboard, D: Delay>(
    keyboard: &mut K,
    delay: &mut D,
    action: &KeyAction,
) {
    for code in action.codes() {
        keyboard.press(code).await;
    }
    delay.delay_ms(HOLD_MS).await;
    for code in action.codes() {
        keyboard.release(code).await;
    }
}
