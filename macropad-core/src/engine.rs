//! The main control loop: single-threaded cooperative polling of every
//! input, action dispatch, indicator animation, watchdog service.
//!
//! All persistent state lives in one explicit [`MacroPad`] struct; there are
//! no module-level statics. Data flows one direction per iteration:
//! inputs -> dispatcher -> keyboard side effect, and independently animator
//! state -> pixel side effect. Nothing calls back into anything.

use crate::debounce::{DebouncedKey, Edge};
use crate::dispatch::dispatch;
use crate::encoder;
use crate::hal::{Delay, HidKeyboard, Line, PixelLink, Pins, Watchdog};
use crate::keymap::ActionTable;
use crate::lights::Indicators;
use crate::types::Direction;

/// Loop period, in milliseconds. Doubles as the pixel latch delay and the
/// debounce margin for the keys and switch.
pub const LOOP_MS: u32 = 5;

/// Settle time after a knob direction event, before parking for the detent.
pub const ENCODER_DEBOUNCE_MS: u32 = 10;

const KEY_LINES: [Line; 3] = [Line::Key1, Line::Key2, Line::Key3];

/// True if the user is holding key 1 at power-on, requesting bootloader mode.
///
/// Checked exactly once at startup, never inside the loop. When it returns
/// true the caller floods the indicators and transfers control to the
/// bootloader; the loop body never executes.
pub fn bootloader_requested<P: Pins>(pins: &mut P) -> bool {
    !pins.read(Line::Key1)
}

/// The whole device: configuration, per-line debounce state, indicator
/// animation, and the board primitives it drives.
pub struct MacroPad<P, K, L, D, W> {
    pins: P,
    keyboard: K,
    link: L,
    delay: D,
    watchdog: W,
    table: ActionTable,
    keys: [DebouncedKey; 3],
    knob_switch: DebouncedKey,
    lights: Indicators,
}

impl<P, K, L, D, W> MacroPad<P, K, L, D, W>
where
    P: Pins,
    K: HidKeyboard,
    L: PixelLink,
    D: Delay,
    W: Watchdog,
{
    /// Assemble the device from its loaded configuration and board seams.
    pub fn new(table: ActionTable, pins: P, keyboard: K, link: L, delay: D, watchdog: W) -> Self {
        let lights = Indicators::new(table.colors);
        Self {
            pins,
            keyboard,
            link,
            delay,
            watchdog,
            table,
            keys: [DebouncedKey::new(); 3],
            knob_switch: DebouncedKey::new(),
            lights,
        }
    }

    /// Run the polling loop forever.
    ///
    /// Terminal state: none. Runs until power loss; the only escape is the
    /// watchdog resetting the device if an iteration stalls past its timeout.
    pub async fn run(&mut self) -> ! {
        loop {
            self.tick().await;
        }
    }

    /// One loop iteration: poll keys 1-3, the knob switch, the knob itself,
    /// then render and fade the indicators, sleep, and feed the watchdog.
    pub async fn tick(&mut self) {
        // Keys 1-3: dispatch on the press edge, keep the indicator saturated
        // while held. Nothing happens on release.
        for (i, line) in KEY_LINES.iter().enumerate() {
            let pressed = !self.pins.read(*line);
            match self.keys[i].update(pressed) {
                Edge::Pressed => {
                    self.lights.activate(i);
                    dispatch(&mut self.keyboard, &mut self.delay, &self.table.keys[i]).await;
                }
                Edge::Held => self.lights.activate(i),
                Edge::Released | Edge::Idle => {}
            }
        }

        // Knob switch: same edge detection, but no indicator of its own.
        let pressed = !self.pins.read(Line::KnobSwitch);
        if let Edge::Pressed = self.knob_switch.update(pressed) {
            dispatch(&mut self.keyboard, &mut self.delay, &self.table.knob_switch).await;
        }

        // Knob rotation: one event per detent, then park until the knob
        // rests again. This is the loop's only input-dependent stall.
        if let Some(direction) = encoder::poll(&mut self.pins) {
            let action = match direction {
                Direction::Clockwise => &self.table.knob_clockwise,
                Direction::CounterClockwise => &self.table.knob_counter_clockwise,
            };
            dispatch(&mut self.keyboard, &mut self.delay, action).await;
            self.delay.delay_ms(ENCODER_DEBOUNCE_MS).await;
            let _ = encoder::wait_detent(&mut self.pins, &mut self.delay, None).await;
        }

        self.lights.render(&mut self.link);
        self.lights.fade();

        self.delay.delay_ms(LOOP_MS).await;
        self.watchdog.feed();
    }

    /// The indicator animation state (read-only).
    pub fn lights(&self) -> &Indicators {
        &self.lights
    }

    /// The keyboard seam.
    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    /// Mutable access to the pin seam.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Decompose the device back into its board seams.
    pub fn into_parts(self) -> (P, K, L, D, W) {
        (
            self.pins,
            self.keyboard,
            self.link,
            self.delay,
            self.watchdog,
        )
    }
}
