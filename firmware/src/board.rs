//! Board wiring: GPIO lines, flash-backed action storage, timing and
//! watchdog seams.
//!
//! Pin assignment (all switches to ground, internal pull-ups):
//!
//! ```text
//! GP0   WS2812 data
//! GP2   key 1
//! GP3   key 2
//! GP4   key 3
//! GP5   knob switch
//! GP6   encoder phase A
//! GP7   encoder phase B
//! ```

use defmt::warn;
use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::gpio::Input;
use embassy_rp::peripherals::FLASH;
use embassy_time::Timer;
use macropad_core::{ActionStorage, Delay, Line, Pins, Watchdog};

/// Total flash size of the board (2 MiB on the Pico).
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// The action table lives in the last erase sector of flash, out of the way
/// of the program image.
pub const CONFIG_FLASH_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// The six input lines, sampled directly.
pub struct BoardPins {
    key1: Input<'static>,
    key2: Input<'static>,
    key3: Input<'static>,
    knob_switch: Input<'static>,
    encoder_a: Input<'static>,
    encoder_b: Input<'static>,
}

impl BoardPins {
    pub fn new(
        key1: Input<'static>,
        key2: Input<'static>,
        key3: Input<'static>,
        knob_switch: Input<'static>,
        encoder_a: Input<'static>,
        encoder_b: Input<'static>,
    ) -> Self {
        Self {
            key1,
            key2,
            key3,
            knob_switch,
            encoder_a,
            encoder_b,
        }
    }
}

impl Pins for BoardPins {
    fn read(&mut self, line: Line) -> bool {
        let input = match line {
            Line::Key1 => &self.key1,
            Line::Key2 => &self.key2,
            Line::Key3 => &self.key3,
            Line::KnobSwitch => &self.knob_switch,
            Line::EncoderA => &self.encoder_a,
            Line::EncoderB => &self.encoder_b,
        };
        input.is_high()
    }
}

/// Single-byte reads from the reserved configuration sector.
///
/// The storage seam is infallible by contract; a failed read reports the
/// erased value, which decodes to an empty action slot.
pub struct FlashStorage<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> FlashStorage<'d> {
    pub fn new(flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>) -> Self {
        Self { flash }
    }
}

impl ActionStorage for FlashStorage<'_> {
    fn read_byte(&mut self, offset: u32) -> u8 {
        let mut buf = [0u8; 1];
        match self.flash.blocking_read(CONFIG_FLASH_OFFSET + offset, &mut buf) {
            Ok(()) => buf[0],
            Err(e) => {
                warn!("flash read at +{} failed: {:?}", offset, e);
                0xFF
            }
        }
    }
}

/// Millisecond sleep over the embassy timer.
pub struct TimerDelay;

impl Delay for TimerDelay {
    async fn delay_ms(&mut self, ms: u32) {
        Timer::after_millis(u64::from(ms)).await;
    }
}

/// The hardware watchdog, fed once per loop iteration.
pub struct WatchdogFeeder {
    watchdog: embassy_rp::watchdog::Watchdog,
}

impl WatchdogFeeder {
    /// Takes a watchdog that has already been started.
    pub fn new(watchdog: embassy_rp::watchdog::Watchdog) -> Self {
        Self { watchdog }
    }
}

impl Watchdog for WatchdogFeeder {
    fn feed(&mut self) {
        self.watchdog.feed();
    }
}
