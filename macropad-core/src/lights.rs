//! Indicator animation: per-pixel brightness with a linear fade to black.
//!
//! Brightness is kept as an integer level out of [`FULL_LEVEL`] rather than a
//! float scalar, so the fade law is exact: an activated pixel reaches level 0
//! after exactly [`FULL_LEVEL`] render cycles, with no drift and no way to go
//! negative.

use crate::hal::PixelLink;
use crate::types::PixelColor;

/// Number of indicator pixels on the board.
pub const PIXEL_COUNT: usize = 3;

/// Brightness level of a freshly activated pixel. One level is shed per
/// render cycle, i.e. a step of 1/100 per iteration.
pub const FULL_LEVEL: u8 = 100;

/// Brightness level used to flood all pixels when diverting to the
/// bootloader (roughly half white).
pub const BOOT_FLOOD_LEVEL: u8 = 127;

/// Animation state of the three indicator pixels.
///
/// Base colors are loaded once and never change; the brightness levels are
/// the only continuously-evolving state in the whole core.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    colors: [PixelColor; PIXEL_COUNT],
    levels: [u8; PIXEL_COUNT],
}

impl Indicators {
    /// All pixels start at full brightness, as on power-up.
    #[must_use]
    pub const fn new(colors: [PixelColor; PIXEL_COUNT]) -> Self {
        Self {
            colors,
            levels: [FULL_LEVEL; PIXEL_COUNT],
        }
    }

    /// Snap pixel `index` back to full brightness.
    ///
    /// Called on every poll while the corresponding key is down, so a held
    /// key shows sustained full brightness instead of a fade.
    pub fn activate(&mut self, index: usize) {
        self.levels[index] = FULL_LEVEL;
    }

    /// Scale all nine color channels by their pixel's brightness and shift
    /// them out in fixed order: pixel 1 R,G,B through pixel 3 R,G,B.
    ///
    /// The whole nine-byte burst runs with interrupts disabled; the pixel
    /// wire's bit timing does not survive being preempted mid-train. The
    /// scoped guard re-enables on every exit path.
    pub fn render<L: PixelLink>(&self, link: &mut L) {
        let mut burst = [0u8; PIXEL_COUNT * 3];
        for (i, color) in self.colors.iter().enumerate() {
            let level = self.levels[i];
            burst[i * 3] = scale(color.r, level);
            burst[i * 3 + 1] = scale(color.g, level);
            burst[i * 3 + 2] = scale(color.b, level);
        }
        critical_section::with(|_| {
            for byte in burst {
                link.transmit(byte);
            }
        });
    }

    /// Advance the fade: every level still above zero sheds one step.
    ///
    /// Levels at zero stay at zero; nothing ever goes below it.
    pub fn fade(&mut self) {
        for level in &mut self.levels {
            *level = level.saturating_sub(1);
        }
    }

    /// Brightness of pixel `index` as a scalar in `[0.0, 1.0]`.
    #[must_use]
    pub fn brightness(&self, index: usize) -> f32 {
        f32::from(self.levels[index]) / f32::from(FULL_LEVEL)
    }
}

/// Flood every channel of every pixel with one fixed value.
///
/// Used right before the irreversible jump to the bootloader, so the device
/// visibly signals the mode it is in.
pub fn flood<L: PixelLink>(link: &mut L, value: u8) {
    critical_section::with(|_| {
        for _ in 0..PIXEL_COUNT * 3 {
            link.transmit(value);
        }
    });
}

fn scale(channel: u8, level: u8) -> u8 {
    ((u16::from(channel) * u16::from(level)) / u16::from(FULL_LEVEL)) as u8
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::RecordingLink;
    use std::vec::Vec;

    fn test_colors() -> [PixelColor; PIXEL_COUNT] {
        [
            PixelColor::new(100, 200, 50),
            PixelColor::new(0, 255, 0),
            PixelColor::new(10, 20, 30),
        ]
    }

    #[test]
    fn render_emits_nine_bytes_in_pixel_channel_order() {
        let lights = Indicators::new([
            PixelColor::new(1, 2, 3),
            PixelColor::new(4, 5, 6),
            PixelColor::new(7, 8, 9),
        ]);
        let mut link = RecordingLink::new();
        lights.render(&mut link);
        // full brightness: channels pass through unscaled
        assert_eq!(link.bytes(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn fade_reaches_zero_after_exactly_full_level_cycles() {
        let mut lights = Indicators::new(test_colors());
        lights.activate(0);
        for cycle in 0..FULL_LEVEL {
            assert!(
                lights.brightness(0) > 0.0,
                "went dark early, at cycle {cycle}"
            );
            lights.fade();
        }
        assert_eq!(lights.brightness(0), 0.0);
    }

    #[test]
    fn faded_out_pixel_stays_at_zero() {
        let mut lights = Indicators::new(test_colors());
        for _ in 0..FULL_LEVEL + 25 {
            lights.fade();
        }
        for i in 0..PIXEL_COUNT {
            assert_eq!(lights.brightness(i), 0.0);
        }
        let mut link = RecordingLink::new();
        lights.render(&mut link);
        assert_eq!(link.bytes(), [0; 9]);
    }

    #[test]
    fn brightness_stays_in_unit_range_for_any_sequence() {
        let mut lights = Indicators::new(test_colors());
        for step in 0..400usize {
            if step % 7 == 0 {
                lights.activate(step % PIXEL_COUNT);
            }
            let mut link = RecordingLink::new();
            lights.render(&mut link);
            lights.fade();
            for i in 0..PIXEL_COUNT {
                let b = lights.brightness(i);
                assert!((0.0..=1.0).contains(&b));
            }
        }
    }

    #[test]
    fn scaling_is_linear_per_channel() {
        let mut lights = Indicators::new([
            PixelColor::new(200, 100, 0),
            PixelColor::new(0, 0, 0),
            PixelColor::new(0, 0, 0),
        ]);
        // drop pixel 1 to half brightness
        for _ in 0..50 {
            lights.fade();
        }
        lights.activate(1);
        let mut link = RecordingLink::new();
        lights.render(&mut link);
        let bytes: Vec<u8> = link.bytes();
        assert_eq!(bytes[..3], [100, 50, 0]);
    }

    #[test]
    fn flood_sends_the_same_value_to_all_channels() {
        let mut link = RecordingLink::new();
        flood(&mut link, BOOT_FLOOD_LEVEL);
        assert_eq!(link.bytes(), [BOOT_FLOOD_LEVEL; 9]);
    }
}
