//! Hardware seams the core drives, as traits.
//!
//! The core never touches a peripheral directly; everything it needs from the
//! board is one of these primitives. The firmware crate implements them over
//! real hardware, the host tests implement them as mocks.
//!
//! All primitives are infallible by contract: storage reads always yield a
//! byte (an unprogrammed cell reads `0xFF`), keyboard presses are
//! fire-and-forget, and the pixel wire has no back-channel. Where an
//! implementation can genuinely fail underneath (e.g. a USB HID write), it
//! logs and swallows the error on its side of the seam.

use core::future::Future;

/// The six digital lines the core polls.
///
/// All lines are active-low: pressed/turned reads electrically low.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    Key1,
    Key2,
    Key3,
    KnobSwitch,
    EncoderA,
    EncoderB,
}

/// Raw digital line sampling.
pub trait Pins {
    /// Sample the electrical level of a line (`true` = high).
    ///
    /// The active-low interpretation happens in the core, not here.
    fn read(&mut self, line: Line) -> bool;
}

/// Persistent byte storage holding the action table.
pub trait ActionStorage {
    /// Read the byte at `offset` from the start of the configuration span.
    fn read_byte(&mut self, offset: u32) -> u8;
}

/// Virtual keyboard the dispatcher emits into.
///
/// Presses and releases come in matched pairs per dispatch. The transport
/// behind this trait (USB HID) is interrupt-driven and asynchronous to the
/// polling loop; the core only requires that these calls are safe to make
/// from the loop at any time.
pub trait HidKeyboard {
    /// Press virtual key `code`.
    fn press(&mut self, code: u8) -> impl Future<Output = ()>;

    /// Release virtual key `code`.
    fn release(&mut self, code: u8) -> impl Future<Output = ()>;
}

/// One-byte transmitter on the indicator pixel wire.
pub trait PixelLink {
    /// Shift one brightness-scaled byte out on the wire.
    ///
    /// Timing-critical: the caller must hold interrupts disabled for the
    /// whole burst this byte belongs to.
    fn transmit(&mut self, byte: u8);
}

/// Millisecond sleep, the loop's only notion of time.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32) -> impl Future<Output = ()>;
}

/// Watchdog service, fed once per loop iteration.
pub trait Watchdog {
    fn feed(&mut self);
}
