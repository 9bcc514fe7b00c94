//! Core keypad types: KeySlot, KeyAction, PixelColor, Direction.

/// The wire value that marks an unused action slot in persistent storage.
///
/// Confined to storage decoding; inside the core an empty slot is
/// [`KeySlot::Empty`], not a magic number.
pub const EMPTY_SLOT: u8 = 255;

/// One slot of a key action: either a virtual-keyboard keycode or nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeySlot {
    /// A virtual-keyboard keycode to press.
    Key(u8),
    /// Unused slot, skipped during dispatch.
    Empty,
}

impl KeySlot {
    /// Decode a raw storage byte (255 means empty).
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        if raw == EMPTY_SLOT {
            KeySlot::Empty
        } else {
            KeySlot::Key(raw)
        }
    }
}

/// An ordered sequence of up to four keycodes pressed simultaneously.
///
/// Empty slots are skipped during dispatch but the relative order of the
/// occupied slots is preserved.
///
/// # Example
///
/// ```
/// use macropad_core::{KeyAction, KeySlot};
///
/// let action = KeyAction::new([
///     KeySlot::Key(0x04),
///     KeySlot::Empty,
///     KeySlot::Key(0x05),
///     KeySlot::Empty,
/// ]);
/// let codes: Vec<u8> = action.codes().collect();
/// assert_eq!(codes, [0x04, 0x05]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyAction {
    slots: [KeySlot; 4],
}

impl KeyAction {
    /// Create an action from four explicit slots.
    #[must_use]
    pub const fn new(slots: [KeySlot; 4]) -> Self {
        Self { slots }
    }

    /// An action with all slots empty (dispatching it presses nothing).
    pub const NONE: Self = Self::new([KeySlot::Empty; 4]);

    /// The raw slots, in order.
    #[must_use]
    pub const fn slots(&self) -> &[KeySlot; 4] {
        &self.slots
    }

    /// Iterate over the occupied slots in order, yielding their keycodes.
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            KeySlot::Key(code) => Some(*code),
            KeySlot::Empty => None,
        })
    }

    /// True if every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes().next().is_none()
    }
}

impl Default for KeyAction {
    fn default() -> Self {
        Self::NONE
    }
}

/// Base color of one indicator pixel, loaded once at startup.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Rotation direction of the knob, decoded from the quadrature phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}
