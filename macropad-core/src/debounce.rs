//! Loop-rate edge detection for the keys and the knob switch.
//!
//! There is no dedicated debounce timer: the ~5 ms loop period is the filter.
//! Each line carries one bit of state, the debounced level observed at the
//! end of the previous poll.

/// What one poll of a line observed, relative to the previous poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released -> pressed transition. Dispatch fires on this and only this.
    Pressed,
    /// Pressed -> released transition. Nothing to do.
    Released,
    /// Still pressed since the previous poll (keep-alive for the indicator).
    Held,
    /// Still released.
    Idle,
}

/// Per-line debounced state.
#[derive(Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncedKey {
    pressed_last: bool,
}

impl DebouncedKey {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed_last: false,
        }
    }

    /// Feed one poll's logical level (`true` = pressed) and classify it.
    ///
    /// Updates the stored state exactly once per poll, and only when the
    /// level changed.
    pub fn update(&mut self, pressed: bool) -> Edge {
        if pressed != self.pressed_last {
            self.pressed_last = pressed;
            if pressed {
                Edge::Pressed
            } else {
                Edge::Released
            }
        } else if pressed {
            Edge::Held
        } else {
            Edge::Idle
        }
    }

    /// The debounced level as of the last poll.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed_last
    }
}
