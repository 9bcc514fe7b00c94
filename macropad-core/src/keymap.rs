//! Persistent action table: the 33-byte configuration span.
//!
//! Layout, one byte per cell starting at [`BASE_OFFSET`]:
//!
//! ```text
//! offset  0..4   key 1 action        (4 slots)
//! offset  4..8   key 2 action
//! offset  8..12  key 3 action
//! offset 12..16  knob switch action
//! offset 16..20  knob clockwise action
//! offset 20..24  knob counter-clockwise action
//! offset 24..27  pixel 1 color       (R, G, B)
//! offset 27..30  pixel 2 color
//! offset 30..33  pixel 3 color
//! ```
//!
//! No validation: any byte is accepted as-is, 255 in an action slot means
//! empty. A corrupted or unprogrammed table silently produces no-op or
//! garbled actions; that is this design's accepted risk.

use crate::hal::ActionStorage;
use crate::types::{KeyAction, KeySlot, PixelColor};

/// Storage offset of the first configuration byte.
pub const BASE_OFFSET: u32 = 0;

/// Total size of the configuration span in bytes.
pub const TABLE_LEN: u32 = 33;

/// Everything the device is configured to do, loaded once at startup and
/// immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActionTable {
    /// Actions for keys 1-3, in key order.
    pub keys: [KeyAction; 3],
    /// Action for pressing the knob switch.
    pub knob_switch: KeyAction,
    /// Action for one clockwise knob detent.
    pub knob_clockwise: KeyAction,
    /// Action for one counter-clockwise knob detent.
    pub knob_counter_clockwise: KeyAction,
    /// Base colors of the three indicator pixels.
    pub colors: [PixelColor; 3],
}

impl ActionTable {
    /// Read the whole table from byte storage.
    ///
    /// Performs exactly [`TABLE_LEN`] sequential single-byte reads starting
    /// at [`BASE_OFFSET`].
    pub fn load<S: ActionStorage>(storage: &mut S) -> Self {
        let mut reader = Reader {
            storage,
            offset: BASE_OFFSET,
        };
        Self {
            keys: [reader.action(), reader.action(), reader.action()],
            knob_switch: reader.action(),
            knob_clockwise: reader.action(),
            knob_counter_clockwise: reader.action(),
            colors: [reader.color(), reader.color(), reader.color()],
        }
    }
}

/// Sequential cursor over the configuration span.
struct Reader<'a, S: ActionStorage> {
    storage: &'a mut S,
    offset: u32,
}

impl<S: ActionStorage> Reader<'_, S> {
    fn byte(&mut self) -> u8 {
        let value = self.storage.read_byte(self.offset);
        self.offset += 1;
        value
    }

    fn action(&mut self) -> KeyAction {
        KeyAction::new([
            KeySlot::from_raw(self.byte()),
            KeySlot::from_raw(self.byte()),
            KeySlot::from_raw(self.byte()),
            KeySlot::from_raw(self.byte()),
        ])
    }

    fn color(&mut self) -> PixelColor {
        PixelColor::new(self.byte(), self.byte(), self.byte())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::MemStorage;

    #[test]
    fn load_reconstructs_documented_layout() {
        let mut bytes = [0u8; TABLE_LEN as usize];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        // key 2 slot 1 and the whole knob switch action are empty
        bytes[5] = 255;
        bytes[12..16].fill(255);

        let table = ActionTable::load(&mut MemStorage::new(&bytes));

        assert_eq!(
            table.keys[0],
            KeyAction::new([
                KeySlot::Key(0),
                KeySlot::Key(1),
                KeySlot::Key(2),
                KeySlot::Key(3),
            ])
        );
        assert_eq!(
            table.keys[1],
            KeyAction::new([
                KeySlot::Key(4),
                KeySlot::Empty,
                KeySlot::Key(6),
                KeySlot::Key(7),
            ])
        );
        assert_eq!(table.knob_switch, KeyAction::NONE);
        assert_eq!(
            table.knob_clockwise,
            KeyAction::new([
                KeySlot::Key(16),
                KeySlot::Key(17),
                KeySlot::Key(18),
                KeySlot::Key(19),
            ])
        );
        assert_eq!(table.colors[0], PixelColor::new(24, 25, 26));
        assert_eq!(table.colors[1], PixelColor::new(27, 28, 29));
        assert_eq!(table.colors[2], PixelColor::new(30, 31, 32));
    }

    #[test]
    fn load_reads_exactly_once_per_cell() {
        let bytes = [0xAB; TABLE_LEN as usize];
        let mut storage = MemStorage::new(&bytes);
        ActionTable::load(&mut storage);
        // 6 actions x 4 slots + 3 colors x 3 channels
        assert_eq!(storage.reads(), 33);
        assert_eq!(storage.reads(), TABLE_LEN);
        assert_eq!(storage.highest_offset(), TABLE_LEN - 1);
    }

    #[test]
    fn any_byte_value_is_accepted() {
        // 0x00 and 0xFE are valid keycodes, only 0xFF is empty
        let mut bytes = [0x00; TABLE_LEN as usize];
        bytes[0] = 0xFE;
        let table = ActionTable::load(&mut MemStorage::new(&bytes));
        assert_eq!(table.keys[0].slots()[0], KeySlot::Key(0xFE));
        assert_eq!(table.keys[0].slots()[1], KeySlot::Key(0x00));
    }
}
