//! Boot-keyboard report bookkeeping.
//!
//! The action table stores keys in the Arduino keyboard encoding: printable
//! ASCII directly, modifier keys at 0x80-0x87, named non-printing keys from
//! 0x88 up (RETURN = 0xB0, F1 = 0xC2, UP_ARROW = 0xDA, ...). [`BootReport`]
//! translates that encoding to HID usages and keeps the 6-slot report and
//! modifier byte in sync with the pressed set; the transport that actually
//! sends the 8-byte report lives board-side.

use heapless::Vec;

/// First modifier code in the stored encoding (LEFT_CTRL).
const MODIFIER_BASE: u8 = 0x80;
/// First named-key code; stored code minus this is the HID usage.
const NAMED_KEY_BASE: u8 = 0x88;
/// Left-shift bit in the HID modifier byte.
const LEFT_SHIFT: u8 = 0x02;
/// Flag in [`ASCII_MAP`] entries marking a shifted usage.
const SHIFT: u8 = 0x80;

/// ASCII to HID usage, high bit meaning "with shift held".
/// Zero entries have no keyboard equivalent and press nothing.
#[rustfmt::skip]
const ASCII_MAP: [u8; 128] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x2a, 0x2b, 0x28, 0x00, 0x00, 0x00, 0x00, 0x00, // BS, TAB, LF
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x2c,         // ' '
    0x1e | SHIFT, // !
    0x34 | SHIFT, // "
    0x20 | SHIFT, // #
    0x21 | SHIFT, // $
    0x22 | SHIFT, // %
    0x24 | SHIFT, // &
    0x34,         // '
    0x26 | SHIFT, // (
    0x27 | SHIFT, // )
    0x25 | SHIFT, // *
    0x2e | SHIFT, // +
    0x36,         // ,
    0x2d,         // -
    0x37,         // .
    0x38,         // /
    0x27,         // 0
    0x1e,         // 1
    0x1f,         // 2
    0x20,         // 3
    0x21,         // 4
    0x22,         // 5
    0x23,         // 6
    0x24,         // 7
    0x25,         // 8
    0x26,         // 9
    0x33 | SHIFT, // :
    0x33,         // ;
    0x36 | SHIFT, // <
    0x2e,         // =
    0x37 | SHIFT, // >
    0x38 | SHIFT, // ?
    0x1f | SHIFT, // @
    0x04 | SHIFT, // A
    0x05 | SHIFT, // B
    0x06 | SHIFT, // C
    0x07 | SHIFT, // D
    0x08 | SHIFT, // E
    0x09 | SHIFT, // F
    0x0a | SHIFT, // G
    0x0b | SHIFT, // H
    0x0c | SHIFT, // I
    0x0d | SHIFT, // J
    0x0e | SHIFT, // K
    0x0f | SHIFT, // L
    0x10 | SHIFT, // M
    0x11 | SHIFT, // N
    0x12 | SHIFT, // O
    0x13 | SHIFT, // P
    0x14 | SHIFT, // Q
    0x15 | SHIFT, // R
    0x16 | SHIFT, // S
    0x17 | SHIFT, // T
    0x18 | SHIFT, // U
    0x19 | SHIFT, // V
    0x1a | SHIFT, // W
    0x1b | SHIFT, // X
    0x1c | SHIFT, // Y
    0x1d | SHIFT, // Z
    0x2f,         // [
    0x31,         // backslash
    0x30,         // ]
    0x23 | SHIFT, // ^
    0x2d | SHIFT, // _
    0x35,         // `
    0x04,         // a
    0x05,         // b
    0x06,         // c
    0x07,         // d
    0x08,         // e
    0x09,         // f
    0x0a,         // g
    0x0b,         // h
    0x0c,         // i
    0x0d,         // j
    0x0e,         // k
    0x0f,         // l
    0x10,         // m
    0x11,         // n
    0x12,         // o
    0x13,         // p
    0x14,         // q
    0x15,         // r
    0x16,         // s
    0x17,         // t
    0x18,         // u
    0x19,         // v
    0x1a,         // w
    0x1b,         // x
    0x1c,         // y
    0x1d,         // z
    0x2f | SHIFT, // {
    0x31 | SHIFT, // |
    0x30 | SHIFT, // }
    0x35 | SHIFT, // ~
    0x00,         // DEL
];

enum Decoded {
    Modifier(u8),
    Usage { usage: u8, shifted: bool },
    None,
}

fn decode(code: u8) -> Decoded {
    match code {
        MODIFIER_BASE..=0x87 => Decoded::Modifier(1 << (code - MODIFIER_BASE)),
        NAMED_KEY_BASE..=0xFF => Decoded::Usage {
            usage: code - NAMED_KEY_BASE,
            shifted: false,
        },
        _ => {
            let entry = ASCII_MAP[code as usize];
            if entry == 0 {
                Decoded::None
            } else {
                Decoded::Usage {
                    usage: entry & !SHIFT,
                    shifted: entry & SHIFT != 0,
                }
            }
        }
    }
}

/// The currently-pressed set, as an 8-byte boot keyboard report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BootReport {
    keys: Vec<u8, 6>,
    modifiers: u8,
}

impl BootReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press in the stored encoding.
    ///
    /// Returns true when the report changed and should be sent. A seventh
    /// simultaneous usage does not fit the report and leaves the whole
    /// state untouched, shift included.
    pub fn press(&mut self, code: u8) -> bool {
        match decode(code) {
            Decoded::Modifier(bit) => self.modifiers |= bit,
            Decoded::Usage { usage, shifted } => {
                if !self.keys.contains(&usage) && self.keys.push(usage).is_err() {
                    return false;
                }
                if shifted {
                    self.modifiers |= LEFT_SHIFT;
                }
            }
            Decoded::None => return false,
        }
        true
    }

    /// Register a release in the stored encoding. Returns true when the
    /// report changed and should be sent.
    pub fn release(&mut self, code: u8) -> bool {
        match decode(code) {
            Decoded::Modifier(bit) => self.modifiers &= !bit,
            Decoded::Usage { usage, shifted } => {
                if shifted {
                    self.modifiers &= !LEFT_SHIFT;
                }
                self.keys.retain(|k| *k != usage);
            }
            Decoded::None => return false,
        }
        true
    }

    /// The report wire format: modifier byte, reserved byte, six usage slots.
    pub fn bytes(&self) -> [u8; 8] {
        let mut report = [0u8; 8];
        report[0] = self.modifiers;
        for (slot, code) in report[2..].iter_mut().zip(self.keys.iter()) {
            *slot = *code;
        }
        report
    }
}
