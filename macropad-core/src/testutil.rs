//! Shared mocks for the board seams, plus a minimal blocking executor.
//!
//! Only compiled for host tests.

extern crate std;

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::vec::Vec;

use crate::hal::{ActionStorage, Delay, HidKeyboard, Line, PixelLink, Pins, Watchdog};

/// Run a future to completion (simple blocking executor).
///
/// The mocks never actually suspend, so a pending poll is a test bug.
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {
                panic!("Mock future returned Pending unexpectedly");
            }
        }
    }
}

/// Scriptable digital lines. All lines idle high (active-low hardware).
pub struct MockPins {
    levels: [bool; 6],
    // remaining reads of EncoderA that report low before it pops back high
    a_low_reads: Option<u32>,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            levels: [true; 6],
            a_low_reads: None,
        }
    }

    /// Set the electrical level of a line (`false` = pressed/turned).
    pub fn set_level(&mut self, line: Line, level: bool) {
        self.levels[line as usize] = level;
    }

    /// Let phase A read low for `reads` more samples, then rest high, as a
    /// real knob does when it settles into the next detent.
    pub fn release_a_after(&mut self, reads: u32) {
        self.a_low_reads = Some(reads);
    }
}

impl Pins for MockPins {
    fn read(&mut self, line: Line) -> bool {
        if line == Line::EncoderA {
            if let Some(remaining) = self.a_low_reads.as_mut() {
                if *remaining > 0 {
                    *remaining -= 1;
                    return false;
                }
                self.a_low_reads = None;
                self.levels[Line::EncoderA as usize] = true;
            }
        }
        self.levels[line as usize]
    }
}

/// One keyboard call, as recorded by [`RecordingKeyboard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Press(u8),
    Release(u8),
}

/// Records every press/release in order.
pub struct RecordingKeyboard {
    events: Vec<KeyEvent>,
}

impl RecordingKeyboard {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> Vec<KeyEvent> {
        self.events.clone()
    }
}

impl HidKeyboard for RecordingKeyboard {
    async fn press(&mut self, code: u8) {
        self.events.push(KeyEvent::Press(code));
    }

    async fn release(&mut self, code: u8) {
        self.events.push(KeyEvent::Release(code));
    }
}

/// Records every byte shifted out on the pixel wire.
pub struct RecordingLink {
    bytes: Vec<u8>,
}

impl RecordingLink {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl PixelLink for RecordingLink {
    fn transmit(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

/// Completes immediately but records every requested sleep.
pub struct InstantDelay {
    slept: Vec<u32>,
}

impl InstantDelay {
    pub fn new() -> Self {
        Self { slept: Vec::new() }
    }

    pub fn slept_ms(&self) -> Vec<u32> {
        self.slept.clone()
    }

    pub fn total_slept_ms(&self) -> u32 {
        self.slept.iter().sum()
    }
}

impl Delay for InstantDelay {
    async fn delay_ms(&mut self, ms: u32) {
        self.slept.push(ms);
    }
}

/// Counts feeds.
pub struct CountingWatchdog {
    feeds: u32,
}

impl CountingWatchdog {
    pub fn new() -> Self {
        Self { feeds: 0 }
    }

    pub fn feeds(&self) -> u32 {
        self.feeds
    }
}

impl Watchdog for CountingWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}

/// In-memory byte storage; reads past the span yield 0xFF like erased flash.
pub struct MemStorage {
    bytes: Vec<u8>,
    reads: u32,
    highest_offset: u32,
}

impl MemStorage {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            reads: 0,
            highest_offset: 0,
        }
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }

    pub fn highest_offset(&self) -> u32 {
        self.highest_offset
    }
}

impl ActionStorage for MemStorage {
    fn read_byte(&mut self, offset: u32) -> u8 {
        self.reads += 1;
        self.highest_offset = self.highest_offset.max(offset);
        self.bytes.get(offset as usize).copied().unwrap_or(0xFF)
    }
}
