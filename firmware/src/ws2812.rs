//! Bit-banged WS2812 byte transmitter.
//!
//! One GPIO, cycle-counted pulse timing. The core wraps every nine-byte
//! burst in a critical section, because a single preemption mid-train is
//! enough for the strip to latch garbage; this driver only guarantees the
//! intra-byte timing.

use cortex_m::asm;
use embassy_rp::gpio::Output;
use macropad_core::PixelLink;

// Pulse widths in CPU cycles at the 125 MHz system clock.
// WS2812 datasheet: T1H 0.8us, T1L 0.45us, T0H 0.4us, T0L 0.85us.
const T1H_CYCLES: u32 = 100;
const T1L_CYCLES: u32 = 56;
const T0H_CYCLES: u32 = 50;
const T0L_CYCLES: u32 = 106;

// Reset/latch time: >50us low.
const LATCH_CYCLES: u32 = 7500;

pub struct Ws2812 {
    pin: Output<'static>,
}

impl Ws2812 {
    /// The pin must start low (the strip's idle level).
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }

    /// Hold the wire low long enough for the strip to latch what it has.
    pub fn latch(&mut self) {
        self.pin.set_low();
        asm::delay(LATCH_CYCLES);
    }
}

impl PixelLink for Ws2812 {
    fn transmit(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.pin.set_high();
                asm::delay(T1H_CYCLES);
                self.pin.set_low();
                asm::delay(T1L_CYCLES);
            } else {
                self.pin.set_high();
                asm::delay(T0H_CYCLES);
                self.pin.set_low();
                asm::delay(T0L_CYCLES);
            }
        }
    }
}
