//! USB HID keyboard output: an embassy-usb HID writer driven by the shared
//! [`BootReport`] bookkeeping.

use defmt::warn;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use macropad_core::report::BootReport;
use macropad_core::HidKeyboard;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

/// USB HID keyboard over an embassy-usb HID writer.
///
/// Sends a fresh 8-byte report after every change to the pressed set. Write
/// failures are logged and swallowed; the dispatch seam is fire-and-forget.
pub struct UsbKeyboard<'d> {
    writer: HidWriter<'d, embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>, 8>,
    report: BootReport,
}

impl<'d> UsbKeyboard<'d> {
    pub fn new(
        writer: HidWriter<'d, embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>, 8>,
    ) -> Self {
        Self {
            writer,
            report: BootReport::new(),
        }
    }

    async fn write_report(&mut self) {
        if let Err(e) = self.writer.write(&self.report.bytes()).await {
            warn!("HID report dropped: {:?}", e);
        }
    }
}

impl HidKeyboard for UsbKeyboard<'_> {
    async fn press(&mut self, code: u8) {
        if self.report.press(code) {
            self.write_report().await;
        }
    }

    async fn release(&mut self, code: u8) {
        if self.report.release(code) {
            self.write_report().await;
        }
    }
}

/// HID request handler (handles SET_REPORT for the LED output report, etc.).
///
/// Currently a no-op handler since the board has no lock-state LEDs to drive
/// from the host.
pub struct KeyboardRequestHandler;

impl RequestHandler for KeyboardRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID keyboard class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>>,
    state: &'d mut State<'d>,
) -> HidWriter<'d, embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>, 8> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 8,
        hid_subclass: embassy_usb::class::hid::HidSubclass::Boot,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::Keyboard,
    };

    embassy_usb::class::hid::HidWriter::new(builder, state, config)
}
