#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Timer};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use macropad_rp2040::{
    bootloader_requested, configure_usb_hid, flood, ActionTable, BoardPins, FlashStorage, MacroPad,
    TimerDelay, UsbKeyboard, WatchdogFeeder, Ws2812, BOOT_FLOOD_LEVEL,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Watchdog timeout. A knob stuck mid-detent stalls the loop; this is the
/// only way back from that.
const WATCHDOG_TIMEOUT: Duration = Duration::from_millis(8000);

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("MacroPad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Pixels and inputs come up first: the bootloader check happens before
    // anything else, exactly once.
    let mut link = Ws2812::new(Output::new(p.PIN_0, Level::Low));
    let mut pins = BoardPins::new(
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
    );

    // Key 1 held at power-on: flood the indicators and hand the device to
    // the ROM bootloader. The polling loop never runs.
    if bootloader_requested(&mut pins) {
        info!("key 1 held at power-on, entering bootloader");
        link.latch();
        flood(&mut link, BOOT_FLOOD_LEVEL);
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
        loop {
            cortex_m::asm::wfe();
        }
    }

    // Let the inputs settle before the first poll.
    Timer::after_millis(5).await;

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("MacroPad");
    usb_config.product = Some("MacroPad 3+1");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build and run the USB device
    let usb_device = builder.build();
    spawner.spawn(usb_task(usb_device)).unwrap();

    let keyboard = UsbKeyboard::new(hid_writer);

    // Load the action table once; it never changes at runtime.
    let mut storage = FlashStorage::new(Flash::new_blocking(p.FLASH));
    let table = ActionTable::load(&mut storage);
    info!("action table loaded");

    // Watchdog goes live last, right before the loop starts feeding it.
    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(WATCHDOG_TIMEOUT);

    let mut pad = MacroPad::new(
        table,
        pins,
        keyboard,
        link,
        TimerDelay,
        WatchdogFeeder::new(watchdog),
    );
    info!("MacroPad running");
    pad.run().await
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}
