#![no_std]
#![no_main]

mod bus;

use core::fmt::{Debug, Write};

use cortex_m_rt::entry;
use defmt_rtt as _;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use lis3dh::{Acceleration, DeviceAddress, Error, Lis3dh, PowerMode, Verified};
use panic_halt as _;
use stm32f1xx_hal::{i2c::{BlockingI2c, DutyCycle, Mode}, pac::{self, DWT}, prelude::*, serial::{Config, Serial}, timer::Timer};

use accel_link::{FrameBuf, Heartbeat};
use bus::Bus;

const BT_BAUD: u32 = 9600;
const DEBUG_BAUD: u32 = 115_200;
const SAMPLE_RATE_HZ: u32 = 10;

const ADDRESSES: [DeviceAddress; 2] = [DeviceAddress::Primary, DeviceAddress::Secondary];

#[entry]
fn main() -> ! {
    // core peripherals
    let mut cp = pac::CorePeripherals::take().unwrap();
    // device peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut afio = dp.AFIO.constrain();

    let mut flash = dp.FLASH.constrain();
    let rcc = dp.RCC.constrain();

    let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(72.MHz()).pclk1(36.MHz()).freeze(&mut flash.acr);

    let mut led = {
        let mut gpioc = dp.GPIOC.split();
        gpioc.pc13.into_push_pull_output(&mut gpioc.crh)
    };

    let mut gpioa = dp.GPIOA.split();

    // bluetooth module
    let (mut bt, _) = {
        let tx = gpioa.pa9.into_alternate_push_pull(&mut gpioa.crh);
        let rx = gpioa.pa10;
        let serial = Serial::new(dp.USART1, (tx, rx), &mut afio.mapr, Config::default().baudrate(BT_BAUD.bps()), &clocks);
        serial.split()
    };

    // debug console
    let (mut debug, _) = {
        let tx = gpioa.pa2.into_alternate_push_pull(&mut gpioa.crl);
        let rx = gpioa.pa3;
        let serial = Serial::new(dp.USART2, (tx, rx), &mut afio.mapr, Config::default().baudrate(DEBUG_BAUD.bps()), &clocks);
        serial.split()
    };

    bt.write_str("UART BT: Communication started.\r\n").ok();
    defmt::info!("serial links up");

    DWT::enable_cycle_counter(&mut cp.DWT);
    let i2c = {
        let mut gpiob = dp.GPIOB.split();
        let scl = gpiob.pb6.into_alternate_open_drain(&mut gpiob.crl);
        let sda = gpiob.pb7.into_alternate_open_drain(&mut gpiob.crl);

        let mode = Mode::Fast {
            frequency: 400_000.Hz(),
            duty_cycle: DutyCycle::Ratio16to9,
        };

        BlockingI2c::i2c1(dp.I2C1, (scl, sda), &mut afio.mapr, mode, clocks, 1000, 10, 1000, 1000)
    };

    // both accelerometers share I2C1; the driver owns it
    let mut accel = Lis3dh::new(Bus::new(i2c));
    let mut devices: [Option<Verified>; 2] = [None, None];

    let mut frame = FrameBuf::new();
    let mut heartbeat = Heartbeat::default();

    let mut timer = Timer::syst(cp.SYST, &clocks).counter_hz();
    timer.start(SAMPLE_RATE_HZ.Hz()).unwrap();

    loop {
        nb::block!(timer.wait()).ok();

        for (slot, address) in devices.iter_mut().zip(ADDRESSES) {
            if slot.is_none() {
                *slot = bring_up(&mut accel, address, &mut debug);
            }
        }

        let [first, second] = &mut devices;
        let first = sample(&mut accel, first, &mut debug);
        let second = sample(&mut accel, second, &mut debug);

        if let (Some(first), Some(second)) = (first, second) {
            if accel_link::encode(&mut frame, &first, &second).is_ok() {
                bt.write_str(&frame).ok();
            }
        }

        heartbeat.beat(&mut debug).ok();
        led.toggle();
    }
}

/// Identifies the device at `address` and puts it into normal mode with BDU
/// and the temperature sensor on. Failures are reported and left for the next
/// period to retry.
fn bring_up<I, E>(accel: &mut Lis3dh<I>, address: DeviceAddress, debug: &mut impl Write) -> Option<Verified>
where
    I: I2c<SevenBitAddress, Error = E>,
    E: Debug,
{
    let configure = |accel: &mut Lis3dh<I>| -> Result<Verified, Error<E>> {
        let device = accel.identify(address)?;
        accel.set_power_mode(&device, PowerMode::Normal)?;
        accel.enable_block_data_update(&device)?;
        accel.enable_temperature_sensor(&device)?;
        Ok(device)
    };

    match configure(accel) {
        Ok(device) => {
            defmt::info!("accelerometer {} ready", address);
            write!(debug, "{:?} ready\r\n", address).ok();
            Some(device)
        }
        Err(e) => {
            defmt::warn!("accelerometer {} bring-up failed: {}", address, defmt::Debug2Format(&e));
            write!(debug, "{:?} bring-up failed: {}\r\n", address, e).ok();
            None
        }
    }
}

/// Reads one device. A failed read clears `slot` so the device is identified
/// again before it is trusted.
fn sample<I, E>(accel: &mut Lis3dh<I>, slot: &mut Option<Verified>, debug: &mut impl Write) -> Option<Acceleration>
where
    I: I2c<SevenBitAddress, Error = E>,
    E: Debug,
{
    let device = slot.as_ref()?;
    let address = device.address();

    match accel.read_acceleration(device) {
        Ok(acceleration) => Some(acceleration),
        Err(e) => {
            defmt::warn!("accelerometer {} read failed: {}", address, defmt::Debug2Format(&e));
            write!(debug, "{:?} read failed: {}\r\n", address, e).ok();
            *slot = None;
            None
        }
    }
}
