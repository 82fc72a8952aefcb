//! Thermotab - calibration-table temperature sensing firmware
//!
//! Main firmware binary for RP2040-based boards. Samples one temperature
//! input through its calibration table and publishes the result to the
//! rest of the firmware.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::Pull;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use thermotab_core::config::SensorConfig;
use thermotab_drivers::sensor::TableSensor;
use thermotab_hal_rp2040::adc::{AdcChannel, BlockingAdcReader};

mod channels;
mod tasks;

/// Per-conversion counts from either rail reported as open/short
const FAULT_MARGIN: u16 = 10;

// Sensor config must live forever: the sensor task borrows its table
static SENSOR_CONFIG: StaticCell<SensorConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermotab firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config: &'static SensorConfig = SENSOR_CONFIG.init(SensorConfig::default());
    info!(
        "Sensor {:?} on GPIO{} ({}x oversampling)",
        config.sensor_type, config.adc_pin, config.oversample
    );

    // Setup ADC for temperature sensing
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let Some(adc_channel) = AdcChannel::from_gpio(config.adc_pin) else {
        error!("GPIO{} is not an ADC input", config.adc_pin);
        return;
    };
    let channel = match adc_channel {
        AdcChannel::Adc0 => Channel::new_pin(p.PIN_26, Pull::None),
        AdcChannel::Adc1 => Channel::new_pin(p.PIN_27, Pull::None),
        AdcChannel::Adc2 => Channel::new_pin(p.PIN_28, Pull::None),
        AdcChannel::Adc3 => Channel::new_pin(p.PIN_29, Pull::None),
    };
    debug!("Using {:?} (GPIO{})", adc_channel, adc_channel.gpio());
    let reader = BlockingAdcReader::new(adc, channel);

    let sensor = match TableSensor::from_config(reader, config) {
        Ok(sensor) => sensor.with_fault_margin(FAULT_MARGIN),
        Err(e) => {
            error!("Invalid sensor config: {:?}", e);
            return;
        }
    };

    let (min_c, max_c) = sensor.table().temperature_range();
    info!(
        "ADC initialized, table covers {}..{} ({:?})",
        min_c,
        max_c,
        sensor.table().unit()
    );

    spawner.spawn(tasks::sensor_task(sensor)).unwrap();
    spawner.spawn(tasks::report_task()).unwrap();
}
