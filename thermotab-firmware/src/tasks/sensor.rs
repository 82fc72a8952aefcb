//! Temperature sampling task

use defmt::*;
use embassy_time::{Duration, Ticker};

use thermotab_core::traits::{CelsiusX10, TemperatureSensor};
use thermotab_drivers::sensor::TableSensor;
use thermotab_hal_rp2040::adc::BlockingAdcReader;

use crate::channels::TEMP_READING;

/// Sampling period
const SAMPLE_PERIOD_MS: u64 = 500;

/// Sensor task
///
/// Takes one oversampled reading per period and publishes it on
/// [`TEMP_READING`].
#[embassy_executor::task]
pub async fn sensor_task(mut sensor: TableSensor<'static, BlockingAdcReader<'static>>) {
    info!(
        "Sensor task started ({}x oversampling)",
        sensor.oversampling().samples()
    );

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));

    loop {
        match sensor.read_celsius_x10() {
            Ok(temp_x10) => {
                trace!("Temperature: {}", CelsiusX10(temp_x10));
                TEMP_READING.signal(Some(temp_x10));
            }
            Err(e) => {
                warn!("Sensor fault: {:?}", e);
                TEMP_READING.signal(None);
            }
        }

        ticker.next().await;
    }
}
