//! Temperature reporting task
//!
//! Logs readings from [`TEMP_READING`] when they move by at least
//! [`REPORT_DELTA_X10`] or the sensor goes in or out of fault.

use defmt::*;
use thermotab_core::traits::CelsiusX10;

use crate::channels::TEMP_READING;

/// Minimum change worth logging (0.1°C units)
const REPORT_DELTA_X10: i16 = 10;

/// Report task
#[embassy_executor::task]
pub async fn report_task() {
    let mut last: Option<i16> = None;
    let mut faulted = false;

    loop {
        match TEMP_READING.wait().await {
            Some(temp_x10) => {
                if faulted {
                    info!("Sensor recovered");
                    faulted = false;
                }
                let moved = last.map_or(true, |prev| (temp_x10 - prev).abs() >= REPORT_DELTA_X10);
                if moved {
                    info!("Temperature {}", CelsiusX10(temp_x10));
                    last = Some(temp_x10);
                }
            }
            None => {
                if !faulted {
                    warn!("Temperature unavailable");
                    faulted = true;
                    last = None;
                }
            }
        }
    }
}
