//! Temperature sensors
//!
//! Each sensor type is a calibration table in the 10-bit ADC domain.
//! [`TableSensor`] samples an ADC and converts through one of them.

pub mod ntc100k;
pub mod pt100_amp;
pub mod table_sensor;

pub use ntc100k::NTC_100K_4K7;
pub use pt100_amp::{Pt100AmpCircuit, PT100_E3D_AMP_3V3};
pub use table_sensor::TableSensor;

use thermotab_core::config::{ConfigError, SensorConfig, SensorType};
use thermotab_core::TempTable;

/// Calibration table selected by a sensor config
///
/// Built-in types return their static table; `Custom` borrows the points
/// stored in the config.
pub fn table_for(config: &SensorConfig) -> Result<TempTable<'_>, ConfigError> {
    match config.sensor_type {
        SensorType::Pt100E3dAmp => Ok(PT100_E3D_AMP_3V3),
        SensorType::Ntc100k => Ok(NTC_100K_4K7),
        SensorType::Custom => Ok(config.custom_table()?),
    }
}
