//! Table-lookup temperature sensor
//!
//! Sums a fixed number of ADC conversions and converts the sum through a
//! calibration table. Readings beyond the table saturate to its end
//! temperatures; only ADC failures (and, when enabled, readings pinned to
//! a supply rail) are reported as errors.

use thermotab_core::config::{ConfigError, SensorConfig};
use thermotab_core::traits::{SensorError, TemperatureSensor};
use thermotab_core::{Accumulator, Oversampling, TempTable};
use thermotab_hal::AdcReader;

use super::table_for;

/// Temperature sensor backed by a calibration table
pub struct TableSensor<'a, ADC> {
    adc: ADC,
    table: TempTable<'a>,
    oversampling: Oversampling,
    /// Counts from either rail treated as open/short (per conversion)
    fault_margin: Option<u16>,
}

impl<'a, ADC: AdcReader> TableSensor<'a, ADC> {
    /// Create a new table sensor
    ///
    /// # Arguments
    /// - `adc`: ADC channel the sensor is wired to
    /// - `table`: calibration table for the sensor
    /// - `samples`: conversions summed per reading
    pub fn new(adc: ADC, table: TempTable<'a>, samples: u8) -> Self {
        let oversampling = Oversampling::for_adc(samples, adc.resolution().bits());
        Self {
            adc,
            table,
            oversampling,
            fault_margin: None,
        }
    }

    /// Create a sensor from stored configuration
    pub fn from_config(adc: ADC, config: &'a SensorConfig) -> Result<Self, ConfigError> {
        let table = table_for(config)?;
        Ok(Self::new(adc, table, config.oversample))
    }

    /// Report readings within `margin` counts of 0 or full scale as faults
    ///
    /// Full scale means the input floated up to the pull-up (open circuit),
    /// zero means it is tied to ground (short circuit).
    pub fn with_fault_margin(mut self, margin: u16) -> Self {
        self.fault_margin = Some(margin);
        self
    }

    /// Calibration table in use
    pub fn table(&self) -> &TempTable<'a> {
        &self.table
    }

    /// Scale between table literals and accumulated readings
    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    /// Release the ADC
    pub fn release(self) -> ADC {
        self.adc
    }

    /// Take one oversampled reading
    ///
    /// Returns the sum of `samples` conversions. A failed conversion
    /// discards the partial sum.
    pub fn read_raw(&mut self) -> Result<u32, SensorError> {
        let mut accumulator = Accumulator::new(self.oversampling);
        loop {
            let raw = self
                .adc
                .read()
                .map_err(|_| SensorError::ConversionError)?;
            if let Some(sum) = accumulator.push(raw) {
                return Ok(sum);
            }
        }
    }

    /// Convert an oversampled reading to 0.1°C units
    pub fn convert(&self, raw_sum: u32) -> Result<i16, SensorError> {
        if let Some(margin) = self.fault_margin {
            let average = raw_sum / self.oversampling.samples() as u32;
            let full_scale = self.adc.resolution().max_value() as u32;

            if average + margin as u32 >= full_scale {
                return Err(SensorError::OpenCircuit);
            }
            if average <= margin as u32 {
                return Err(SensorError::ShortCircuit);
            }
        }

        let raw = i32::try_from(raw_sum).unwrap_or(i32::MAX);
        Ok(self.table.lookup_celsius_x10(raw, self.oversampling))
    }
}

impl<ADC: AdcReader> TemperatureSensor for TableSensor<'_, ADC> {
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
        // Read ADC value
        let raw_sum = self.read_raw()?;

        // Convert to temperature
        self.convert(raw_sum)
    }
}
