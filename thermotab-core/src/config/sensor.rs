//! Sensor configuration
//!
//! Selects the calibration table and sampling for one temperature input.
//! The struct is persisted as postcard binary data with a magic number,
//! version and CRC so a corrupted or foreign blob is rejected on load.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::oversample::{Oversampling, DEFAULT_OVERSAMPLE};
use crate::table::{CalibrationPoint, RawDirection, TableError, TempTable, TempUnit};

/// Magic number to identify valid sensor config data
pub const SENSOR_CONFIG_MAGIC: u32 = 0x5454_4243; // "TTBC"

/// Current sensor config version
pub const SENSOR_CONFIG_VERSION: u8 = 1;

/// Maximum points in a custom table
pub const MAX_CUSTOM_POINTS: usize = 32;

/// Upper bound on the encoded size of a [`SensorConfig`]
pub const MAX_ENCODED_LEN: usize = 224;

/// Default ADC pin (GPIO26 / ADC0 on RP2040)
pub const DEFAULT_ADC_PIN: u8 = 26;

/// Temperature sensor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorType {
    /// PT100 through the E3D amplifier at 3.3V with a 4.7K pull-up
    #[default]
    Pt100E3dAmp,
    /// NTC 100K thermistor (B=3950) below a 4.7K pull-up
    Ntc100k,
    /// User-supplied calibration points stored in the config
    Custom,
}

/// Errors loading or storing sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Magic or version mismatch
    InvalidFormat,
    /// CRC mismatch
    CrcMismatch,
    /// Custom points do not form a valid table
    Table(TableError),
    /// Too many custom points
    CapacityExceeded,
}

impl From<TableError> for ConfigError {
    fn from(e: TableError) -> Self {
        ConfigError::Table(e)
    }
}

/// Configuration for one temperature input
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Which calibration table to use
    pub sensor_type: SensorType,
    /// GPIO pin the sensor is wired to
    pub adc_pin: u8,
    /// Conversions summed per reading
    pub oversample: u8,
    /// Raw direction of the custom table
    pub custom_direction: RawDirection,
    /// Temperature unit of the custom table
    pub custom_unit: TempUnit,
    /// Custom table points (10-bit ADC domain, coldest first)
    pub custom_points: Vec<CalibrationPoint, MAX_CUSTOM_POINTS>,
    /// CRC32 checksum (calculated over magic..custom_points)
    pub crc: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::new(SensorType::default(), DEFAULT_ADC_PIN)
    }
}

impl SensorConfig {
    /// Create a config for a built-in sensor type
    pub const fn new(sensor_type: SensorType, adc_pin: u8) -> Self {
        Self {
            magic: SENSOR_CONFIG_MAGIC,
            version: SENSOR_CONFIG_VERSION,
            sensor_type,
            adc_pin,
            oversample: DEFAULT_OVERSAMPLE,
            custom_direction: RawDirection::Falling,
            custom_unit: TempUnit::DeciCelsius,
            custom_points: Vec::new(),
            crc: 0,
        }
    }

    /// Create a config with a custom table
    ///
    /// The points are validated before they are stored.
    pub fn custom(
        adc_pin: u8,
        points: &[CalibrationPoint],
        direction: RawDirection,
        unit: TempUnit,
    ) -> Result<Self, ConfigError> {
        TempTable::try_new(points, direction, unit)?;

        let mut config = Self::new(SensorType::Custom, adc_pin);
        config.custom_direction = direction;
        config.custom_unit = unit;
        config.custom_points =
            Vec::from_slice(points).map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(config)
    }

    /// Check if the data is valid (magic and version match)
    pub fn is_valid(&self) -> bool {
        self.magic == SENSOR_CONFIG_MAGIC && self.version == SENSOR_CONFIG_VERSION
    }

    /// Table built from the stored custom points
    pub fn custom_table(&self) -> Result<TempTable<'_>, TableError> {
        TempTable::try_new(&self.custom_points, self.custom_direction, self.custom_unit)
    }

    /// Oversampling scale for an ADC of the given resolution
    pub const fn oversampling(&self, adc_bits: u8) -> Oversampling {
        Oversampling::for_adc(self.oversample, adc_bits)
    }

    /// Calculate CRC32 for the data (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFFFFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &[self.sensor_type as u8]);
        crc = crc32_update(crc, &[self.adc_pin, self.oversample]);
        crc = crc32_update(crc, &[self.custom_direction as u8, self.custom_unit as u8]);

        for point in &self.custom_points {
            crc = crc32_update(crc, &point.adc_raw.to_le_bytes());
            crc = crc32_update(crc, &point.temperature.to_le_bytes());
        }

        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Serialize into `buf`, updating the CRC first
    ///
    /// Returns the used part of `buf`.
    #[cfg(feature = "serde")]
    pub fn encode<'b>(&mut self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        self.update_crc();
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate a stored config
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: SensorConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if !config.is_valid() {
            return Err(ConfigError::InvalidFormat);
        }
        if !config.verify_crc() {
            return Err(ConfigError::CrcMismatch);
        }
        if config.sensor_type == SensorType::Custom {
            config.custom_table()?;
        }

        Ok(config)
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_points() -> [CalibrationPoint; 3] {
        [
            CalibrationPoint::new(900, 0),
            CalibrationPoint::new(600, 500),
            CalibrationPoint::new(300, 1500),
        ]
    }

    #[test]
    fn test_default_config() {
        let config = SensorConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.sensor_type, SensorType::Pt100E3dAmp);
        assert_eq!(config.adc_pin, DEFAULT_ADC_PIN);
        assert_eq!(config.oversample, DEFAULT_OVERSAMPLE);
        assert!(config.custom_points.is_empty());
    }

    #[test]
    fn test_crc32_check_value() {
        // Standard CRC-32 check value for "123456789"
        assert_eq!(!crc32_update(0xFFFFFFFF, b"123456789"), 0xCBF43926);
    }

    #[test]
    fn test_crc_consistency() {
        let mut config = SensorConfig::new(SensorType::Ntc100k, 27);
        config.update_crc();
        assert!(config.verify_crc());

        // Modify data without updating CRC
        config.oversample = 4;
        assert!(!config.verify_crc());
    }

    #[test]
    fn test_custom_table() {
        let config = SensorConfig::custom(
            26,
            &custom_points(),
            RawDirection::Falling,
            TempUnit::DeciCelsius,
        )
        .unwrap();
        assert_eq!(config.sensor_type, SensorType::Custom);

        let table = config.custom_table().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup(750), 250);
    }

    #[test]
    fn test_custom_rejects_invalid_points() {
        let result = SensorConfig::custom(
            26,
            &custom_points(),
            RawDirection::Rising,
            TempUnit::DeciCelsius,
        );
        assert_eq!(
            result,
            Err(ConfigError::Table(TableError::RawNotMonotonic { index: 1 }))
        );
    }

    #[test]
    fn test_custom_rejects_too_many_points() {
        let points: [CalibrationPoint; MAX_CUSTOM_POINTS + 1] =
            core::array::from_fn(|i| CalibrationPoint::new(i as i16 * 10, i as i16));
        let result = SensorConfig::custom(26, &points, RawDirection::Rising, TempUnit::Celsius);
        assert_eq!(result, Err(ConfigError::CapacityExceeded));
    }

    #[test]
    fn test_oversampling() {
        let config = SensorConfig::default();
        assert_eq!(config.oversampling(12).ov(1), 64);
        assert_eq!(config.oversampling(10).ov(1), 16);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_decode() {
        let mut config = SensorConfig::custom(
            28,
            &custom_points(),
            RawDirection::Falling,
            TempUnit::DeciCelsius,
        )
        .unwrap();

        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = config.encode(&mut buf).unwrap().len();
        assert!(config.verify_crc());

        let decoded = SensorConfig::decode(&buf[..len]).unwrap();
        assert_eq!(decoded, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_full_config_fits() {
        let points: [CalibrationPoint; MAX_CUSTOM_POINTS] = core::array::from_fn(|i| {
            CalibrationPoint::new(i16::MAX - i as i16, i16::MIN + i as i16)
        });
        let mut config =
            SensorConfig::custom(26, &points, RawDirection::Falling, TempUnit::Celsius).unwrap();
        config.magic = u32::MAX;

        let mut buf = [0u8; MAX_ENCODED_LEN];
        assert!(config.encode(&mut buf).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decode_rejects_crc_mismatch() {
        let mut config = SensorConfig::default();
        config.update_crc();
        config.adc_pin = 27;

        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = postcard::to_slice(&config, &mut buf).unwrap().len();
        assert_eq!(
            SensorConfig::decode(&buf[..len]),
            Err(ConfigError::CrcMismatch)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut config = SensorConfig::default();
        config.magic = 0xDEADBEEF;
        config.update_crc();

        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = postcard::to_slice(&config, &mut buf).unwrap().len();
        assert_eq!(
            SensorConfig::decode(&buf[..len]),
            Err(ConfigError::InvalidFormat)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(SensorConfig::decode(&[]), Err(ConfigError::Deserialize));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_small_buffer() {
        let mut config = SensorConfig::default();
        let mut buf = [0u8; 2];
        assert_eq!(config.encode(&mut buf), Err(ConfigError::Serialize));
    }
}
