//! Temperature sensor traits

use core::fmt;

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    OpenCircuit,
    /// Sensor shorted to ground
    ShortCircuit,
    /// ADC conversion error
    ConversionError,
}

/// Trait for temperature sensors
///
/// Implementations handle the specific sensor type (NTC thermistor,
/// PT100 behind an amplifier, etc.)
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, 45.5°C is returned as 455.
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError>;

    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.read_celsius_x10().map(|t| t / 10)
    }

    /// Check if the sensor reading is valid
    fn is_valid(&mut self) -> bool {
        self.read_celsius_x10().is_ok()
    }
}

/// A 0.1°C reading formatted as degrees, e.g. `-0.5°C`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelsiusX10(pub i16);

impl CelsiusX10 {
    /// Sign, whole degrees and tenths
    fn parts(&self) -> (&'static str, i32, i32) {
        let value = self.0 as i32;
        let sign = if value < 0 { "-" } else { "" };
        let magnitude = value.abs();
        (sign, magnitude / 10, magnitude % 10)
    }
}

impl fmt::Display for CelsiusX10 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, whole, tenths) = self.parts();
        write!(f, "{}{}.{}°C", sign, whole, tenths)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CelsiusX10 {
    fn format(&self, f: defmt::Formatter) {
        let (sign, whole, tenths) = self.parts();
        defmt::write!(f, "{=str}{}.{}°C", sign, whole, tenths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<i16, SensorError>);

    impl TemperatureSensor for Fixed {
        fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
            self.0
        }
    }

    #[test]
    fn test_read_celsius_truncates() {
        assert_eq!(Fixed(Ok(455)).read_celsius(), Ok(45));
        assert_eq!(Fixed(Ok(-15)).read_celsius(), Ok(-1));
    }

    #[test]
    fn test_celsius_x10_display() {
        assert_eq!(format!("{}", CelsiusX10(455)), "45.5°C");
        assert_eq!(format!("{}", CelsiusX10(0)), "0.0°C");
        assert_eq!(format!("{}", CelsiusX10(-5)), "-0.5°C");
        assert_eq!(format!("{}", CelsiusX10(-200)), "-20.0°C");
        assert_eq!(format!("{}", CelsiusX10(i16::MIN)), "-3276.8°C");
    }

    #[test]
    fn test_is_valid() {
        assert!(Fixed(Ok(250)).is_valid());
        assert!(!Fixed(Err(SensorError::ConversionError)).is_valid());
    }
}
