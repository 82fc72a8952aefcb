//! NTC 100K thermistor sensor
//!
//! Common thermistor used in 3D printing for temperature sensing.
//! Wired below a 4.7K pull-up, so the reading falls as the thermistor heats.

use thermotab_core::{CalibrationPoint, RawDirection, TempTable, TempUnit};

/// Pull-up resistor the table was generated for
pub const NTC_PULLUP_OHMS: u32 = 4700;

/// NTC 100K thermistor calibration points
///
/// Table format: (adc_raw, temperature_x10), 10-bit ADC.
/// Generated using beta equation with:
/// - R0 = 100,000 ohms at T0 = 25°C
/// - Beta = 3950K (typical for 100K NTC)
///
/// then mapped through the divider with [`divider_adc`].
///
/// Temperature range: -20°C to 150°C
static POINTS: [CalibrationPoint; 18] = [
    CalibrationPoint::new(1021, -200), // -20°C (very cold)
    CalibrationPoint::new(1019, -100), // -10°C
    CalibrationPoint::new(1016, 0),    // 0°C
    CalibrationPoint::new(1010, 100),  // 10°C
    CalibrationPoint::new(1000, 200),  // 20°C
    CalibrationPoint::new(978, 250),   // 25°C (R0)
    CalibrationPoint::new(967, 300),   // 30°C
    CalibrationPoint::new(943, 400),   // 40°C
    CalibrationPoint::new(916, 450),   // 45°C
    CalibrationPoint::new(885, 500),   // 50°C
    CalibrationPoint::new(862, 550),   // 55°C
    CalibrationPoint::new(812, 600),   // 60°C
    CalibrationPoint::new(736, 700),   // 70°C
    CalibrationPoint::new(645, 800),   // 80°C
    CalibrationPoint::new(552, 900),   // 90°C
    CalibrationPoint::new(471, 1000),  // 100°C
    CalibrationPoint::new(306, 1200),  // 120°C
    CalibrationPoint::new(180, 1500),  // 150°C
];

/// NTC 100K (B=3950) with 4.7K pull-up
pub const NTC_100K_4K7: TempTable<'static> =
    TempTable::new(&POINTS, RawDirection::Falling, TempUnit::DeciCelsius);

/// ADC reading for a thermistor of `resistance_ohms` below a pull-up
///
/// Circuit: VCC -- pullup -- ADC_PIN -- NTC -- GND
/// adc = 2^bits * R_ntc / (R_pullup + R_ntc), rounded to nearest.
pub const fn divider_adc(resistance_ohms: u32, pullup_ohms: u32, adc_bits: u8) -> u16 {
    let full_scale = 1u64 << adc_bits;
    let total = resistance_ohms as u64 + pullup_ohms as u64;
    if total == 0 {
        return 0;
    }
    ((full_scale * resistance_ohms as u64 + total / 2) / total) as u16
}
