//! PT100 RTD through the E3D PT100 amplifier
//!
//! For boards with a 3.3V ADC reference and a 4.7K pull-up on the
//! thermistor input (BigTreeTech SKR and similar), where the stock
//! 5V PT100 tables do not apply. The amplifier must be powered from 3.3V,
//! which limits the usable range to roughly 360°C.
//!
//! The amplifier output rises with temperature, so this is a reversed-range
//! table ([`RawDirection::Rising`]). Temperatures are whole degrees Celsius.

use thermotab_core::{CalibrationPoint, RawDirection, TempTable, TempUnit};

const fn p(adc_raw: i16, celsius: i16) -> CalibrationPoint {
    CalibrationPoint::new(adc_raw, celsius)
}

/// Calibration points (10-bit ADC, °C)
///
/// Derived from PT100 resistance vs temperature through
/// [`Pt100AmpCircuit::BTT_3V3`]. The first row anchors the table at 0.
static POINTS: [CalibrationPoint; 49] = [
    p(0, 0),
    p(245, 1),
    p(253, 10),
    p(261, 20),
    p(270, 30),
    p(278, 40),
    p(287, 50),
    p(295, 60),
    p(303, 70),
    p(311, 80),
    p(319, 90),
    p(328, 100),
    p(336, 110),
    p(344, 120),
    p(352, 130),
    p(360, 140),
    p(368, 150),
    p(376, 160),
    p(384, 170),
    p(391, 180),
    p(399, 190),
    p(407, 200),
    p(415, 210),
    p(422, 220),
    p(430, 230),
    p(438, 240),
    p(445, 250),
    p(453, 260),
    p(460, 270),
    p(468, 280),
    p(475, 290),
    p(483, 300),
    p(490, 310),
    p(497, 320),
    p(505, 330),
    p(512, 340),
    p(519, 350),
    p(526, 360),
    p(533, 370),
    p(541, 380),
    p(548, 390),
    p(554, 400),
    p(623, 500),
    p(689, 600),
    p(751, 700),
    p(810, 800),
    p(850, 900),
    p(910, 1000),
    p(960, 1100),
];

/// PT100 with E3D amplifier at 3.3V, 4.7K pull-up
pub const PT100_E3D_AMP_3V3: TempTable<'static> =
    TempTable::new(&POINTS, RawDirection::Rising, TempUnit::Celsius);

/// PT100 resistance at 0°C
pub const PT100_R0_OHMS: f32 = 100.0;

/// Callendar-Van Dusen coefficients (IEC 60751, T >= 0°C)
const CVD_A: f32 = 3.9083e-3;
const CVD_B: f32 = -5.775e-7;

/// Amplifier + board input circuit
///
/// ```text
/// Vo   = (Vref / (RTD + Rb)) * RTD * gain
/// Vadc = ((Vref - Vo) / Rpu) * Ramp + Vo
/// ADC  = Vadc / Vref * 2^bits
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pt100AmpCircuit {
    /// ADC reference voltage (V)
    pub vref: f32,
    /// Combined bridge resistors in the INA826 circuit (ohms)
    pub bridge_ohms: f32,
    /// Pull-up on the board's thermistor input (ohms)
    pub pullup_ohms: f32,
    /// Amplifier output resistor (ohms)
    pub output_ohms: f32,
    /// Amplifier gain
    pub gain: f32,
    /// ADC resolution
    pub adc_bits: u8,
}

impl Pt100AmpCircuit {
    /// E3D amplifier on a BigTreeTech board input
    pub const BTT_3V3: Self = Self {
        vref: 3.3,
        bridge_ohms: 4400.0,
        pullup_ohms: 4700.0,
        output_ohms: 100.0,
        gain: 10.0,
        adc_bits: 10,
    };

    /// PT100 resistance at `celsius` (valid for 0°C and above)
    pub fn rtd_ohms(celsius: f32) -> f32 {
        PT100_R0_OHMS * (1.0 + CVD_A * celsius + CVD_B * celsius * celsius)
    }

    /// Amplifier output voltage for a given RTD resistance
    pub fn amp_output_volts(&self, rtd_ohms: f32) -> f32 {
        (self.vref / (rtd_ohms + self.bridge_ohms)) * rtd_ohms * self.gain
    }

    /// Voltage seen by the ADC once the board pull-up is accounted for
    pub fn adc_input_volts(&self, amp_volts: f32) -> f32 {
        ((self.vref - amp_volts) / self.pullup_ohms) * self.output_ohms + amp_volts
    }

    /// Expected (fractional) ADC reading at `celsius`
    pub fn adc_for_celsius(&self, celsius: f32) -> f32 {
        let volts = self.adc_input_volts(self.amp_output_volts(Self::rtd_ohms(celsius)));
        volts / self.vref * (1u32 << self.adc_bits) as f32
    }

    /// Calibration point for `celsius`, rounded to the nearest ADC count
    pub fn point_for_celsius(&self, celsius: i16) -> CalibrationPoint {
        let adc = self.adc_for_celsius(celsius as f32) + 0.5;
        CalibrationPoint::new(adc as i16, celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use thermotab_core::Oversampling;

    #[test]
    fn test_reference_readings() {
        assert_eq!(PT100_E3D_AMP_3V3.lookup(328), 100);
        assert_eq!(PT100_E3D_AMP_3V3.lookup(910), 1000);
        assert_eq!(PT100_E3D_AMP_3V3.lookup(0), 0);
    }

    #[test]
    fn test_saturates_at_ends() {
        assert_eq!(PT100_E3D_AMP_3V3.lookup(-1), 0);
        assert_eq!(PT100_E3D_AMP_3V3.lookup(960), 1100);
        assert_eq!(PT100_E3D_AMP_3V3.lookup(1023), 1100);
        assert_eq!(PT100_E3D_AMP_3V3.lookup(i32::MAX), 1100);
    }

    #[test]
    fn test_every_row_is_exact() {
        for point in PT100_E3D_AMP_3V3.points() {
            assert_eq!(
                PT100_E3D_AMP_3V3.lookup(point.adc_raw as i32),
                point.temperature
            );
        }
    }

    #[test]
    fn test_interpolates_between_rows() {
        // 25°C sits between the 20°C (261) and 30°C (270) rows
        assert_eq!(PT100_E3D_AMP_3V3.lookup(265), 24);
        // (245, 1) -> (253, 10): 4 counts of 8 is 4.5°C, truncated
        assert_eq!(PT100_E3D_AMP_3V3.lookup(249), 5);
        // Below the first real row only the anchor applies
        assert_eq!(PT100_E3D_AMP_3V3.lookup(100), 0);
    }

    #[test]
    fn test_reports_celsius_x10() {
        assert_eq!(
            PT100_E3D_AMP_3V3.lookup_celsius_x10(328, Oversampling::IDENTITY),
            1000
        );
        let ov = Oversampling::for_adc(16, 12);
        assert_eq!(PT100_E3D_AMP_3V3.lookup_celsius_x10(ov.ov(554), ov), 4000);
    }

    #[test]
    fn test_celsius_x10_keeps_fraction() {
        // (261, 20) -> (270, 30): 4 counts of 9 is 24.4°C
        assert_eq!(PT100_E3D_AMP_3V3.lookup(265), 24);
        assert_eq!(
            PT100_E3D_AMP_3V3.lookup_celsius_x10(265, Oversampling::IDENTITY),
            244
        );
        // Same reading summed over 16 conversions of a 12-bit ADC
        let ov = Oversampling::for_adc(16, 12);
        assert_eq!(PT100_E3D_AMP_3V3.lookup_celsius_x10(ov.ov(265), ov), 244);
    }

    #[test]
    fn test_raw_for_temperature() {
        assert_eq!(
            PT100_E3D_AMP_3V3.raw_for_temperature(25, Oversampling::IDENTITY),
            265
        );
        assert_eq!(
            PT100_E3D_AMP_3V3.raw_for_temperature(310, Oversampling::IDENTITY),
            490
        );
    }

    #[test]
    fn test_table_follows_circuit() {
        let circuit = Pt100AmpCircuit::BTT_3V3;

        // Rows above 800°C do not follow the model
        for point in PT100_E3D_AMP_3V3.points()[1..].iter().filter(|row| row.temperature <= 800) {
            let expected = circuit.adc_for_celsius(point.temperature as f32);
            let error = (expected - point.adc_raw as f32).abs();
            assert!(
                error < 1.0,
                "{}°C: table {} vs model {}",
                point.temperature,
                point.adc_raw,
                expected
            );
        }
    }

    #[test]
    fn test_rtd_resistance() {
        assert!((Pt100AmpCircuit::rtd_ohms(0.0) - 100.0).abs() < 0.01);
        assert!((Pt100AmpCircuit::rtd_ohms(100.0) - 138.51).abs() < 0.01);
    }

    #[test]
    fn test_point_for_celsius() {
        let circuit = Pt100AmpCircuit::BTT_3V3;
        assert_eq!(circuit.point_for_celsius(100), CalibrationPoint::new(328, 100));
        assert_eq!(circuit.point_for_celsius(400), CalibrationPoint::new(555, 400));
    }

    proptest! {
        #[test]
        fn prop_monotonic_over_adc_range(a in 0i32..1024, b in 0i32..1024) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(PT100_E3D_AMP_3V3.lookup(lo) <= PT100_E3D_AMP_3V3.lookup(hi));
        }

        #[test]
        fn prop_oversampled_agrees_with_single_sample(raw in 0i16..1024) {
            let ov = Oversampling::for_adc(16, 12);
            prop_assert_eq!(
                PT100_E3D_AMP_3V3.lookup_scaled(ov.ov(raw), ov),
                PT100_E3D_AMP_3V3.lookup(raw as i32)
            );
        }
    }
}
