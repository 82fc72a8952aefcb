//! Calibration lookup tables
//!
//! A table is an ordered list of `(adc_raw, temperature)` points. Raw
//! samples are converted by linear interpolation between the two points
//! that bracket them; samples beyond either end saturate to that end's
//! temperature, so a lookup never fails.
//!
//! Tables are written in the ADC domain they were derived for (10-bit for
//! the built-in ones). Oversampled or higher-resolution readings are looked
//! up through an [`Oversampling`] scale applied to the knots on the fly.
//!
//! ```text
//!  temp
//!   ▲                 Rising (PT100 amp)           Falling (NTC divider)
//!   │          ●───── saturate                ─────●
//!   │        ╱                                      ╲
//!   │      ●                                          ●
//!   │    ╱                                              ╲
//!   │ ──●  saturate                                      ●──
//!   └─────────────────────────────────────────────────────────▶ adc_raw
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::oversample::Oversampling;

/// One calibration point
///
/// `adc_raw` is a reading in the table's ADC domain, `temperature` is in
/// the table's [`TempUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationPoint {
    /// Raw ADC reading
    pub adc_raw: i16,
    /// Temperature at that reading
    pub temperature: i16,
}

impl CalibrationPoint {
    /// Create a calibration point
    pub const fn new(adc_raw: i16, temperature: i16) -> Self {
        Self {
            adc_raw,
            temperature,
        }
    }
}

/// How raw readings move as temperature rises
///
/// Points are always stored in increasing temperature order; the direction
/// decides which way the raw column runs and therefore which end of the
/// table a given sample saturates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RawDirection {
    /// Raw reading falls as temperature rises (NTC thermistor below a pull-up)
    #[default]
    Falling,
    /// Raw reading rises with temperature (RTD amplifiers, thermocouple amps)
    ///
    /// This is the reversed sensor range.
    Rising,
}

impl RawDirection {
    /// True for a reversed sensor range (raw rises with temperature)
    pub const fn is_reversed(&self) -> bool {
        matches!(self, RawDirection::Rising)
    }

    /// True if `next` comes after `prev` when walking up in temperature
    const fn advances(&self, prev: i64, next: i64) -> bool {
        match self {
            RawDirection::Rising => next > prev,
            RawDirection::Falling => next < prev,
        }
    }
}

/// Unit of a table's temperature column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TempUnit {
    /// Whole degrees Celsius
    Celsius,
    /// Tenths of a degree Celsius
    #[default]
    DeciCelsius,
}

impl TempUnit {
    /// Number of 0.1°C steps in one unit
    pub const fn tenths_per_unit(&self) -> i16 {
        match self {
            TempUnit::Celsius => 10,
            TempUnit::DeciCelsius => 1,
        }
    }
}

/// Reasons a set of points cannot form a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Fewer than two points
    TooShort,
    /// `points[index]` does not advance the raw column in the table's direction
    RawNotMonotonic { index: usize },
    /// `points[index]` is not hotter than the point before it
    TemperatureNotIncreasing { index: usize },
}

/// Check the table invariants
const fn validate(points: &[CalibrationPoint], direction: RawDirection) -> Result<(), TableError> {
    if points.len() < 2 {
        return Err(TableError::TooShort);
    }

    let mut i = 1;
    while i < points.len() {
        let prev = points[i - 1];
        let next = points[i];

        if next.temperature <= prev.temperature {
            return Err(TableError::TemperatureNotIncreasing { index: i });
        }
        if !direction.advances(prev.adc_raw as i64, next.adc_raw as i64) {
            return Err(TableError::RawNotMonotonic { index: i });
        }

        i += 1;
    }

    Ok(())
}

/// Temperature lookup table
///
/// Borrowed view over validated calibration points. Built-in tables are
/// `const`s over `static` arrays; runtime tables (custom points loaded from
/// config) go through [`TempTable::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempTable<'a> {
    points: &'a [CalibrationPoint],
    direction: RawDirection,
    unit: TempUnit,
}

impl<'a> TempTable<'a> {
    /// Create a table, checking its invariants during const evaluation
    ///
    /// # Panics
    ///
    /// If the points are not a valid table. Used in a `const` item this is
    /// a compile error rather than a runtime panic.
    pub const fn new(points: &'a [CalibrationPoint], direction: RawDirection, unit: TempUnit) -> Self {
        match validate(points, direction) {
            Ok(()) => {}
            Err(TableError::TooShort) => panic!("calibration table needs at least two points"),
            Err(TableError::RawNotMonotonic { .. }) => {
                panic!("calibration table raw column is not strictly monotonic")
            }
            Err(TableError::TemperatureNotIncreasing { .. }) => {
                panic!("calibration table temperatures are not strictly increasing")
            }
        }

        Self {
            points,
            direction,
            unit,
        }
    }

    /// Create a table from runtime data
    pub fn try_new(
        points: &'a [CalibrationPoint],
        direction: RawDirection,
        unit: TempUnit,
    ) -> Result<Self, TableError> {
        validate(points, direction)?;
        Ok(Self {
            points,
            direction,
            unit,
        })
    }

    /// Calibration points, coldest first
    pub const fn points(&self) -> &'a [CalibrationPoint] {
        self.points
    }

    /// Number of calibration points
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a valid table has at least two points
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Raw direction of the table
    pub const fn direction(&self) -> RawDirection {
        self.direction
    }

    /// Unit of the temperature column
    pub const fn unit(&self) -> TempUnit {
        self.unit
    }

    /// Lowest and highest raw value covered, in the table's ADC domain
    pub const fn raw_range(&self) -> (i16, i16) {
        let first = self.points[0].adc_raw;
        let last = self.points[self.points.len() - 1].adc_raw;
        match self.direction {
            RawDirection::Rising => (first, last),
            RawDirection::Falling => (last, first),
        }
    }

    /// Coldest and hottest temperature covered, in the table's unit
    pub const fn temperature_range(&self) -> (i16, i16) {
        (
            self.points[0].temperature,
            self.points[self.points.len() - 1].temperature,
        )
    }

    /// Convert a raw sample in the table's own ADC domain
    ///
    /// Returns the temperature in the table's unit, saturated to the table's
    /// range. Between points the result is truncated toward the colder point.
    pub fn lookup(&self, adc_raw: i32) -> i16 {
        self.lookup_scaled(adc_raw, Oversampling::IDENTITY)
    }

    /// Convert a sample taken at a different resolution or summed over
    /// several conversions
    ///
    /// Each knot is scaled by `oversampling` before comparison, which is
    /// equivalent to looking `adc_raw` up in a table written with `OV(n)`.
    pub fn lookup_scaled(&self, adc_raw: i32, oversampling: Oversampling) -> i16 {
        saturate_i16(self.interpolate(adc_raw, oversampling, 1))
    }

    /// Convert a sample and report it in 0.1°C units regardless of the
    /// table's unit
    ///
    /// Whole-degree tables are interpolated in tenths, so the fraction
    /// between two points is kept.
    pub fn lookup_celsius_x10(&self, adc_raw: i32, oversampling: Oversampling) -> i16 {
        let factor = self.unit.tenths_per_unit() as i64;
        saturate_i16(self.interpolate(adc_raw, oversampling, factor))
    }

    /// Saturating interpolation with the temperature column multiplied by
    /// `factor`
    fn interpolate(&self, adc_raw: i32, oversampling: Oversampling, factor: i64) -> i64 {
        let raw = adc_raw as i64;
        let knot = |p: &CalibrationPoint| oversampling.scale(p.adc_raw);

        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];

        // At or beyond the cold end
        if !self.direction.advances(knot(first), raw) {
            return first.temperature as i64 * factor;
        }
        // At or beyond the hot end
        if !self.direction.advances(raw, knot(last)) {
            return last.temperature as i64 * factor;
        }

        // First point past the sample; the one before it brackets from below
        let direction = self.direction;
        let upper = 1 + self.points[1..].partition_point(|p| !direction.advances(raw, knot(p)));
        let lo = &self.points[upper - 1];
        let hi = &self.points[upper];

        let a_lo = knot(lo);
        let a_hi = knot(hi);
        let t_lo = lo.temperature as i64 * factor;
        let t_hi = hi.temperature as i64 * factor;

        // Numerator and denominator share a sign, so the quotient is never
        // negative and division truncates toward t_lo.
        t_lo + (raw - a_lo) * (t_hi - t_lo) / (a_hi - a_lo)
    }

    /// Inverse lookup: the raw reading expected at `temperature`
    ///
    /// `temperature` is in the table's unit. The result is in the scaled
    /// ADC domain and saturates to the table's end points.
    pub fn raw_for_temperature(&self, temperature: i16, oversampling: Oversampling) -> i32 {
        let knot = |p: &CalibrationPoint| oversampling.scale(p.adc_raw);

        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];

        if temperature <= first.temperature {
            return saturate_i32(knot(first));
        }
        if temperature >= last.temperature {
            return saturate_i32(knot(last));
        }

        let upper = 1 + self.points[1..].partition_point(|p| p.temperature <= temperature);
        let lo = &self.points[upper - 1];
        let hi = &self.points[upper];

        let a_lo = knot(lo);
        let a_hi = knot(hi);
        let t_lo = lo.temperature as i64;
        let t_hi = hi.temperature as i64;

        saturate_i32(a_lo + (temperature as i64 - t_lo) * (a_hi - a_lo) / (t_hi - t_lo))
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn saturate_i16(value: i64) -> i16 {
    value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}
