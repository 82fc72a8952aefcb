//! Oversampling scale
//!
//! Lookup tables are written for a 10-bit converter reading one sample.
//! Firmware usually sums several conversions from a higher-resolution ADC
//! before converting, so the raw value it looks up is
//! `samples × 2^(adc_bits − table_bits)` times larger than the table
//! literal. [`Oversampling`] captures that factor (the `OV(n)` scaling)
//! and [`Accumulator`] collects the samples.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resolution the built-in tables are written in
pub const TABLE_BITS: u8 = 10;

/// Default number of summed conversions per reading
pub const DEFAULT_OVERSAMPLE: u8 = 16;

/// Largest `shift` reachable from clamped bit counts
const MAX_SHIFT: i8 = 15;

/// Scale between table literals and accumulated ADC readings
///
/// Decoded values go through the same normalization as [`Oversampling::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "OversamplingRecord"))]
pub struct Oversampling {
    /// Conversions summed per reading (at least 1)
    samples: u8,
    /// `adc_bits - table_bits`; negative when the ADC is coarser than the table
    shift: i8,
}

impl Oversampling {
    /// One sample at the table's own resolution
    pub const IDENTITY: Self = Self {
        samples: 1,
        shift: 0,
    };

    /// Create a scale
    ///
    /// `samples` of zero is treated as one. Bit counts are clamped to 1..=16.
    pub const fn new(samples: u8, table_bits: u8, adc_bits: u8) -> Self {
        let shift = clamp_bits(adc_bits) as i8 - clamp_bits(table_bits) as i8;
        Self::normalized(samples, shift)
    }

    const fn normalized(samples: u8, shift: i8) -> Self {
        let samples = if samples == 0 { 1 } else { samples };
        let shift = if shift > MAX_SHIFT {
            MAX_SHIFT
        } else if shift < -MAX_SHIFT {
            -MAX_SHIFT
        } else {
            shift
        };
        Self { samples, shift }
    }

    /// Scale for `samples` conversions of an ADC with `adc_bits` resolution,
    /// looked up in a 10-bit table
    pub const fn for_adc(samples: u8, adc_bits: u8) -> Self {
        Self::new(samples, TABLE_BITS, adc_bits)
    }

    /// Conversions summed per reading
    pub const fn samples(&self) -> u8 {
        self.samples
    }

    /// Scale a table literal into the accumulated ADC domain
    ///
    /// Equivalent of `OV(n)`; saturates at the `i32` limits.
    pub const fn ov(&self, table_raw: i16) -> i32 {
        let scaled = self.scale(table_raw);
        if scaled > i32::MAX as i64 {
            i32::MAX
        } else if scaled < i32::MIN as i64 {
            i32::MIN
        } else {
            scaled as i32
        }
    }

    /// Full-width scaling used by the lookup
    pub(crate) const fn scale(&self, table_raw: i16) -> i64 {
        let summed = table_raw as i64 * self.samples as i64;
        if self.shift >= 0 {
            summed << self.shift
        } else {
            summed >> (-self.shift)
        }
    }
}

/// Wire form of [`Oversampling`] before normalization
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct OversamplingRecord {
    samples: u8,
    shift: i8,
}

#[cfg(feature = "serde")]
impl From<OversamplingRecord> for Oversampling {
    fn from(record: OversamplingRecord) -> Self {
        Self::normalized(record.samples, record.shift)
    }
}

impl Default for Oversampling {
    fn default() -> Self {
        Self::IDENTITY
    }
}

const fn clamp_bits(bits: u8) -> u8 {
    if bits == 0 {
        1
    } else if bits > 16 {
        16
    } else {
        bits
    }
}

/// Sums a fixed number of ADC conversions
///
/// Feed one conversion per [`push`](Self::push); every `samples`-th push
/// returns the completed sum and starts a new one.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accumulator {
    samples: u8,
    count: u8,
    sum: u32,
}

impl Accumulator {
    /// Create an accumulator for the given scale
    pub const fn new(oversampling: Oversampling) -> Self {
        Self {
            samples: oversampling.samples,
            count: 0,
            sum: 0,
        }
    }

    /// Add one conversion
    ///
    /// Returns the sum once `samples` conversions have been added.
    pub fn push(&mut self, raw: u16) -> Option<u32> {
        self.sum += raw as u32;
        self.count += 1;

        if self.count >= self.samples {
            let sum = self.sum;
            self.reset();
            Some(sum)
        } else {
            None
        }
    }

    /// Discard a partial sum
    pub fn reset(&mut self) {
        self.count = 0;
        self.sum = 0;
    }

    /// Conversions collected toward the current sum
    pub fn pending(&self) -> u8 {
        self.count
    }
}
