//! Analog-to-digital converter abstractions
//!
//! Provides a trait for reading one analog channel that can be implemented
//! by chip-specific HALs.

/// ADC conversion resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcResolution {
    bits: u8,
}

impl AdcResolution {
    /// 10-bit converter (0-1023), the resolution lookup tables are written in
    pub const BITS_10: Self = Self { bits: 10 };

    /// 12-bit converter (0-4095), e.g. RP2040
    pub const BITS_12: Self = Self { bits: 12 };

    /// Create a resolution from a bit count
    ///
    /// Bit counts outside 1..=16 are clamped into that range.
    pub const fn from_bits(bits: u8) -> Self {
        let bits = if bits == 0 {
            1
        } else if bits > 16 {
            16
        } else {
            bits
        };
        Self { bits }
    }

    /// Number of bits per conversion
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Largest value a single conversion can return
    pub const fn max_value(&self) -> u16 {
        ((1u32 << self.bits) - 1) as u16
    }
}

/// Single-channel ADC reader
///
/// Implementations own both the converter and the channel, so a driver
/// holding an `AdcReader` can sample without knowing which pin it is on.
pub trait AdcReader {
    /// Error type for conversions
    type Error;

    /// Perform one conversion and return the raw reading
    ///
    /// Takes `&mut self` because conversions require exclusive access
    /// to the converter.
    fn read(&mut self) -> Result<u16, Self::Error>;

    /// Resolution of the values returned by [`read`](Self::read)
    fn resolution(&self) -> AdcResolution;
}

impl<T: AdcReader + ?Sized> AdcReader for &mut T {
    type Error = T::Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        (**self).read()
    }

    fn resolution(&self) -> AdcResolution {
        (**self).resolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_value() {
        assert_eq!(AdcResolution::BITS_10.max_value(), 1023);
        assert_eq!(AdcResolution::BITS_12.max_value(), 4095);
        assert_eq!(AdcResolution::from_bits(16).max_value(), u16::MAX);
    }

    #[test]
    fn test_from_bits_clamps() {
        assert_eq!(AdcResolution::from_bits(0).bits(), 1);
        assert_eq!(AdcResolution::from_bits(24).bits(), 16);
        assert_eq!(AdcResolution::from_bits(12), AdcResolution::BITS_12);
    }
}
