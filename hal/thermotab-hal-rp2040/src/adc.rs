//! ADC channel management
//!
//! RP2040 has a single 12-bit ADC with four external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29

use embassy_rp::adc::{Adc, Blocking, Channel, Error};
use thermotab_hal::{AdcReader, AdcResolution};

/// RP2040 ADC resolution
pub const RP2040_ADC_RESOLUTION: AdcResolution = AdcResolution::BITS_12;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
}

impl AdcChannel {
    /// Get the GPIO pin for this ADC channel
    pub fn gpio(&self) -> u8 {
        match self {
            AdcChannel::Adc0 => 26,
            AdcChannel::Adc1 => 27,
            AdcChannel::Adc2 => 28,
            AdcChannel::Adc3 => 29,
        }
    }

    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }
}

/// Blocking single-channel reader over the embassy-rp ADC driver
///
/// Conversions take about 2µs, so blocking reads are fine from a task
/// that samples a few times per second.
pub struct BlockingAdcReader<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> BlockingAdcReader<'d> {
    /// Create a reader for one channel
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }

    /// Release the ADC and channel
    pub fn release(self) -> (Adc<'d, Blocking>, Channel<'d>) {
        (self.adc, self.channel)
    }
}

impl AdcReader for BlockingAdcReader<'_> {
    type Error = Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        self.adc.blocking_read(&mut self.channel)
    }

    fn resolution(&self) -> AdcResolution {
        RP2040_ADC_RESOLUTION
    }
}
