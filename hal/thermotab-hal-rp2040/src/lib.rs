//! RP2040-specific HAL for Thermotab
//!
//! This crate provides RP2040-specific implementations of the shared
//! `thermotab-hal` traits:
//!
//! - ADC channel mapping for config-driven pin selection
//! - Blocking ADC reader (implements `thermotab_hal::AdcReader`)

#![no_std]

pub mod adc;

// Re-export shared traits from thermotab-hal for convenience
pub use thermotab_hal::{AdcReader, AdcResolution};
