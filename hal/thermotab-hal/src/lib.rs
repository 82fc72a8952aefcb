//! Thermotab Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. Sensor drivers are written against these traits
//! so the same conversion code runs on the target and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (thermotab-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermotab-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌────────────────┐
//!             │ thermotab-hal- │
//!             │     rp2040     │
//!             └────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`adc::AdcReader`] - Single-channel analog sampling

#![no_std]
#![deny(unsafe_code)]

pub mod adc;

// Re-export key traits at crate root for convenience
pub use adc::{AdcReader, AdcResolution};
