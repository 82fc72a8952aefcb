//! Board-agnostic core logic for calibration-table temperature sensing
//!
//! This crate contains everything that does not depend on a specific
//! board or sensor:
//!
//! - Calibration tables and the saturating interpolation lookup
//! - Oversampling scale between table literals and accumulated readings
//! - Temperature sensor traits
//! - Persisted sensor configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod oversample;
pub mod table;
pub mod traits;

pub use oversample::{Accumulator, Oversampling};
pub use table::{CalibrationPoint, RawDirection, TableError, TempTable, TempUnit};
