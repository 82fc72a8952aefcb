//! Temperature sensor driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermotab-core:
//!
//! - Built-in calibration tables (PT100 + E3D amplifier, NTC 100K)
//! - PT100 amplifier circuit model used to derive and check tables
//! - [`sensor::TableSensor`], an oversampling table-lookup sensor over any
//!   [`thermotab_hal::AdcReader`]

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
