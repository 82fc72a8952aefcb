//! Configuration types
//!
//! Board-agnostic configuration structures stored as postcard binary data.

pub mod sensor;

pub use sensor::*;
