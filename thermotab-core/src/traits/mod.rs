//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and sensor implementations.

pub mod sensor;

pub use sensor::{CelsiusX10, SensorError, TemperatureSensor};
