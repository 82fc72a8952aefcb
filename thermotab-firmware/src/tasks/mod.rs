//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod report;
pub mod sensor;

pub use report::report_task;
pub use sensor::sensor_task;
