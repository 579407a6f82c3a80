pub mod context;
pub mod stats;
pub mod telemetry;
