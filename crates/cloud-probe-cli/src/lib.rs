pub mod context;
pub mod report;
pub mod telemetry;
