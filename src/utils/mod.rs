pub mod banner;
pub mod telemetry;
