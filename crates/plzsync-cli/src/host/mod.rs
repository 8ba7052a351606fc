pub mod command;
pub mod config;
pub mod instrumented;
pub mod render;
pub mod telemetry;
