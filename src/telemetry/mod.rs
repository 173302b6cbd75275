//! Telemetry module
//!
//! Structured logging and Prometheus metrics

mod logging;
mod recorder;

pub use logging::{init_logging, LogFormat};
pub use recorder::{
    describe_metrics, install_prometheus, DEPOSITS, LOCKED, OPTIONS_OPENED, OPTIONS_SETTLED,
    UTILIZATION, WITHDRAWALS,
};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
