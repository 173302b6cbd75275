//! Prometheus metrics

use metrics::{describe_counter, describe_gauge, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const OPTIONS_OPENED: &str = "optpool_options_opened_total";
pub const OPTIONS_SETTLED: &str = "optpool_options_settled_total";
pub const DEPOSITS: &str = "optpool_deposits_total";
pub const WITHDRAWALS: &str = "optpool_withdrawals_total";
pub const LOCKED: &str = "optpool_locked";
pub const UTILIZATION: &str = "optpool_utilization";

/// Register descriptions for every metric the crate emits
pub fn describe_metrics() {
    describe_counter!(OPTIONS_OPENED, Unit::Count, "Positions opened, by side");
    describe_counter!(OPTIONS_SETTLED, Unit::Count, "Positions settled, by outcome");
    describe_counter!(DEPOSITS, Unit::Count, "Liquidity deposits");
    describe_counter!(WITHDRAWALS, Unit::Count, "Liquidity withdrawals");
    describe_gauge!(LOCKED, "Pool balance reserved against open positions");
    describe_gauge!(UTILIZATION, "Locked over pool balance");
}

/// Install a process-wide Prometheus recorder and return its render handle
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;
    describe_metrics();
    Ok(handle)
}
