//! Configuration types for option-pool

use crate::option::{GasRefund, OptionParams};
use crate::pool::PoolParams;
use crate::rate::{FixedRateCalculator, RateCalculator, RateError, RateLimits, RoundScaledCalculator};
use crate::telemetry::LogFormat;
use crate::types::{Address, Asset, Bps, Round};
use chrono::Duration;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub pool: PoolConfig,
    #[serde(default)]
    pub option: OptionConfig,
    #[serde(default)]
    pub rate: RateConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Liquidity pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Base asset of the pool
    #[serde(default = "default_asset")]
    pub asset: Asset,
    /// Early-withdrawal window after each deposit (seconds)
    pub lock_time_secs: u64,
    /// Penalty on withdrawals inside the window
    pub withdraw_penalty_bps: Bps,
    /// Receiver of penalties and protocol fees
    pub treasury: String,
}

fn default_asset() -> Asset {
    Asset::Native
}

/// Option book configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OptionConfig {
    #[serde(default = "default_min_rounds")]
    pub min_rounds: Round,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: Round,
    #[serde(default = "default_fee_bps")]
    pub settler_fee_bps: Bps,
    #[serde(default = "default_fee_bps")]
    pub protocol_fee_bps: Bps,
    #[serde(default)]
    pub gas_refund_enabled: bool,
    /// Execution units charged per open when gas refunds are on
    #[serde(default = "default_gas_units")]
    pub gas_units: u64,
    #[serde(default)]
    pub gas_price: u64,
}

fn default_min_rounds() -> Round {
    1
}
fn default_max_rounds() -> Round {
    1_000
}
fn default_fee_bps() -> Bps {
    100 // 1%
}
fn default_gas_units() -> u64 {
    150_000
}

impl Default for OptionConfig {
    fn default() -> Self {
        Self {
            min_rounds: default_min_rounds(),
            max_rounds: default_max_rounds(),
            settler_fee_bps: default_fee_bps(),
            protocol_fee_bps: default_fee_bps(),
            gas_refund_enabled: false,
            gas_units: default_gas_units(),
            gas_price: 0,
        }
    }
}

/// Payout strategy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateStrategy {
    #[default]
    Fixed,
    RoundScaled,
}

/// Rate calculator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    #[serde(default)]
    pub strategy: RateStrategy,
    #[serde(default = "default_max_option_size_bps")]
    pub max_option_size_bps: Bps,
    #[serde(default = "default_max_utilization_bps")]
    pub max_utilization_bps: Bps,
    /// Fixed strategy payout multiplier
    #[serde(default = "default_multiplier_bps")]
    pub multiplier_bps: Bps,
    /// Round-scaled strategy: multiplier at zero rounds
    #[serde(default = "default_base_bps")]
    pub base_bps: Bps,
    /// Round-scaled strategy: increase per round
    #[serde(default = "default_per_round_bps")]
    pub per_round_bps: Bps,
    /// Round-scaled strategy: ceiling
    #[serde(default = "default_cap_bps")]
    pub cap_bps: Bps,
}

fn default_max_option_size_bps() -> Bps {
    1_000 // 10%
}
fn default_max_utilization_bps() -> Bps {
    8_000 // 80%
}
fn default_multiplier_bps() -> Bps {
    8_000 // 0.8x
}
fn default_base_bps() -> Bps {
    5_000
}
fn default_per_round_bps() -> Bps {
    50
}
fn default_cap_bps() -> Bps {
    9_000
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            strategy: RateStrategy::Fixed,
            max_option_size_bps: default_max_option_size_bps(),
            max_utilization_bps: default_max_utilization_bps(),
            multiplier_bps: default_multiplier_bps(),
            base_bps: default_base_bps(),
            per_round_bps: default_per_round_bps(),
            cap_bps: default_cap_bps(),
        }
    }
}

/// Oracle configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OracleConfig {
    /// Rounds a historical lookup may slide forward
    #[serde(default)]
    pub round_tolerance: u64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn pool_params(&self) -> anyhow::Result<PoolParams> {
        let lock_time = i64::try_from(self.pool.lock_time_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| anyhow::anyhow!("lock_time_secs out of range"))?;
        Ok(PoolParams {
            lock_time,
            withdraw_penalty_bps: self.pool.withdraw_penalty_bps,
            treasury: Address::new(self.pool.treasury.clone()),
        })
    }

    pub fn option_params(&self) -> OptionParams {
        OptionParams {
            min_rounds: self.option.min_rounds,
            max_rounds: self.option.max_rounds,
            settler_fee_bps: self.option.settler_fee_bps,
            protocol_fee_bps: self.option.protocol_fee_bps,
            gas_refund: GasRefund {
                enabled: self.option.gas_refund_enabled,
                gas_units: self.option.gas_units,
                gas_price: self.option.gas_price as u128,
            },
        }
    }

    /// Build the configured rate calculator
    pub fn calculator(&self) -> Result<Box<dyn RateCalculator>, RateError> {
        let rate = &self.rate;
        let limits = RateLimits::new(rate.max_option_size_bps, rate.max_utilization_bps)?;
        Ok(match rate.strategy {
            RateStrategy::Fixed => Box::new(FixedRateCalculator::new(limits, rate.multiplier_bps)?),
            RateStrategy::RoundScaled => Box::new(RoundScaledCalculator::new(
                limits,
                rate.base_bps,
                rate.per_round_bps,
                rate.cap_bps,
            )?),
        })
    }
}
