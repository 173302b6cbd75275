//! Push-driven in-memory oracle

use super::{OracleError, PriceOracle};
use crate::types::{Asset, Price, Round};
use std::collections::{BTreeMap, HashMap};

/// Oracle whose prices are published explicitly, one round at a time
#[derive(Debug, Clone, Default)]
pub struct ManualOracle {
    round_tolerance: u64,
    feeds: HashMap<Asset, BTreeMap<Round, Price>>,
}

impl ManualOracle {
    pub fn new(round_tolerance: u64) -> Self {
        Self {
            round_tolerance,
            feeds: HashMap::new(),
        }
    }

    /// Register an asset with no prices yet
    pub fn add_source(&mut self, asset: Asset) {
        self.feeds.entry(asset).or_default();
    }

    /// Publish `price` for `asset` at `round`
    ///
    /// Rounds may skip ahead. Skipped rounds more than `round_tolerance`
    /// behind the next published one stay unpriced for good.
    pub fn publish(&mut self, asset: &Asset, round: Round, price: Price) -> Result<(), OracleError> {
        if price == 0 {
            return Err(OracleError::ZeroPrice(asset.clone()));
        }
        let feed = self.feeds.entry(asset.clone()).or_default();
        if let Some((&latest, _)) = feed.last_key_value() {
            if round <= latest {
                return Err(OracleError::RoundNotIncreasing { round, latest });
            }
        }
        feed.insert(round, price);
        tracing::debug!(%asset, round, price = %price, "Price published");
        Ok(())
    }

    /// Publish at the round after the latest one
    pub fn push(&mut self, asset: &Asset, price: Price) -> Result<Round, OracleError> {
        let next = match self.feeds.get(asset).and_then(|feed| feed.last_key_value()) {
            Some((&latest, _)) => latest
                .checked_add(1)
                .ok_or(OracleError::RoundNotIncreasing {
                    round: latest,
                    latest,
                })?,
            None => 1,
        };
        self.publish(asset, next, price)?;
        Ok(next)
    }
}

impl PriceOracle for ManualOracle {
    fn has_source(&self, asset: &Asset) -> bool {
        self.feeds.contains_key(asset)
    }

    fn latest(&self, asset: &Asset) -> Result<(Round, Price), OracleError> {
        let feed = self
            .feeds
            .get(asset)
            .ok_or_else(|| OracleError::NoSource(asset.clone()))?;
        feed.last_key_value()
            .map(|(&round, &price)| (round, price))
            .ok_or(OracleError::MissingRound {
                asset: asset.clone(),
                round: 0,
            })
    }

    fn price_at(&self, asset: &Asset, round: Round) -> Result<Price, OracleError> {
        let feed = self
            .feeds
            .get(asset)
            .ok_or_else(|| OracleError::NoSource(asset.clone()))?;
        let upper = round.saturating_add(self.round_tolerance);
        feed.range(round..=upper)
            .next()
            .map(|(_, &price)| price)
            .ok_or(OracleError::MissingRound {
                asset: asset.clone(),
                round,
            })
    }

    fn round_tolerance(&self) -> u64 {
        self.round_tolerance
    }
}
