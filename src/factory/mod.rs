//! Option factory
//!
//! One option book per asset. The factory is the trust anchor: the
//! registry it exports is how collaborators recognise calls that really
//! come from one of its options.

mod registry;
mod types;

pub use registry::OptionRegistry;
pub use types::FactoryError;

use crate::access::{FactoryId, GovernanceCap};
use crate::host::{Event, Host};
use crate::option::{OptionBook, OptionParams};
use crate::pool::PoolParams;
use crate::rate::RateCalculator;
use crate::types::{Address, Asset};
use std::collections::BTreeMap;

/// Creates and owns the option book of every supported asset
#[derive(Debug)]
pub struct OptionFactory {
    id: FactoryId,
    pool_params: PoolParams,
    option_params: OptionParams,
    registry: OptionRegistry,
    options: BTreeMap<Asset, OptionBook>,
}

impl OptionFactory {
    /// Create a factory and the single capability that governs it
    pub fn new(pool_params: PoolParams, option_params: OptionParams) -> (Self, GovernanceCap) {
        let id = FactoryId::next();
        let factory = Self {
            id,
            pool_params,
            option_params,
            registry: OptionRegistry::new(),
            options: BTreeMap::new(),
        };
        (factory, GovernanceCap::mint(id))
    }

    pub fn id(&self) -> FactoryId {
        self.id
    }

    /// Handle for collaborators that authenticate option callers
    pub fn registry(&self) -> OptionRegistry {
        self.registry.clone()
    }

    pub fn is_option(&self, address: &Address) -> bool {
        self.registry.is_option(address)
    }

    pub fn option(&self, asset: &Asset) -> Option<&OptionBook> {
        self.options.get(asset)
    }

    pub fn option_mut(&mut self, asset: &Asset) -> Option<&mut OptionBook> {
        self.options.get_mut(asset)
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionBook> {
        self.options.values()
    }

    /// Onboard `asset` with its own pool and rate calculator
    pub fn create_option(
        &mut self,
        host: &mut dyn Host,
        cap: &GovernanceCap,
        asset: Asset,
        calculator: Box<dyn RateCalculator>,
    ) -> Result<Address, FactoryError> {
        if !cap.authorizes(self.id) {
            return Err(FactoryError::AccessDenied);
        }
        if self.options.contains_key(&asset) {
            return Err(FactoryError::AlreadyExists(asset));
        }
        calculator
            .limits()
            .validate()
            .map_err(crate::option::OptionError::from)?;

        let address = Address::derived("option", &asset.key());
        let book = OptionBook::new(
            self.id,
            address.clone(),
            asset.clone(),
            self.pool_params.clone(),
            self.option_params,
            calculator,
        )?;
        self.options.insert(asset.clone(), book);
        self.registry.register(address.clone());

        tracing::info!(%asset, option = %address, "Option created");
        host.emit(Event::OptionCreated {
            asset,
            option: address.clone(),
        });
        Ok(address)
    }
}
