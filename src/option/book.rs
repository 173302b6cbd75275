//! Option book: positions written against a pool

use super::settlement::{decide, waterfall};
use super::types::{validate_fee, validate_rounds};
use super::{BinaryOption, OptionError, OptionParams, Outcome, PositionState, Settlement, Side};
use crate::access::{FactoryId, GovernanceCap};
use crate::host::{CallContext, Event, Host};
use crate::pool::{Pool, PoolParams, PoolStatus, WithdrawReceipt};
use crate::rate::{RateCalculator, RateRequest};
use crate::rewards;
use crate::telemetry;
use crate::types::{Address, Amount, Asset, Bps, Round};

/// Binary options over one asset, underwritten by an owned [`Pool`]
pub struct OptionBook {
    factory: FactoryId,
    pool: Pool,
    calculator: Box<dyn RateCalculator>,
    params: OptionParams,
    positions: Vec<BinaryOption>,
    open_calls: Amount,
    open_puts: Amount,
}

impl std::fmt::Debug for OptionBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionBook")
            .field("pool", &self.pool)
            .field("calculator", &self.calculator.name())
            .field("params", &self.params)
            .field("positions", &self.positions.len())
            .field("open_calls", &self.open_calls)
            .field("open_puts", &self.open_puts)
            .finish()
    }
}

impl OptionBook {
    pub(crate) fn new(
        factory: FactoryId,
        address: Address,
        asset: Asset,
        pool_params: PoolParams,
        params: OptionParams,
        calculator: Box<dyn RateCalculator>,
    ) -> Result<Self, OptionError> {
        if pool_params.treasury.is_empty() {
            return Err(OptionError::Misconfigured("treasury address not set"));
        }
        validate_fee("withdraw_penalty_bps", pool_params.withdraw_penalty_bps)?;
        params.validate()?;
        Ok(Self {
            factory,
            pool: Pool::new(address, asset, pool_params),
            calculator,
            params,
            positions: vec![],
            open_calls: 0,
            open_puts: 0,
        })
    }

    pub fn address(&self) -> &Address {
        self.pool.address()
    }

    pub fn asset(&self) -> &Asset {
        self.pool.asset()
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn params(&self) -> &OptionParams {
        &self.params
    }

    pub fn calculator(&self) -> &dyn RateCalculator {
        self.calculator.as_ref()
    }

    pub fn open_calls(&self) -> Amount {
        self.open_calls
    }

    pub fn open_puts(&self) -> Amount {
        self.open_puts
    }

    pub fn position(&self, id: usize) -> Option<&BinaryOption> {
        self.positions.get(id)
    }

    pub fn positions(&self) -> &[BinaryOption] {
        &self.positions
    }

    pub fn deposit(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        amount: Amount,
    ) -> Result<Amount, OptionError> {
        Ok(self.pool.deposit(host, ctx, amount)?)
    }

    pub fn withdraw(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        shares: Amount,
    ) -> Result<WithdrawReceipt, OptionError> {
        Ok(self.pool.withdraw(host, ctx, shares)?)
    }

    pub fn open_call(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        amount: Amount,
        rounds: Round,
    ) -> Result<usize, OptionError> {
        self.open(host, ctx, Side::Call, amount, rounds)
    }

    pub fn open_put(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        amount: Amount,
        rounds: Round,
    ) -> Result<usize, OptionError> {
        self.open(host, ctx, Side::Put, amount, rounds)
    }

    /// Dry-run the rate calculator for a prospective position
    pub fn quote(
        &self,
        host: &dyn Host,
        side: Side,
        amount: Amount,
        rounds: Round,
    ) -> Result<Amount, OptionError> {
        let request = RateRequest {
            pool_balance: self.pool.balance(host),
            open_calls: self.open_calls,
            open_puts: self.open_puts,
            amount,
            rounds,
            side,
            pending_deposit: 0,
        };
        Ok(self.calculator.calculate_rate(&request)?)
    }

    /// Write a new position: pull the notional into the pool and lock the
    /// calculated reward against it.
    pub fn open(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        side: Side,
        amount: Amount,
        rounds: Round,
    ) -> Result<usize, OptionError> {
        let status = self.pool.status();
        if !status.allows_new_options() {
            return Err(OptionError::PoolNotActive(status));
        }
        let amount = if self.asset().is_native() {
            ctx.value
        } else if ctx.value != 0 {
            return Err(OptionError::UnexpectedValue(ctx.value));
        } else {
            amount
        };
        if amount == 0 {
            return Err(OptionError::ZeroAmount);
        }
        let min = self
            .params
            .min_rounds
            .max(host.oracle().round_tolerance().saturating_add(1));
        let max = self.params.max_rounds;
        if rounds < min || rounds > max {
            return Err(OptionError::InvalidRounds { rounds, min, max });
        }
        if !host.oracle().has_source(self.asset()) {
            return Err(OptionError::Misconfigured("no oracle source for asset"));
        }

        let maximum = self.calculator.max_amount(self.pool.available(host));
        if amount > maximum {
            return Err(OptionError::AmountTooLarge { amount, maximum });
        }

        let (round, price) = host.oracle().latest(self.asset())?;

        // The notional arrives in this call; the calculator excludes it
        let balance = self.pool.balance(host);
        let request = RateRequest {
            pool_balance: balance.checked_add(amount).ok_or(OptionError::Overflow)?,
            open_calls: self.open_calls,
            open_puts: self.open_puts,
            amount,
            rounds,
            side,
            pending_deposit: amount,
        };
        let reward = self.calculator.calculate_rate(&request)?;

        let expiration_round = round.checked_add(rounds).ok_or(OptionError::RoundOverflow)?;
        let side_total = match side {
            Side::Call => self.open_calls,
            Side::Put => self.open_puts,
        }
        .checked_add(reward)
        .ok_or(OptionError::Overflow)?;
        self.pool
            .locked()
            .checked_add(reward)
            .ok_or(OptionError::Overflow)?;

        host.ledger_mut()
            .transfer(self.pool.asset(), &ctx.caller, self.pool.address(), amount)?;

        let id = self.positions.len();
        self.positions.push(BinaryOption {
            beneficiary: ctx.caller.clone(),
            strike_price: price,
            amount,
            reward,
            open_round: round,
            expiration_round,
            side,
            state: PositionState::Open,
        });
        self.pool.lock(host, reward)?;
        match side {
            Side::Call => self.open_calls = side_total,
            Side::Put => self.open_puts = side_total,
        }

        tracing::info!(
            pool = %self.address(),
            id,
            ?side,
            price = %price,
            amount = %amount,
            reward = %reward,
            expiration_round,
            "Position opened"
        );
        metrics::counter!(telemetry::OPTIONS_OPENED, "side" => side_label(side)).increment(1);
        self.record_utilization(host);
        host.emit(Event::PositionOpened {
            pool: self.address().clone(),
            id,
            side,
            price,
            amount,
            reward,
            expiration: expiration_round,
        });

        if let Some(cost) = self.params.gas_refund.cost() {
            let result = host
                .rewards_mut()
                .track_gas(self.pool.address(), &ctx.caller, cost);
            rewards::report("track_gas", result);
        }

        Ok(id)
    }

    /// Settle position `id` at its expiration round. Anyone may call.
    pub fn complete(
        &mut self,
        host: &mut dyn Host,
        ctx: &CallContext,
        id: usize,
    ) -> Result<Settlement, OptionError> {
        let position = self
            .positions
            .get(id)
            .ok_or(OptionError::UnknownPosition(id))?;
        if position.evaluated() {
            return Err(OptionError::AlreadyEvaluated(id));
        }
        let (latest, _) = host.oracle().latest(self.pool.asset())?;
        if latest < position.expiration_round {
            return Err(OptionError::NotExpired {
                expiration: position.expiration_round,
                latest,
            });
        }
        let price = host
            .oracle()
            .price_at(self.pool.asset(), position.expiration_round)?;

        let outcome = decide(position.side, position.strike_price, price);
        let payouts = waterfall(
            position.reward,
            outcome,
            self.params.protocol_fee_bps,
            self.params.settler_fee_bps,
            ctx.caller == position.beneficiary,
        )?;
        let reward = position.reward;
        let side = position.side;
        let beneficiary = position.beneficiary.clone();
        if reward > self.pool.locked() {
            return Err(crate::pool::PoolError::UnlockExceedsLocked {
                amount: reward,
                locked: self.pool.locked(),
            }
            .into());
        }

        // Terminal state is recorded before any value leaves the pool
        self.positions[id].state = PositionState::Evaluated(outcome);
        self.pool.unlock(host, reward)?;
        match side {
            Side::Call => self.open_calls -= reward,
            Side::Put => self.open_puts -= reward,
        }

        let asset = self.pool.asset().clone();
        let pool_address = self.pool.address().clone();
        let treasury = self.pool.params().treasury.clone();
        for (to, value) in [
            (&treasury, payouts.protocol_fee),
            (&ctx.caller, payouts.settler_fee),
            (&beneficiary, payouts.beneficiary),
        ] {
            if value > 0 {
                host.ledger_mut().transfer(&asset, &pool_address, to, value)?;
            }
        }

        tracing::info!(
            pool = %pool_address,
            id,
            outcome = outcome.as_str(),
            price = %price,
            settler = %ctx.caller,
            protocol_fee = %payouts.protocol_fee,
            settler_fee = %payouts.settler_fee,
            payout = %payouts.beneficiary,
            "Position settled"
        );
        metrics::counter!(telemetry::OPTIONS_SETTLED, "outcome" => outcome.as_str())
            .increment(1);
        self.record_utilization(host);
        host.emit(match outcome {
            Outcome::Exercised => Event::Exercised {
                pool: pool_address,
                id,
            },
            Outcome::Expired => Event::Expired {
                pool: pool_address,
                id,
            },
        });

        Ok(Settlement {
            id,
            outcome,
            price,
            settler: ctx.caller.clone(),
            protocol_fee: payouts.protocol_fee,
            settler_fee: payouts.settler_fee,
            beneficiary_payout: payouts.beneficiary,
            retained: payouts.retained,
        })
    }

    fn authorize(&self, cap: &GovernanceCap) -> Result<(), OptionError> {
        if cap.authorizes(self.factory) {
            Ok(())
        } else {
            Err(OptionError::AccessDenied)
        }
    }

    fn parameter_changed(&self, host: &mut dyn Host, name: &str, old: String, new: String) {
        tracing::info!(pool = %self.address(), name, %old, %new, "Parameter changed");
        host.emit(Event::ParameterChanged {
            pool: self.address().clone(),
            name: name.to_string(),
            old,
            new,
        });
    }

    pub fn set_rounds(
        &mut self,
        host: &mut dyn Host,
        cap: &GovernanceCap,
        min: Round,
        max: Round,
    ) -> Result<(), OptionError> {
        self.authorize(cap)?;
        validate_rounds(min, max)?;
        let old = (self.params.min_rounds, self.params.max_rounds);
        self.params.min_rounds = min;
        self.params.max_rounds = max;
        self.parameter_changed(host, "min_rounds", old.0.to_string(), min.to_string());
        self.parameter_changed(host, "max_rounds", old.1.to_string(), max.to_string());
        Ok(())
    }

    pub fn set_settler_fee(
        &mut self,
        host: &mut dyn Host,
        cap: &GovernanceCap,
        bps: Bps,
    ) -> Result<(), OptionError> {
        self.authorize(cap)?;
        validate_fee("settler_fee_bps", bps)?;
        let old = std::mem::replace(&mut self.params.settler_fee_bps, bps);
        self.parameter_changed(host, "settler_fee_bps", old.to_string(), bps.to_string());
        Ok(())
    }

    pub fn set_protocol_fee(
        &mut self,
        host: &mut dyn Host,
        cap: &GovernanceCap,
        bps: Bps,
    ) -> Result<(), OptionError> {
        self.authorize(cap)?;
        validate_fee("protocol_fee_bps", bps)?;
        let old = std::mem::replace(&mut self.params.protocol_fee_bps, bps);
        self.parameter_changed(host, "protocol_fee_bps", old.to_string(), bps.to_string());
        Ok(())
    }

    pub fn set_gas_refund(
        &mut self,
        host: &mut dyn Host,
        cap: &GovernanceCap,
        enabled: bool,
    ) -> Result<(), OptionError> {
        self.authorize(cap)?;
        let old = std::mem::replace(&mut self.params.gas_refund.enabled, enabled);
        self.parameter_changed(host, "gas_refund", old.to_string(), enabled.to_string());
        Ok(())
    }

    /// Swap the payout strategy. Open positions keep their locked reward.
    pub fn set_calculator(
        &mut self,
        host: &mut dyn Host,
        cap: &GovernanceCap,
        calculator: Box<dyn RateCalculator>,
    ) -> Result<(), OptionError> {
        self.authorize(cap)?;
        calculator.limits().validate()?;
        let old = std::mem::replace(&mut self.calculator, calculator);
        tracing::info!(
            pool = %self.address(),
            old = old.name(),
            new = self.calculator.name(),
            "Rate calculator changed"
        );
        host.emit(Event::CalculatorChanged {
            pool: self.address().clone(),
            old: old.name().to_string(),
            new: self.calculator.name().to_string(),
        });
        Ok(())
    }

    pub fn set_status(
        &mut self,
        host: &mut dyn Host,
        cap: &GovernanceCap,
        status: PoolStatus,
    ) -> Result<(), OptionError> {
        self.authorize(cap)?;
        let old = self.pool.set_status(status);
        tracing::info!(pool = %self.address(), ?old, new = ?status, "Pool status changed");
        host.emit(Event::StatusChanged {
            pool: self.address().clone(),
            old,
            new: status,
        });
        Ok(())
    }

    /// Block new options
    pub fn deactivate(&mut self, host: &mut dyn Host, cap: &GovernanceCap) -> Result<(), OptionError> {
        self.set_status(host, cap, PoolStatus::Inactive)
    }

    /// Block new options and deposits
    pub fn freeze(&mut self, host: &mut dyn Host, cap: &GovernanceCap) -> Result<(), OptionError> {
        self.set_status(host, cap, PoolStatus::Frozen)
    }

    fn record_utilization(&self, host: &dyn Host) {
        let snapshot = self.pool.snapshot(host);
        let utilization: f64 = snapshot.utilization.try_into().unwrap_or(0.0);
        metrics::gauge!(telemetry::UTILIZATION, "pool" => self.address().to_string()).set(utilization);
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Call => "call",
        Side::Put => "put",
    }
}
