use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PlanConfig, PlanLimits};
use crate::decimal::Money;
use crate::errors::{BnplError, Result};

/// payment breakdown for one item under one plan, in fiat units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuote {
    pub down_payment_amount: Money,
    pub remaining_amount: Money,
    pub installment_amount: Money,
    pub total_with_interest: Money,
}

/// derives plan quotes, validating against a set of plan limits
#[derive(Debug, Clone, Default)]
pub struct PlanCalculator {
    limits: PlanLimits,
}

impl PlanCalculator {
    /// calculator bound to `limits`, which must themselves be sane
    pub fn new(limits: PlanLimits) -> Result<Self> {
        limits.check()?;
        Ok(Self { limits })
    }

    pub fn limits(&self) -> &PlanLimits {
        &self.limits
    }

    /// quote a plan for the given fiat price
    ///
    /// Interest only shows up in `total_with_interest`; it is simple, not
    /// compounded, and never folded into the installment amount.
    pub fn quote(&self, fiat_price: Money, config: &PlanConfig) -> Result<PlanQuote> {
        if fiat_price.is_negative() {
            return Err(BnplError::InvalidPrice { price: fiat_price });
        }
        self.limits.validate(config)?;

        let too_large = || BnplError::InvalidPrice { price: fiat_price };
        let down_payment_amount = fiat_price
            .percentage(config.down_payment_pct)
            .ok_or_else(too_large)?;
        let remaining_amount = fiat_price - down_payment_amount;
        let installment_amount = remaining_amount / Decimal::from(config.installments);
        let total_with_interest = fiat_price
            .checked_mul(config.interest_rate().growth_factor())
            .ok_or_else(too_large)?;

        tracing::debug!(
            %fiat_price,
            installments = config.installments,
            down_payment_pct = config.down_payment_pct,
            %installment_amount,
            "plan quoted"
        );

        Ok(PlanQuote {
            down_payment_amount,
            remaining_amount,
            installment_amount,
            total_with_interest,
        })
    }

    /// quote every supported installment count for the same down payment and rate
    pub fn quote_all(&self, fiat_price: Money, config: &PlanConfig) -> Result<Vec<(u32, PlanQuote)>> {
        self.limits
            .supported_installments
            .iter()
            .map(|&n| {
                let plan = config.with_installments(n);
                self.quote(fiat_price, &plan).map(|q| (n, q))
            })
            .collect()
    }
}

/// quote against the default plan limits
pub fn quote(fiat_price: Money, config: &PlanConfig) -> Result<PlanQuote> {
    PlanCalculator::default().quote(fiat_price, config)
}
