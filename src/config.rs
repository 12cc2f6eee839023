use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{BnplError, Result};
use crate::loan::Loan;
use crate::types::PaymentInterval;

/// installment plan chosen by the buyer
///
/// Percentages are whole numbers (25 means 25%) and only become fractions
/// inside the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub installments: u32,
    pub down_payment_pct: u32,
    pub interest_rate_pct: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            installments: 4,
            down_payment_pct: 25,
            interest_rate_pct: 0,
        }
    }
}

impl PlanConfig {
    pub fn new(installments: u32, down_payment_pct: u32, interest_rate_pct: u32) -> Self {
        Self {
            installments,
            down_payment_pct,
            interest_rate_pct,
        }
    }

    pub fn with_installments(mut self, installments: u32) -> Self {
        self.installments = installments;
        self
    }

    pub fn with_down_payment_pct(mut self, pct: u32) -> Self {
        self.down_payment_pct = pct;
        self
    }

    pub fn with_interest_rate_pct(mut self, pct: u32) -> Self {
        self.interest_rate_pct = pct;
        self
    }

    pub fn interest_rate(&self) -> Rate {
        Rate::from_percentage(self.interest_rate_pct)
    }
}

/// bounds a plan must satisfy before it is quoted or originated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub supported_installments: Vec<u32>,
    pub down_payment_pct: RangeInclusive<u32>,
    pub interest_rate_pct: RangeInclusive<u32>,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            supported_installments: vec![2, 3, 4, 6],
            down_payment_pct: 10..=50,
            interest_rate_pct: 0..=12,
        }
    }
}

impl PlanLimits {
    /// any installment count from 1 to `max`, with the default percentage bounds
    pub fn up_to(max_installments: u32) -> Self {
        Self {
            supported_installments: (1..=max_installments).collect(),
            ..Self::default()
        }
    }

    /// reject limits that could admit an unsound plan
    ///
    /// Percentages are whole numbers up to 100 and every supported count must
    /// be at least one installment.
    pub fn check(&self) -> Result<()> {
        if self.supported_installments.is_empty() {
            return Err(BnplError::InvalidConfiguration {
                message: "no supported installment counts".to_string(),
            });
        }

        if self.supported_installments.contains(&0) {
            return Err(BnplError::InvalidConfiguration {
                message: "supported installments must be at least 1".to_string(),
            });
        }

        for (name, range) in [
            ("down payment", &self.down_payment_pct),
            ("interest rate", &self.interest_rate_pct),
        ] {
            if range.start() > range.end() || *range.end() > 100 {
                return Err(BnplError::InvalidConfiguration {
                    message: format!("{} bounds {}..={} not within 0..=100", name, range.start(), range.end()),
                });
            }
        }

        Ok(())
    }

    /// reject a plan outside these limits
    pub fn validate(&self, config: &PlanConfig) -> Result<()> {
        if config.installments == 0 {
            return Err(BnplError::InvalidConfiguration {
                message: "installments must be at least 1".to_string(),
            });
        }

        if !self.supported_installments.contains(&config.installments) {
            return Err(BnplError::InvalidConfiguration {
                message: format!(
                    "{} installments not supported, expected one of {:?}",
                    config.installments, self.supported_installments
                ),
            });
        }

        if !self.down_payment_pct.contains(&config.down_payment_pct) {
            return Err(BnplError::InvalidConfiguration {
                message: format!(
                    "down payment {}% outside {}..={}",
                    config.down_payment_pct,
                    self.down_payment_pct.start(),
                    self.down_payment_pct.end()
                ),
            });
        }

        if !self.interest_rate_pct.contains(&config.interest_rate_pct) {
            return Err(BnplError::InvalidConfiguration {
                message: format!(
                    "interest rate {}% outside {}..={}",
                    config.interest_rate_pct,
                    self.interest_rate_pct.start(),
                    self.interest_rate_pct.end()
                ),
            });
        }

        Ok(())
    }
}

/// ledger construction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub plan_limits: PlanLimits,
    pub payment_interval: PaymentInterval,
    /// loans already on record when the ledger opens
    #[serde(default)]
    pub seed_loans: Vec<Loan>,
}

impl LedgerConfig {
    pub fn with_plan_limits(mut self, limits: PlanLimits) -> Self {
        self.plan_limits = limits;
        self
    }

    pub fn with_payment_interval(mut self, interval: PaymentInterval) -> Self {
        self.payment_interval = interval;
        self
    }

    pub fn with_seed_loans(mut self, loans: Vec<Loan>) -> Self {
        self.seed_loans = loans;
        self
    }

    /// parse settings, rejecting unsound plan limits
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.plan_limits.check()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_valid() {
        let limits = PlanLimits::default();
        assert!(limits.validate(&PlanConfig::default()).is_ok());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let limits = PlanLimits::default();
        assert!(limits.validate(&PlanConfig::new(2, 10, 0)).is_ok());
        assert!(limits.validate(&PlanConfig::new(6, 50, 12)).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let limits = PlanLimits::default();

        for config in [
            PlanConfig::default().with_installments(0),
            PlanConfig::default().with_installments(5),
            PlanConfig::default().with_installments(12),
            PlanConfig::default().with_down_payment_pct(9),
            PlanConfig::default().with_down_payment_pct(51),
            PlanConfig::default().with_interest_rate_pct(13),
        ] {
            let err = limits.validate(&config).unwrap_err();
            assert!(
                matches!(err, BnplError::InvalidConfiguration { .. }),
                "unexpected error for {:?}: {}",
                config,
                err
            );
        }
    }

    #[test]
    fn test_up_to_limits() {
        let limits = PlanLimits::up_to(12);
        assert!(limits.validate(&PlanConfig::default().with_installments(1)).is_ok());
        assert!(limits.validate(&PlanConfig::default().with_installments(5)).is_ok());
        assert!(limits.validate(&PlanConfig::default().with_installments(13)).is_err());
        assert!(limits.validate(&PlanConfig::default().with_installments(0)).is_err());
    }

    #[test]
    fn test_ledger_config_from_json() {
        let json = r#"{
            "plan_limits": {
                "supported_installments": [2, 3, 4, 5, 6],
                "down_payment_pct": { "start": 10, "end": 50 },
                "interest_rate_pct": { "start": 0, "end": 12 }
            },
            "payment_interval": "BiWeekly"
        }"#;

        let config = LedgerConfig::from_json(json).unwrap();
        assert_eq!(config.payment_interval, PaymentInterval::BiWeekly);
        assert!(config.seed_loans.is_empty());
        assert!(config
            .plan_limits
            .validate(&PlanConfig::default().with_installments(5))
            .is_ok());
    }

    #[test]
    fn test_check_rejects_unsound_limits() {
        assert!(PlanLimits::default().check().is_ok());
        assert!(PlanLimits::up_to(12).check().is_ok());

        for limits in [
            PlanLimits { supported_installments: vec![], ..PlanLimits::default() },
            PlanLimits { supported_installments: vec![0, 2], ..PlanLimits::default() },
            PlanLimits { down_payment_pct: 10..=150, ..PlanLimits::default() },
            PlanLimits { interest_rate_pct: 0..=101, ..PlanLimits::default() },
            PlanLimits { down_payment_pct: 50..=10, ..PlanLimits::default() },
        ] {
            assert!(
                matches!(limits.check(), Err(BnplError::InvalidConfiguration { .. })),
                "accepted {:?}",
                limits
            );
        }
    }

    #[test]
    fn test_ledger_config_from_json_rejects_bad_limits() {
        let json = r#"{
            "plan_limits": {
                "supported_installments": [2, 3, 4],
                "down_payment_pct": { "start": 10, "end": 150 },
                "interest_rate_pct": { "start": 0, "end": 12 }
            },
            "payment_interval": "Monthly"
        }"#;

        assert!(matches!(
            LedgerConfig::from_json(json),
            Err(BnplError::InvalidConfiguration { .. })
        ));
    }
}
