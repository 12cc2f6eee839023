use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// identifier of a catalog item
pub type CatalogItemId = u64;

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// installments outstanding, item held in escrow
    Active,
    /// every installment paid, item released
    Completed,
}

impl LoanStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, LoanStatus::Active)
    }
}

/// item rarity tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

/// spacing between installment due dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentInterval {
    Weekly,
    BiWeekly,
    /// fixed 30-day period, not a calendar month
    #[default]
    Monthly,
}

impl PaymentInterval {
    pub fn days(&self) -> i64 {
        match self {
            PaymentInterval::Weekly => 7,
            PaymentInterval::BiWeekly => 14,
            PaymentInterval::Monthly => 30,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::days(self.days())
    }
}

/// amount expressed in both unit systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DualAmount {
    /// native token units
    pub native: Money,
    /// fiat reference units (USD)
    pub usd: Money,
}

impl DualAmount {
    pub fn new(native: Money, usd: Money) -> Self {
        Self { native, usd }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_interval_days() {
        assert_eq!(PaymentInterval::default(), PaymentInterval::Monthly);
        assert_eq!(PaymentInterval::Monthly.duration(), Duration::days(30));
        assert_eq!(PaymentInterval::BiWeekly.days(), 14);
        assert_eq!(PaymentInterval::Weekly.days(), 7);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Mythic > Rarity::Legendary);
        assert!(Rarity::Common < Rarity::Rare);
    }
}
