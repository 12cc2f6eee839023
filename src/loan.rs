use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogItem;
use crate::config::PlanConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{BnplError, Result};
use crate::plan::PlanQuote;
use crate::types::{DualAmount, LoanId, LoanStatus, PaymentInterval};

/// one buy-now-pay-later loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    // identification
    pub id: LoanId,
    pub item_name: String,

    // balances, native token units
    pub total: Money,
    pub paid: Money,
    pub remaining: Money,

    // balances, fiat units
    pub total_usd: Money,
    pub paid_usd: Money,
    pub remaining_usd: Money,

    // schedule
    pub installments: u32,
    pub paid_installments: u32,
    pub next_payment: Option<DateTime<Utc>>,
    pub originated_at: DateTime<Utc>,
    pub last_payment_at: Option<DateTime<Utc>>,

    // status
    pub status: LoanStatus,
    /// item held in escrow until the last installment clears
    pub locked: bool,
    /// quoted for display only, never charged
    pub interest_rate: Rate,
}

/// what a single installment moved from remaining to paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentApplied {
    pub installment_number: u32,
    pub amount: DualAmount,
    pub completed: bool,
}

impl Loan {
    /// open a loan from a confirmed quote
    ///
    /// The down payment counts as already paid in both units. The caller is
    /// responsible for having validated `config` and `quote`; a native price
    /// too large to take a percentage of is rejected as an invalid price.
    pub fn originate(
        item: &CatalogItem,
        config: &PlanConfig,
        quote: &PlanQuote,
        now: DateTime<Utc>,
        interval: PaymentInterval,
    ) -> Result<Self> {
        let down_payment = item
            .price
            .percentage(config.down_payment_pct)
            .ok_or(BnplError::InvalidPrice { price: item.price })?;

        Ok(Self {
            id: Uuid::new_v4(),
            item_name: item.name.clone(),
            total: item.price,
            paid: down_payment,
            remaining: item.price - down_payment,
            total_usd: item.price_usd,
            paid_usd: quote.down_payment_amount,
            remaining_usd: quote.remaining_amount,
            installments: config.installments,
            paid_installments: 0,
            next_payment: Some(now + interval.duration()),
            originated_at: now,
            last_payment_at: None,
            status: LoanStatus::Active,
            locked: true,
            interest_rate: config.interest_rate(),
        })
    }

    /// fixed per-installment amounts: the original totals split evenly
    pub fn installment_amounts(&self) -> DualAmount {
        DualAmount::new(
            self.total.split(self.installments),
            self.total_usd.split(self.installments),
        )
    }

    /// amounts the next payment would actually move, if any
    pub fn next_installment(&self) -> Option<DualAmount> {
        if !self.is_active() {
            return None;
        }
        let last = self.paid_installments + 1 >= self.installments;
        let step = self.installment_amounts();
        Some(if last {
            DualAmount::new(self.remaining, self.remaining_usd)
        } else {
            DualAmount::new(step.native.min(self.remaining), step.usd.min(self.remaining_usd))
        })
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_completed(&self) -> bool {
        self.status == LoanStatus::Completed
    }

    pub fn remaining_installments(&self) -> u32 {
        self.installments.saturating_sub(self.paid_installments)
    }

    /// share of installments paid, 0-100
    pub fn progress_pct(&self) -> Decimal {
        if self.installments == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.paid_installments) * Decimal::from(100) / Decimal::from(self.installments)).round_dp(2)
    }

    /// return the loan as it stands after one more installment
    ///
    /// Never mutates `self`; callers swap the returned record in whole.
    /// The final installment settles whatever is left so both balances land
    /// on exactly zero.
    pub fn with_installment_paid(
        &self,
        now: DateTime<Utc>,
        interval: PaymentInterval,
    ) -> Result<(Loan, InstallmentApplied)> {
        if !self.is_active() {
            return Err(BnplError::LoanAlreadyCompleted { id: self.id });
        }

        let moved = self.next_installment().unwrap_or_default();
        let mut next = self.clone();

        next.paid_installments += 1;
        next.paid += moved.native;
        next.paid_usd += moved.usd;
        next.remaining = next.remaining.saturating_sub(moved.native);
        next.remaining_usd = next.remaining_usd.saturating_sub(moved.usd);
        next.last_payment_at = Some(now);

        let completed = next.paid_installments >= next.installments;
        if completed {
            next.status = LoanStatus::Completed;
            next.locked = false;
            next.next_payment = None;
        } else {
            next.next_payment = Some(now + interval.duration());
        }

        let applied = InstallmentApplied {
            installment_number: next.paid_installments,
            amount: moved,
            completed,
        };

        Ok((next, applied))
    }

    /// check the record invariants, used on loans supplied from outside
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(BnplError::InvalidState { message });

        if self.installments == 0 {
            return fail(format!("loan {} has no installments", self.id));
        }
        if self.paid_installments > self.installments {
            return fail(format!(
                "loan {} paid {} of {} installments",
                self.id, self.paid_installments, self.installments
            ));
        }
        for amount in [self.paid, self.remaining, self.paid_usd, self.remaining_usd] {
            if amount.is_negative() {
                return fail(format!("loan {} has a negative balance", self.id));
            }
        }
        if self.paid + self.remaining != self.total || self.paid_usd + self.remaining_usd != self.total_usd {
            return fail(format!("loan {} paid and remaining do not add up to total", self.id));
        }

        let completed = self.paid_installments >= self.installments;
        if completed != self.is_completed() || completed == self.locked {
            return fail(format!(
                "loan {} status {:?} and lock {} disagree with {}/{} installments",
                self.id, self.status, self.locked, self.paid_installments, self.installments
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::types::Rarity;

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn sword() -> CatalogItem {
        CatalogItem::new(1, "Legendary Dragon Sword", "Fantasy Quest", money("2.5"), money("312.5"), Rarity::Legendary)
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap()
    }

    fn open_loan() -> Loan {
        let config = PlanConfig::default();
        let quote = crate::plan::quote(sword().price_usd, &config).unwrap();
        Loan::originate(&sword(), &config, &quote, start(), PaymentInterval::Monthly).unwrap()
    }

    #[test]
    fn test_originate_counts_down_payment_as_paid() {
        let loan = open_loan();

        assert_eq!(loan.paid, money("0.625"));
        assert_eq!(loan.remaining, money("1.875"));
        assert_eq!(loan.paid_usd, money("78.125"));
        assert_eq!(loan.remaining_usd, money("234.375"));
        assert_eq!(loan.paid_installments, 0);
        assert_eq!(loan.status, LoanStatus::Active);
        assert!(loan.locked);
        assert_eq!(loan.next_payment, Some(Utc.with_ymd_and_hms(2025, 12, 1, 12, 0, 0).unwrap()));
        assert!(loan.validate().is_ok());
    }

    #[test]
    fn test_installment_amounts_split_original_total() {
        let loan = open_loan();
        let step = loan.installment_amounts();
        assert_eq!(step.native, money("0.625"));
        assert_eq!(step.usd, money("78.125"));
    }

    #[test]
    fn test_with_installment_paid_leaves_original_untouched() {
        let loan = open_loan();
        let before = loan.clone();

        let (next, applied) = loan.with_installment_paid(start(), PaymentInterval::Monthly).unwrap();

        assert_eq!(loan, before);
        assert_eq!(next.paid_installments, 1);
        assert_eq!(next.paid, money("1.25"));
        assert_eq!(next.remaining, money("1.25"));
        assert_eq!(applied.installment_number, 1);
        assert!(!applied.completed);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_completed_loan_rejects_payment() {
        let mut loan = open_loan();
        for _ in 0..4 {
            loan = loan.with_installment_paid(start(), PaymentInterval::Monthly).unwrap().0;
        }

        assert!(loan.is_completed());
        assert!(!loan.locked);
        assert!(loan.next_payment.is_none());
        assert!(loan.next_installment().is_none());
        assert!(matches!(
            loan.with_installment_paid(start(), PaymentInterval::Monthly),
            Err(BnplError::LoanAlreadyCompleted { .. })
        ));
    }

    #[test]
    fn test_final_installment_absorbs_rounding() {
        let item = CatalogItem::new(9, "Racing Car NFT", "Speed Legends", money("1"), money("100"), Rarity::Rare);
        let config = PlanConfig::new(3, 10, 0);
        let quote = crate::plan::quote(item.price_usd, &config).unwrap();
        let mut loan = Loan::originate(&item, &config, &quote, start(), PaymentInterval::Weekly).unwrap();

        for _ in 0..3 {
            loan = loan.with_installment_paid(start(), PaymentInterval::Weekly).unwrap().0;
            assert!(loan.validate().is_ok());
        }

        assert!(loan.remaining.is_zero());
        assert!(loan.remaining_usd.is_zero());
        assert_eq!(loan.paid, loan.total);
        assert_eq!(loan.paid_usd, loan.total_usd);
    }

    #[test]
    fn test_progress() {
        let mut loan = open_loan();
        assert_eq!(loan.progress_pct(), Decimal::ZERO);
        loan = loan.with_installment_paid(start(), PaymentInterval::Monthly).unwrap().0;
        assert_eq!(loan.progress_pct(), Decimal::from(25));
        assert_eq!(loan.remaining_installments(), 3);
    }

    #[test]
    fn test_validate_catches_broken_records() {
        let mut loan = open_loan();
        loan.locked = false;
        assert!(matches!(loan.validate(), Err(BnplError::InvalidState { .. })));

        let mut loan = open_loan();
        loan.paid = money("1");
        assert!(loan.validate().is_err());

        let mut loan = open_loan();
        loan.paid_installments = 5;
        assert!(loan.validate().is_err());

        let mut loan = open_loan();
        loan.installments = 0;
        assert!(loan.validate().is_err());
    }

    #[test]
    fn test_originate_rejects_unrepresentable_native_price() {
        let item = CatalogItem::new(
            9,
            "Racing Car NFT",
            "Speed Legends",
            money("10000000000000000000000000000"),
            money("100"),
            Rarity::Rare,
        );
        let config = PlanConfig::default();
        let quote = crate::plan::quote(item.price_usd, &config).unwrap();

        assert!(matches!(
            Loan::originate(&item, &config, &quote, start(), PaymentInterval::Monthly),
            Err(BnplError::InvalidPrice { .. })
        ));
    }
}
