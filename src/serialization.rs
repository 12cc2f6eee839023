//! serializable dashboard views over the ledger
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::ledger::LoanLedger;
use crate::loan::Loan;
use crate::types::{LoanId, LoanStatus};

/// serializable view of one loan
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub item_name: String,
    pub status: LoanStatus,
    pub locked: bool,
    pub interest_rate: Rate,
    pub native: BalanceView,
    pub usd: BalanceView,
    pub schedule: ScheduleView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceView {
    pub total: Money,
    pub paid: Money,
    pub remaining: Money,
    /// what the next installment would move, none once completed
    pub next_installment: Option<Money>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleView {
    pub installments: u32,
    pub paid_installments: u32,
    pub progress_pct: Decimal,
    pub originated_at: DateTime<Utc>,
    pub last_payment_at: Option<DateTime<Utc>>,
    pub next_payment: Option<NaiveDate>,
}

impl LoanView {
    pub fn from_loan(loan: &Loan) -> Self {
        let next = loan.next_installment();

        LoanView {
            id: loan.id,
            item_name: loan.item_name.clone(),
            status: loan.status,
            locked: loan.locked,
            interest_rate: loan.interest_rate,
            native: BalanceView {
                total: loan.total,
                paid: loan.paid,
                remaining: loan.remaining,
                next_installment: next.map(|n| n.native),
            },
            usd: BalanceView {
                total: loan.total_usd,
                paid: loan.paid_usd,
                remaining: loan.remaining_usd,
                next_installment: next.map(|n| n.usd),
            },
            schedule: ScheduleView {
                installments: loan.installments,
                paid_installments: loan.paid_installments,
                progress_pct: loan.progress_pct(),
                originated_at: loan.originated_at,
                last_payment_at: loan.last_payment_at,
                next_payment: loan.next_payment.map(|d| d.date_naive()),
            },
        }
    }
}

/// totals shown above the loan list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LedgerSummary {
    pub active_loans: usize,
    pub completed_loans: usize,
    pub locked_items: usize,
    pub outstanding: Money,
    pub outstanding_usd: Money,
    pub paid_usd: Money,
}

impl LedgerSummary {
    pub fn from_loans(loans: &[Loan]) -> Self {
        loans.iter().fold(LedgerSummary::default(), |mut acc, loan| {
            if loan.is_active() {
                acc.active_loans += 1;
            } else {
                acc.completed_loans += 1;
            }
            if loan.locked {
                acc.locked_items += 1;
            }
            acc.outstanding += loan.remaining;
            acc.outstanding_usd += loan.remaining_usd;
            acc.paid_usd += loan.paid_usd;
            acc
        })
    }
}

/// whole-ledger view
#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerView {
    pub summary: LedgerSummary,
    pub loans: Vec<LoanView>,
}

impl LedgerView {
    pub fn from_ledger(ledger: &LoanLedger) -> Self {
        LedgerView {
            summary: LedgerSummary::from_loans(ledger.list_loans()),
            loans: ledger.list_loans().iter().map(LoanView::from_loan).collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
