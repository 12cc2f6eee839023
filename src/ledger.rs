use std::collections::HashSet;

use hourglass_rs::SafeTimeProvider;

use crate::catalog::CatalogItem;
use crate::config::{LedgerConfig, PlanConfig};
use crate::errors::{BnplError, Result};
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::plan::{PlanCalculator, PlanQuote};
use crate::types::{LoanId, LoanStatus};

/// owner of every loan and the only place loans change
///
/// Loans are kept in insertion order and never removed; a completed loan
/// stays on record.
#[derive(Debug)]
pub struct LoanLedger {
    loans: Vec<Loan>,
    config: LedgerConfig,
    calculator: PlanCalculator,
    pub events: EventStore,
}

impl Default for LoanLedger {
    fn default() -> Self {
        Self {
            loans: Vec::new(),
            calculator: PlanCalculator::default(),
            config: LedgerConfig::default(),
            events: EventStore::new(),
        }
    }
}

impl LoanLedger {
    /// empty ledger with default limits and a 30-day payment interval
    pub fn new() -> Self {
        Self::default()
    }

    /// ledger opened with the given settings and seed loans
    pub fn with_config(mut config: LedgerConfig) -> Result<Self> {
        let calculator = PlanCalculator::new(config.plan_limits.clone())?;
        let seeds = std::mem::take(&mut config.seed_loans);

        let mut ids = HashSet::new();
        for loan in &seeds {
            if let Err(e) = loan.validate() {
                tracing::warn!(loan_id = %loan.id, error = %e, "rejecting seed loan");
                return Err(e);
            }
            if !ids.insert(loan.id) {
                return Err(BnplError::InvalidState {
                    message: format!("seed loan {} appears twice", loan.id),
                });
            }
        }

        tracing::debug!(seeded = seeds.len(), "ledger opened");

        Ok(Self {
            loans: seeds,
            calculator,
            config,
            events: EventStore::new(),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// calculator sharing this ledger's plan limits
    pub fn calculator(&self) -> &PlanCalculator {
        &self.calculator
    }

    /// quote a plan for a catalog item under this ledger's limits
    pub fn quote(&self, item: &CatalogItem, config: &PlanConfig) -> Result<PlanQuote> {
        self.calculator.quote(item.price_usd, config)
    }

    /// open a new loan from a confirmed quote
    ///
    /// The plan is validated again and the quote must be the one this item
    /// and plan produce; a stale quote from an earlier slider position is
    /// rejected rather than booked.
    pub fn originate(
        &mut self,
        item: &CatalogItem,
        config: &PlanConfig,
        quote: &PlanQuote,
        time_provider: &SafeTimeProvider,
    ) -> Result<Loan> {
        item.validate()?;
        let expected = self.quote(item, config)?;
        if expected != *quote {
            return Err(BnplError::QuoteMismatch);
        }

        let now = time_provider.now();
        let interval = self.config.payment_interval;
        let loan = Loan::originate(item, config, quote, now, interval)?;

        self.events.emit(Event::LoanOriginated {
            loan_id: loan.id,
            item_name: loan.item_name.clone(),
            total: loan.total,
            total_usd: loan.total_usd,
            down_payment: loan.paid,
            down_payment_usd: loan.paid_usd,
            installments: loan.installments,
            interest_rate: loan.interest_rate,
            timestamp: now,
        });
        self.emit_schedule(&loan);

        tracing::info!(
            loan_id = %loan.id,
            item = %loan.item_name,
            total_usd = %loan.total_usd,
            installments = loan.installments,
            "loan originated"
        );

        self.loans.push(loan.clone());
        Ok(loan)
    }

    /// pay installment with system time
    pub fn pay_installment_now(&mut self, loan_id: LoanId) -> Result<Loan> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.pay_installment(loan_id, &time)
    }

    /// apply one installment to a loan
    ///
    /// An unknown id or an already completed loan is reported as an error and
    /// leaves every loan exactly as it was.
    pub fn pay_installment(&mut self, loan_id: LoanId, time_provider: &SafeTimeProvider) -> Result<Loan> {
        let index = match self.loans.iter().position(|l| l.id == loan_id) {
            Some(index) => index,
            None => {
                tracing::warn!(%loan_id, "payment rejected: loan not found");
                return Err(BnplError::LoanNotFound { id: loan_id });
            }
        };

        let now = time_provider.now();
        let (updated, applied) = match self.loans[index].with_installment_paid(now, self.config.payment_interval) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(%loan_id, error = %e, "payment rejected");
                return Err(e);
            }
        };

        self.events.emit(Event::InstallmentPaid {
            loan_id,
            installment_number: applied.installment_number,
            amount: applied.amount.native,
            amount_usd: applied.amount.usd,
            remaining: updated.remaining,
            remaining_usd: updated.remaining_usd,
            timestamp: now,
        });

        tracing::debug!(
            %loan_id,
            installment = applied.installment_number,
            of = updated.installments,
            remaining_usd = %updated.remaining_usd,
            "installment applied"
        );

        if applied.completed {
            self.events.emit(Event::StatusChanged {
                loan_id,
                old_status: LoanStatus::Active,
                new_status: LoanStatus::Completed,
                reason: format!("{} of {} installments paid", updated.paid_installments, updated.installments),
                timestamp: now,
            });
            self.events.emit(Event::LoanCompleted {
                loan_id,
                total_paid: updated.paid,
                total_paid_usd: updated.paid_usd,
                timestamp: now,
            });
            self.events.emit(Event::CollateralReleased {
                loan_id,
                item_name: updated.item_name.clone(),
                timestamp: now,
            });

            tracing::info!(%loan_id, item = %updated.item_name, "loan completed, item unlocked");
        } else {
            self.emit_schedule(&updated);
        }

        self.loans[index] = updated.clone();
        Ok(updated)
    }

    fn emit_schedule(&mut self, loan: &Loan) {
        if let (Some(due), Some(next)) = (loan.next_payment, loan.next_installment()) {
            self.events.emit(Event::PaymentScheduled {
                loan_id: loan.id,
                installment_number: loan.paid_installments + 1,
                amount: next.native,
                amount_usd: next.usd,
                due_date: due.date_naive(),
            });
        }
    }

    /// every loan in insertion order
    pub fn list_loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn get(&self, loan_id: LoanId) -> Result<&Loan> {
        self.loans
            .iter()
            .find(|l| l.id == loan_id)
            .ok_or(BnplError::LoanNotFound { id: loan_id })
    }

    pub fn active_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|l| l.is_active())
    }

    pub fn completed_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|l| l.is_completed())
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// get events
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// dashboard json for the whole ledger
    pub fn to_json_pretty(&self) -> Result<String> {
        let view = crate::serialization::LedgerView::from_ledger(self);
        Ok(view.to_json_pretty()?)
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty().unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}
