use std::sync::{Arc, Mutex, MutexGuard};

use hourglass_rs::SafeTimeProvider;

use crate::catalog::CatalogItem;
use crate::config::PlanConfig;
use crate::errors::{BnplError, Result};
use crate::events::Event;
use crate::ledger::LoanLedger;
use crate::loan::Loan;
use crate::plan::PlanQuote;
use crate::types::LoanId;

/// thread-safe handle to a ledger for multi-client wrappers
///
/// Every mutation runs under one lock, so two concurrent payments on the
/// same loan are applied one after the other and each counts exactly once.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<LoanLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: LoanLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LoanLedger>> {
        self.inner.lock().map_err(|_| BnplError::LedgerUnavailable)
    }

    pub fn originate(
        &self,
        item: &CatalogItem,
        config: &PlanConfig,
        quote: &PlanQuote,
        time_provider: &SafeTimeProvider,
    ) -> Result<Loan> {
        self.lock()?.originate(item, config, quote, time_provider)
    }

    pub fn pay_installment(&self, loan_id: LoanId, time_provider: &SafeTimeProvider) -> Result<Loan> {
        self.lock()?.pay_installment(loan_id, time_provider)
    }

    /// snapshot of every loan in insertion order
    pub fn list_loans(&self) -> Result<Vec<Loan>> {
        Ok(self.lock()?.list_loans().to_vec())
    }

    pub fn get(&self, loan_id: LoanId) -> Result<Loan> {
        self.lock()?.get(loan_id).cloned()
    }

    pub fn take_events(&self) -> Result<Vec<Event>> {
        Ok(self.lock()?.take_events())
    }

    /// run a read-only closure against the ledger
    pub fn read<T>(&self, f: impl FnOnce(&LoanLedger) -> T) -> Result<T> {
        let guard = self.lock()?;
        Ok(f(&*guard))
    }
}

impl From<LoanLedger> for SharedLedger {
    fn from(ledger: LoanLedger) -> Self {
        Self::new(ledger)
    }
}
