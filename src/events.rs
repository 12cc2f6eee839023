use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{LoanId, LoanStatus};

/// all events that can be emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    LoanOriginated {
        loan_id: LoanId,
        item_name: String,
        total: Money,
        total_usd: Money,
        down_payment: Money,
        down_payment_usd: Money,
        installments: u32,
        interest_rate: Rate,
        timestamp: DateTime<Utc>,
    },
    LoanCompleted {
        loan_id: LoanId,
        total_paid: Money,
        total_paid_usd: Money,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentScheduled {
        loan_id: LoanId,
        installment_number: u32,
        amount: Money,
        amount_usd: Money,
        due_date: NaiveDate,
    },
    InstallmentPaid {
        loan_id: LoanId,
        installment_number: u32,
        amount: Money,
        amount_usd: Money,
        remaining: Money,
        remaining_usd: Money,
        timestamp: DateTime<Utc>,
    },

    // escrow events
    CollateralReleased {
        loan_id: LoanId,
        item_name: String,
        timestamp: DateTime<Utc>,
    },

    // status change events
    StatusChanged {
        loan_id: LoanId,
        old_status: LoanStatus,
        new_status: LoanStatus,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn loan_id(&self) -> LoanId {
        match self {
            Event::LoanOriginated { loan_id, .. }
            | Event::LoanCompleted { loan_id, .. }
            | Event::PaymentScheduled { loan_id, .. }
            | Event::InstallmentPaid { loan_id, .. }
            | Event::CollateralReleased { loan_id, .. }
            | Event::StatusChanged { loan_id, .. } => *loan_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn for_loan(&self, loan_id: LoanId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.loan_id() == loan_id)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
