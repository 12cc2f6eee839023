pub mod catalog;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod loan;
pub mod plan;
pub mod serialization;
pub mod shared;
pub mod types;

// re-export key types
pub use catalog::{Catalog, CatalogItem};
pub use config::{LedgerConfig, PlanConfig, PlanLimits};
pub use decimal::{Money, Rate};
pub use errors::{BnplError, Result};
pub use events::{Event, EventStore};
pub use ledger::LoanLedger;
pub use loan::{InstallmentApplied, Loan};
pub use plan::{quote, PlanCalculator, PlanQuote};
pub use serialization::{LedgerSummary, LedgerView, LoanView};
pub use shared::SharedLedger;
pub use types::{CatalogItemId, DualAmount, LoanId, LoanStatus, PaymentInterval, Rarity};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
