use thiserror::Error;

use crate::decimal::Money;
use crate::types::{CatalogItemId, LoanId};

#[derive(Error, Debug)]
pub enum BnplError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid price: {price}")]
    InvalidPrice {
        price: Money,
    },

    #[error("quote does not match item price and plan")]
    QuoteMismatch,

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("loan already completed: {id}")]
    LoanAlreadyCompleted {
        id: LoanId,
    },

    #[error("invalid state: {message}")]
    InvalidState {
        message: String,
    },

    #[error("duplicate catalog item: {id}")]
    DuplicateCatalogItem {
        id: CatalogItemId,
    },

    #[error("catalog item not found: {id}")]
    CatalogItemNotFound {
        id: CatalogItemId,
    },

    #[error("ledger unavailable: a writer panicked while holding the lock")]
    LedgerUnavailable,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BnplError>;
