//! The module contains the errors the engine can report.
//!
//! None of them aborts a computation: [`compute_balances`] attaches each
//! error to the record that caused it (see [`Rejection`]) and keeps going
//! with the remaining valid records. The split calculator returns them
//! directly to callers that build splits on their own.
//!
//!  [`compute_balances`]: crate::compute_balances
//!  [`Rejection`]: crate::Rejection
use thiserror::Error;
use uuid::Uuid;

use crate::{Currency, MoneyCents};

/// Engine custom errors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid currency: \"{0}\"")]
    InvalidCurrency(String),
    #[error("No participants to split between")]
    NoParticipants,
    #[error("Got {shares} custom shares for {participants} participants")]
    ShareCountMismatch { participants: usize, shares: usize },
    #[error("Split shares sum to {actual}, expected {expected}")]
    SplitMismatch {
        expected: MoneyCents,
        actual: MoneyCents,
    },
    #[error("Currency mismatch: expected {expected}, got {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },
    #[error("Repayment from {0} to themselves")]
    SelfRepayment(Uuid),
}

pub type ResultEngine<T> = Result<T, EngineError>;
