//! Per-record diagnostics collected while computing balances.
//!
//! A [`Rejection`] means the record was dropped from the computation and the
//! caller should surface it before trusting the totals. A [`Warning`] means
//! the record (or one of its lines) was degraded but the rest of it still
//! counted.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// Identifies the input record a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RecordRef {
    Expense(Uuid),
    Repayment(Uuid),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Expense(id) => write!(f, "expense {id}"),
            RecordRef::Repayment(id) => write!(f, "repayment {id}"),
        }
    }
}

/// Which field of a record held the unknown participant id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRole {
    Payer,
    SplitParticipant,
    RepaymentSender,
    RepaymentRecipient,
}

impl ReferenceRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payer => "payer",
            Self::SplitParticipant => "split participant",
            Self::RepaymentSender => "repayment sender",
            Self::RepaymentRecipient => "repayment recipient",
        }
    }
}

/// A record rejected at validation; it contributes nothing to the totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub record: RecordRef,
    pub error: EngineError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.error)
    }
}

/// Non-fatal findings. The computation still covers everything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Warning {
    /// A record names a participant outside the current set; the affected
    /// line (or the whole record, for payers and repayments) is skipped.
    DanglingReference {
        record: RecordRef,
        participant_id: Uuid,
        role: ReferenceRole,
    },
    /// Repayments from `debtor` to `creditor` exceeded the outstanding debt.
    /// The debt floors at zero and `excess` is not carried forward.
    Overpayment {
        debtor: Uuid,
        creditor: Uuid,
        excess: MoneyCents,
    },
    /// The participant list contained the same id more than once.
    DuplicateParticipant { participant_id: Uuid },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DanglingReference {
                record,
                participant_id,
                role,
            } => write!(
                f,
                "{record}: unknown {} {participant_id}",
                role.as_str()
            ),
            Warning::Overpayment {
                debtor,
                creditor,
                excess,
            } => write!(
                f,
                "repayments from {debtor} to {creditor} exceed the debt by {excess}"
            ),
            Warning::DuplicateParticipant { participant_id } => {
                write!(f, "participant {participant_id} listed more than once")
            }
        }
    }
}
