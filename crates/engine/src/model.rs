//! Input records consumed by the engine.
//!
//! These are plain snapshots of data owned by the expense-tracking layer.
//! The engine only reads them; every call to
//! [`compute_balances`](crate::compute_balances) starts from scratch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, MoneyCents};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
}

impl Participant {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Bookkeeping flag shown by the UI. Balance math ignores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStatus {
    #[default]
    Pending,
    Paid,
}

/// One participant's share of an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    pub participant_id: Uuid,
    pub share: MoneyCents,
    #[serde(default)]
    pub status: SplitStatus,
}

impl ExpenseSplit {
    pub fn new(participant_id: Uuid, share: MoneyCents) -> Self {
        Self {
            participant_id,
            share,
            status: SplitStatus::Pending,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub payer_id: Uuid,
    pub amount: MoneyCents,
    pub currency: Currency,
    /// Explicit shares. `None` means "split equally", following the
    /// configured [`DefaultSplitPolicy`](crate::DefaultSplitPolicy).
    #[serde(default)]
    pub splits: Option<Vec<ExpenseSplit>>,
}

impl Expense {
    /// An expense without explicit splits.
    pub fn new(id: Uuid, payer_id: Uuid, amount: MoneyCents, currency: Currency) -> Self {
        Self {
            id,
            payer_id,
            amount,
            currency,
            splits: None,
        }
    }

    #[must_use]
    pub fn with_splits(mut self, splits: Vec<ExpenseSplit>) -> Self {
        self.splits = Some(splits);
        self
    }
}

/// Money moved from `paid_by` to `paid_to` to settle part of a debt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repayment {
    pub id: Uuid,
    /// Expense the repayment was recorded against. Audit only.
    #[serde(default)]
    pub expense_id: Option<Uuid>,
    pub paid_by: Uuid,
    pub paid_to: Uuid,
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

/// Everything one computation needs, already filtered to one currency.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub currency: Currency,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub repayments: Vec<Repayment>,
}
