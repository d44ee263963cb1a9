use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod participant {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ParticipantView {
        pub id: Uuid,
        pub name: String,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitStatus {
        #[default]
        Pending,
        Paid,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub payer_id: Uuid,
        /// Must be > 0.
        pub amount_minor: i64,
        /// Opaque currency code, e.g. `EUR`.
        pub currency: String,
        pub description: Option<String>,
    }

    /// One row of the expense splits table.
    ///
    /// Splits are listed separately from expenses; an expense with no rows
    /// here is shared equally.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseSplitView {
        pub expense_id: Uuid,
        pub participant_id: Uuid,
        pub share_minor: i64,
        #[serde(default)]
        pub status: SplitStatus,
    }
}

pub mod repayment {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RepaymentView {
        pub id: Uuid,
        /// Expense the repayment was recorded against, if any.
        pub expense_id: Option<Uuid>,
        pub paid_by: Uuid,
        pub paid_to: Uuid,
        /// Must be > 0.
        pub amount_minor: i64,
        /// `YYYY-MM-DD`.
        pub date: NaiveDate,
    }
}

pub mod snapshot {
    use super::*;
    use crate::{
        expense::{ExpenseSplitView, ExpenseView},
        participant::ParticipantView,
        repayment::RepaymentView,
    };

    /// Everything the expense-tracking layer lists for one trip.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TripSnapshot {
        /// Reporting currency. Expenses in other currencies are rejected.
        pub currency: String,
        pub participants: Vec<ParticipantView>,
        #[serde(default)]
        pub expenses: Vec<ExpenseView>,
        #[serde(default)]
        pub splits: Vec<ExpenseSplitView>,
        #[serde(default)]
        pub repayments: Vec<RepaymentView>,
    }
}

pub mod balance {
    use super::*;

    /// Amount owed to or by one counterpart.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DebtView {
        pub participant_id: Uuid,
        pub name: Option<String>,
        pub amount_minor: i64,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BalanceView {
        pub participant_id: Uuid,
        pub name: String,
        pub total_paid_minor: i64,
        pub total_owed_minor: i64,
        /// Positive: others owe this participant.
        pub net_balance_minor: i64,
        pub owes_to_others: Vec<DebtView>,
        pub owed_by_others: Vec<DebtView>,
    }

    impl BalanceView {
        pub fn is_settled(&self) -> bool {
            self.owes_to_others.is_empty() && self.owed_by_others.is_empty()
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Severity {
        /// The record was left out of the totals.
        Rejected,
        /// The record was (partially) skipped.
        Warning,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DiagnosticView {
        pub severity: Severity,
        /// `expense`, `repayment` or `participant`.
        pub record_kind: Option<String>,
        pub record_id: Option<Uuid>,
        pub message: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ReportView {
        pub currency: String,
        pub balances: Vec<BalanceView>,
        pub diagnostics: Vec<DiagnosticView>,
    }
}
