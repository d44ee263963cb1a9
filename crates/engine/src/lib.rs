//! Expense splitting and debt settlement engine.
//!
//! Given a trip's participants, shared expenses and repayments, the engine
//! computes what everybody paid, what they owe, their net balance and the
//! outstanding pairwise debts. The pipeline is a pure function:
//!
//! split calculator → ledger aggregation → repayment reconciliation → report
//!
//! Nothing is cached between calls. Callers recompute from the full snapshot
//! whenever an expense or repayment changes, which keeps the conservation
//! invariant (net balances sum to zero) trivially true after every edit.
//!
//! Bad records never abort a computation: they come back as per-record
//! [`Rejection`]s and [`Warning`]s next to a best-effort report built from
//! the valid records.

use uuid::Uuid;

pub use config::{DefaultSplitPolicy, EngineConfig};
pub use currency::Currency;
pub use debts::PairwiseDebts;
pub use diagnostics::{RecordRef, ReferenceRole, Rejection, Warning};
pub use error::{EngineError, ResultEngine};
pub use ledger::{Aggregate, Roster, Totals, aggregate, expand_expense};
pub use model::{Expense, ExpenseSplit, Participant, Repayment, Snapshot, SplitStatus};
pub use money::MoneyCents;
pub use reconcile::{Reconciled, reconcile};
pub use report::{ParticipantBalance, report};
pub use split::{SplitMode, compute_splits};

mod config;
mod currency;
mod debts;
mod diagnostics;
mod error;
mod ledger;
mod model;
mod money;
mod reconcile;
mod report;
mod split;

/// Everything a caller needs after one computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceReport {
    pub currency: Currency,
    /// One row per participant, in snapshot order.
    pub balances: Vec<ParticipantBalance>,
    pub warnings: Vec<Warning>,
    /// Records left out of the totals. Surface these before trusting them.
    pub rejections: Vec<Rejection>,
}

impl BalanceReport {
    /// `true` when no record was rejected or degraded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.rejections.is_empty()
    }

    /// Sum of all net balances. Zero whenever no line was dropped as dangling.
    ///
    /// Summed in `i128`: partial sums may leave the `i64` range even when the
    /// total does not. Saturates if the total itself does not fit.
    pub fn total_net(&self) -> MoneyCents {
        let total: i128 = self
            .balances
            .iter()
            .map(|balance| i128::from(balance.net_balance.cents()))
            .sum();
        let clamped = total.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        MoneyCents::new(i64::try_from(clamped).unwrap_or_default())
    }

    pub fn balance(&self, participant_id: Uuid) -> Option<&ParticipantBalance> {
        self.balances
            .iter()
            .find(|balance| balance.participant_id == participant_id)
    }
}

/// Runs the whole pipeline over `snapshot`.
///
/// ```rust
/// use engine::{Currency, EngineConfig, Expense, MoneyCents, Participant, Snapshot, compute_balances};
/// use uuid::Uuid;
///
/// let (ada, bo) = (Uuid::from_u128(1), Uuid::from_u128(2));
/// let snapshot = Snapshot {
///     currency: Currency::default(),
///     participants: vec![Participant::new(ada, "Ada"), Participant::new(bo, "Bo")],
///     expenses: vec![Expense::new(Uuid::from_u128(10), ada, MoneyCents::new(100_00), Currency::default())],
///     repayments: vec![],
/// };
///
/// let report = compute_balances(&snapshot, &EngineConfig::default());
/// assert_eq!(report.balance(bo).unwrap().owes_to_others[&ada], MoneyCents::new(50_00));
/// assert_eq!(report.total_net(), MoneyCents::ZERO);
/// ```
pub fn compute_balances(snapshot: &Snapshot, config: &EngineConfig) -> BalanceReport {
    let mut warnings = Vec::new();
    let roster = Roster::new(&snapshot.participants, &mut warnings);

    let aggregated = aggregate(&snapshot.expenses, &roster, &snapshot.currency, config);
    let reconciled = reconcile(aggregated.debts, &snapshot.repayments, &roster);
    let balances = report(&roster, &aggregated.totals, &reconciled.debts);

    warnings.extend(aggregated.warnings);
    warnings.extend(reconciled.warnings);
    let mut rejections = aggregated.rejections;
    rejections.extend(reconciled.rejections);

    tracing::debug!(
        participants = roster.len(),
        expenses = snapshot.expenses.len(),
        repayments = snapshot.repayments.len(),
        warnings = warnings.len(),
        rejections = rejections.len(),
        "balances computed"
    );

    BalanceReport {
        currency: snapshot.currency.clone(),
        balances,
        warnings,
        rejections,
    }
}
