//! Ledger aggregation.
//!
//! Validates each expense, expands it into split lines and folds those into
//! per-participant paid/owed totals plus the pairwise debt matrix (before
//! repayments).
//!
//! - Invalid expenses are rejected one by one (see [`Rejection`]).
//! - Lines naming a participant outside the roster are skipped with a
//!   [`Warning::DanglingReference`].

use std::collections::{BTreeMap, HashSet};

use uuid::Uuid;

use crate::{
    Currency, DefaultSplitPolicy, EngineConfig, EngineError, Expense, MoneyCents, PairwiseDebts,
    Participant, RecordRef, ReferenceRole, Rejection, ResultEngine, SplitMode, Warning,
    compute_splits,
};

/// The closed set of participants for one computation, in input order.
#[derive(Clone, Debug, Default)]
pub struct Roster<'a> {
    members: Vec<&'a Participant>,
    ids: HashSet<Uuid>,
}

impl<'a> Roster<'a> {
    /// Builds the roster, keeping the first occurrence of duplicated ids.
    pub fn new(participants: &'a [Participant], warnings: &mut Vec<Warning>) -> Self {
        let mut roster = Self::default();
        for participant in participants {
            if roster.ids.insert(participant.id) {
                roster.members.push(participant);
            } else {
                tracing::warn!(participant_id = %participant.id, "duplicate participant");
                warnings.push(Warning::DuplicateParticipant {
                    participant_id: participant.id,
                });
            }
        }
        roster
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn members(&self) -> &[&'a Participant] {
        &self.members
    }

    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.members.iter().map(|participant| participant.id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Paid and owed totals of one participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub paid: MoneyCents,
    pub owed: MoneyCents,
}

impl Totals {
    pub fn net(&self) -> MoneyCents {
        self.paid - self.owed
    }
}

/// Output of [`aggregate`]. Discarded once the report is built.
#[derive(Clone, Debug, Default)]
pub struct Aggregate {
    /// One entry per roster member, zero when inactive.
    pub totals: BTreeMap<Uuid, Totals>,
    pub debts: PairwiseDebts,
    pub rejections: Vec<Rejection>,
    pub warnings: Vec<Warning>,
}

/// Checks an expense and expands it into `(participant, share)` lines.
///
/// Explicit splits must sum to the amount within the configured tolerance.
/// Without splits the expense is shared equally according to
/// [`EngineConfig::default_split`].
pub fn expand_expense(
    expense: &Expense,
    roster: &Roster<'_>,
    currency: &Currency,
    config: &EngineConfig,
) -> ResultEngine<Vec<(Uuid, MoneyCents)>> {
    if &expense.currency != currency {
        return Err(EngineError::CurrencyMismatch {
            expected: currency.clone(),
            found: expense.currency.clone(),
        });
    }
    if !expense.amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "expense amount must be > 0, got {}",
            expense.amount
        )));
    }

    match &expense.splits {
        Some(splits) => {
            let ids: Vec<Uuid> = splits.iter().map(|split| split.participant_id).collect();
            let shares: Vec<MoneyCents> = splits.iter().map(|split| split.share).collect();
            compute_splits(
                expense.amount,
                &ids,
                SplitMode::Custom(&shares),
                config.tolerance(),
            )
        }
        None => {
            let ids = default_sharers(expense.payer_id, roster, config.default_split);
            compute_splits(expense.amount, &ids, SplitMode::Equal, config.tolerance())
        }
    }
}

fn default_sharers(payer: Uuid, roster: &Roster<'_>, policy: DefaultSplitPolicy) -> Vec<Uuid> {
    match policy {
        DefaultSplitPolicy::AllParticipants => roster.ids().collect(),
        DefaultSplitPolicy::ExcludePayer => {
            let others: Vec<Uuid> = roster.ids().filter(|id| *id != payer).collect();
            if others.is_empty() {
                vec![payer]
            } else {
                others
            }
        }
    }
}

/// Folds every valid expense into totals and pairwise debts.
pub fn aggregate(
    expenses: &[Expense],
    roster: &Roster<'_>,
    currency: &Currency,
    config: &EngineConfig,
) -> Aggregate {
    let mut out = Aggregate {
        totals: roster.ids().map(|id| (id, Totals::default())).collect(),
        ..Aggregate::default()
    };

    for expense in expenses {
        let record = RecordRef::Expense(expense.id);

        let lines = match expand_expense(expense, roster, currency, config) {
            Ok(lines) => lines,
            Err(error) => {
                tracing::warn!(%record, %error, "expense rejected");
                out.rejections.push(Rejection { record, error });
                continue;
            }
        };

        if !roster.contains(expense.payer_id) {
            tracing::warn!(%record, payer = %expense.payer_id, "unknown payer, expense skipped");
            out.warnings.push(Warning::DanglingReference {
                record,
                participant_id: expense.payer_id,
                role: ReferenceRole::Payer,
            });
            continue;
        }

        if let Err(error) = post_expense(&mut out, record, expense, lines) {
            tracing::warn!(%record, %error, "expense rejected");
            out.rejections.push(Rejection { record, error });
        }
    }

    out
}

/// Books one expense. Totals are staged first and committed only when every
/// running sum fits, so an overflowing expense leaves `out` untouched.
fn post_expense(
    out: &mut Aggregate,
    record: RecordRef,
    expense: &Expense,
    lines: Vec<(Uuid, MoneyCents)>,
) -> ResultEngine<()> {
    let overflow = || EngineError::InvalidAmount(format!("totals overflow when adding {record}"));

    let mut staged: BTreeMap<Uuid, Totals> = BTreeMap::new();
    let payer = out.totals.get(&expense.payer_id).copied().unwrap_or_default();
    let paid = payer.paid.checked_add(expense.amount).ok_or_else(overflow)?;
    staged.insert(expense.payer_id, Totals { paid, ..payer });

    let mut booked = Vec::with_capacity(lines.len());
    let mut dangling = Vec::new();
    for (participant_id, share) in lines {
        let Some(current) = out.totals.get(&participant_id) else {
            dangling.push(participant_id);
            continue;
        };
        let totals = staged.entry(participant_id).or_insert(*current);
        totals.owed = totals.owed.checked_add(share).ok_or_else(overflow)?;
        booked.push((participant_id, share));
    }

    for participant_id in dangling {
        tracing::warn!(%record, %participant_id, "unknown split participant, line skipped");
        out.warnings.push(Warning::DanglingReference {
            record,
            participant_id,
            role: ReferenceRole::SplitParticipant,
        });
    }
    out.totals.extend(staged);
    for (participant_id, share) in booked {
        out.debts.add(participant_id, expense.payer_id, share);
    }
    Ok(())
}
