//! Mapping between wire records and engine types.

use std::collections::HashMap;

use api_types::{
    balance::{BalanceView, DebtView, DiagnosticView, ReportView, Severity},
    expense::SplitStatus as WireSplitStatus,
    snapshot::TripSnapshot,
};
use engine::{
    BalanceReport, Currency, EngineConfig, EngineError, Expense, ExpenseSplit, MoneyCents,
    Participant, RecordRef, Rejection, Repayment, Snapshot, SplitStatus, Warning,
    compute_balances,
};
use uuid::Uuid;

/// Engine input built from wire records, plus the records that could not be
/// converted.
#[derive(Debug)]
pub struct Converted {
    pub snapshot: Snapshot,
    pub rejections: Vec<Rejection>,
}

/// Builds the engine snapshot, attaching each split row to its expense.
///
/// Split rows naming an unknown expense are logged and ignored. An expense
/// with a malformed currency code is rejected on its own; only a malformed
/// snapshot currency fails the conversion.
pub fn snapshot_from_wire(trip: TripSnapshot) -> Result<Converted, EngineError> {
    let currency = Currency::try_from(trip.currency.as_str())?;

    let mut splits: HashMap<Uuid, Vec<ExpenseSplit>> = HashMap::new();
    for row in trip.splits {
        splits.entry(row.expense_id).or_default().push(ExpenseSplit {
            participant_id: row.participant_id,
            share: MoneyCents::new(row.share_minor),
            status: match row.status {
                WireSplitStatus::Pending => SplitStatus::Pending,
                WireSplitStatus::Paid => SplitStatus::Paid,
            },
        });
    }

    let mut expenses = Vec::with_capacity(trip.expenses.len());
    let mut rejections = Vec::new();
    for view in trip.expenses {
        let rows = splits.remove(&view.id);
        let expense_currency = match Currency::try_from(view.currency.as_str()) {
            Ok(code) => code,
            Err(error) => {
                let record = RecordRef::Expense(view.id);
                tracing::warn!(%record, %error, "expense rejected");
                rejections.push(Rejection { record, error });
                continue;
            }
        };
        expenses.push(Expense {
            id: view.id,
            payer_id: view.payer_id,
            amount: MoneyCents::new(view.amount_minor),
            currency: expense_currency,
            splits: rows,
        });
    }

    for (expense_id, rows) in &splits {
        tracing::warn!(%expense_id, rows = rows.len(), "split rows for unknown expense ignored");
    }

    let snapshot = Snapshot {
        currency,
        participants: trip
            .participants
            .into_iter()
            .map(|p| Participant::new(p.id, p.name))
            .collect(),
        expenses,
        repayments: trip
            .repayments
            .into_iter()
            .map(|r| Repayment {
                id: r.id,
                expense_id: r.expense_id,
                paid_by: r.paid_by,
                paid_to: r.paid_to,
                amount: MoneyCents::new(r.amount_minor),
                date: r.date,
            })
            .collect(),
    };
    Ok(Converted {
        snapshot,
        rejections,
    })
}

/// Converts `trip` and runs the engine over it. Records rejected during
/// conversion are listed ahead of the engine's own rejections.
pub fn compute_trip(
    trip: TripSnapshot,
    config: &EngineConfig,
) -> Result<BalanceReport, EngineError> {
    let Converted {
        snapshot,
        mut rejections,
    } = snapshot_from_wire(trip)?;
    let mut report = compute_balances(&snapshot, config);
    rejections.append(&mut report.rejections);
    report.rejections = rejections;
    Ok(report)
}

/// Builds the presentation view: settled participants first, then by name.
pub fn report_view(report: &BalanceReport) -> ReportView {
    let names: HashMap<Uuid, &str> = report
        .balances
        .iter()
        .map(|b| (b.participant_id, b.name.as_str()))
        .collect();
    let debt = |(id, amount): (&Uuid, &MoneyCents)| DebtView {
        participant_id: *id,
        name: names.get(id).map(|name| name.to_string()),
        amount_minor: amount.cents(),
    };

    let mut balances: Vec<BalanceView> = report
        .balances
        .iter()
        .map(|b| BalanceView {
            participant_id: b.participant_id,
            name: b.name.clone(),
            total_paid_minor: b.total_paid.cents(),
            total_owed_minor: b.total_owed.cents(),
            net_balance_minor: b.net_balance.cents(),
            owes_to_others: b.owes_to_others.iter().map(debt).collect(),
            owed_by_others: b.owed_by_others.iter().map(debt).collect(),
        })
        .collect();
    balances.sort_by(|a, b| {
        b.is_settled()
            .cmp(&a.is_settled())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });

    let rejected = report.rejections.iter().map(|r| {
        let (kind, id) = record_parts(r.record);
        DiagnosticView {
            severity: Severity::Rejected,
            record_kind: Some(kind.to_string()),
            record_id: Some(id),
            message: r.error.to_string(),
        }
    });
    let warned = report.warnings.iter().map(|w| {
        let (record_kind, record_id) = match w {
            Warning::DanglingReference { record, .. } => {
                let (kind, id) = record_parts(*record);
                (Some(kind.to_string()), Some(id))
            }
            Warning::DuplicateParticipant { participant_id } => {
                (Some("participant".to_string()), Some(*participant_id))
            }
            Warning::Overpayment { .. } => (None, None),
        };
        DiagnosticView {
            severity: Severity::Warning,
            record_kind,
            record_id,
            message: w.to_string(),
        }
    });

    ReportView {
        currency: report.currency.to_string(),
        balances,
        diagnostics: rejected.chain(warned).collect(),
    }
}

fn record_parts(record: RecordRef) -> (&'static str, Uuid) {
    match record {
        RecordRef::Expense(id) => ("expense", id),
        RecordRef::Repayment(id) => ("repayment", id),
    }
}
