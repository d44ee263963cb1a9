//! Repayment reconciliation.
//!
//! Repayments reduce the pairwise debt from `paid_by` to `paid_to`, never
//! below zero. They are summed per pair before being applied, so the result
//! (warnings included) does not depend on the order repayments arrive in.
//! A repayment that would push its pair's sum past `i64` is rejected.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, PairwiseDebts, RecordRef, ReferenceRole, Rejection, Repayment,
    Roster, Warning,
};

/// Result of [`reconcile`].
#[derive(Clone, Debug, Default)]
pub struct Reconciled {
    pub debts: PairwiseDebts,
    pub rejections: Vec<Rejection>,
    pub warnings: Vec<Warning>,
}

/// Applies `repayments` to `debts`.
pub fn reconcile(
    debts: PairwiseDebts,
    repayments: &[Repayment],
    roster: &Roster<'_>,
) -> Reconciled {
    let mut out = Reconciled {
        debts,
        ..Reconciled::default()
    };
    let mut per_pair: BTreeMap<(Uuid, Uuid), MoneyCents> = BTreeMap::new();

    for repayment in repayments {
        let record = RecordRef::Repayment(repayment.id);

        if let Err(error) = validate_repayment(repayment) {
            tracing::warn!(%record, %error, "repayment rejected");
            out.rejections.push(Rejection { record, error });
            continue;
        }

        let mut dangling = false;
        for (participant_id, role) in [
            (repayment.paid_by, ReferenceRole::RepaymentSender),
            (repayment.paid_to, ReferenceRole::RepaymentRecipient),
        ] {
            if !roster.contains(participant_id) {
                tracing::warn!(%record, %participant_id, "unknown participant, repayment skipped");
                out.warnings.push(Warning::DanglingReference {
                    record,
                    participant_id,
                    role,
                });
                dangling = true;
            }
        }
        if dangling {
            continue;
        }

        let pair = per_pair
            .entry((repayment.paid_by, repayment.paid_to))
            .or_default();
        match pair.checked_add(repayment.amount) {
            Some(sum) => *pair = sum,
            None => {
                let error = EngineError::InvalidAmount(format!(
                    "repayments from {} to {} overflow",
                    repayment.paid_by, repayment.paid_to
                ));
                tracing::warn!(%record, %error, "repayment rejected");
                out.rejections.push(Rejection { record, error });
            }
        }
    }

    for ((debtor, creditor), amount) in per_pair {
        let excess = out.debts.settle(debtor, creditor, amount);
        if excess.is_positive() {
            tracing::debug!(%debtor, %creditor, %excess, "overpayment dropped");
            out.warnings.push(Warning::Overpayment {
                debtor,
                creditor,
                excess,
            });
        }
    }

    out
}

fn validate_repayment(repayment: &Repayment) -> Result<(), EngineError> {
    if !repayment.amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "repayment amount must be > 0, got {}",
            repayment.amount
        )));
    }
    if repayment.paid_by == repayment.paid_to {
        return Err(EngineError::SelfRepayment(repayment.paid_by));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Participant;

    const P1: Uuid = Uuid::from_u128(1);
    const P2: Uuid = Uuid::from_u128(2);
    const GONE: Uuid = Uuid::from_u128(99);

    fn repayment(id: u128, from: Uuid, to: Uuid, cents: i64) -> Repayment {
        Repayment {
            id: Uuid::from_u128(id),
            expense_id: None,
            paid_by: from,
            paid_to: to,
            amount: MoneyCents::new(cents),
            date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap_or_default(),
        }
    }

    fn run(debt: i64, repayments: &[Repayment]) -> Reconciled {
        let participants = vec![Participant::new(P1, "Ada"), Participant::new(P2, "Bo")];
        let mut warnings = Vec::new();
        let roster = Roster::new(&participants, &mut warnings);
        let mut debts = PairwiseDebts::new();
        debts.add(P2, P1, MoneyCents::new(debt));
        reconcile(debts, repayments, &roster)
    }

    #[test]
    fn partial_repayment_reduces_debt() {
        let out = run(5000, &[repayment(1, P2, P1, 2000)]);
        assert_eq!(out.debts.get(P2, P1), MoneyCents::new(3000));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn overpayment_floors_and_warns() {
        let out = run(3000, &[repayment(1, P2, P1, 5000)]);
        assert_eq!(out.debts.get(P2, P1), MoneyCents::ZERO);
        assert_eq!(out.debts.get(P1, P2), MoneyCents::ZERO);
        assert_eq!(
            out.warnings,
            vec![Warning::Overpayment {
                debtor: P2,
                creditor: P1,
                excess: MoneyCents::new(2000),
            }]
        );
    }

    #[test]
    fn repayment_in_the_wrong_direction_does_not_create_credit() {
        let out = run(3000, &[repayment(1, P1, P2, 1000)]);
        assert_eq!(out.debts.get(P2, P1), MoneyCents::new(3000));
        assert_eq!(out.debts.get(P1, P2), MoneyCents::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn order_does_not_matter() {
        let a = repayment(1, P2, P1, 2500);
        let b = repayment(2, P2, P1, 1500);
        let c = repayment(3, P2, P1, 400);
        let forward = run(4000, &[a.clone(), b.clone(), c.clone()]);
        let backward = run(4000, &[c, b, a]);
        assert_eq!(forward.debts, backward.debts);
        assert_eq!(forward.warnings, backward.warnings);
    }

    #[test]
    fn invalid_repayments_are_rejected() {
        let out = run(3000, &[repayment(1, P2, P1, 0), repayment(2, P1, P1, 100)]);
        assert_eq!(out.rejections.len(), 2);
        assert!(matches!(out.rejections[0].error, EngineError::InvalidAmount(_)));
        assert_eq!(out.rejections[1].error, EngineError::SelfRepayment(P1));
        assert_eq!(out.debts.get(P2, P1), MoneyCents::new(3000));
    }

    #[test]
    fn overflowing_pair_sum_rejects_the_repayment() {
        let half = i64::MAX / 2 + 1;
        let out = run(3000, &[repayment(1, P2, P1, half), repayment(2, P2, P1, half)]);

        assert_eq!(out.rejections.len(), 1);
        assert_eq!(out.rejections[0].record, RecordRef::Repayment(Uuid::from_u128(2)));
        assert!(matches!(out.rejections[0].error, EngineError::InvalidAmount(_)));
        assert_eq!(out.debts.get(P2, P1), MoneyCents::ZERO);
        assert_eq!(
            out.warnings,
            vec![Warning::Overpayment {
                debtor: P2,
                creditor: P1,
                excess: MoneyCents::new(half - 3000),
            }]
        );
    }

    #[test]
    fn dangling_repayment_is_skipped() {
        let out = run(3000, &[repayment(1, GONE, P1, 1000)]);
        assert_eq!(out.debts.get(P2, P1), MoneyCents::new(3000));
        assert_eq!(
            out.warnings,
            vec![Warning::DanglingReference {
                record: RecordRef::Repayment(Uuid::from_u128(1)),
                participant_id: GONE,
                role: ReferenceRole::RepaymentSender,
            }]
        );
    }
}
