//! Balance reporting.
//!
//! Builds one [`ParticipantBalance`] per roster member, in roster order, from
//! the aggregated totals and the reconciled debts.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MoneyCents, PairwiseDebts, Roster, Totals};

/// Final per-participant view handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    pub participant_id: Uuid,
    pub name: String,
    pub total_paid: MoneyCents,
    pub total_owed: MoneyCents,
    /// `total_paid - total_owed`. Positive means others owe this participant.
    pub net_balance: MoneyCents,
    /// Outstanding debts of this participant, by creditor.
    pub owes_to_others: BTreeMap<Uuid, MoneyCents>,
    /// Outstanding debts towards this participant, by debtor.
    pub owed_by_others: BTreeMap<Uuid, MoneyCents>,
}

impl ParticipantBalance {
    /// No outstanding debt in either direction.
    pub fn is_settled(&self) -> bool {
        self.owes_to_others.is_empty() && self.owed_by_others.is_empty()
    }

    pub fn total_owes_to_others(&self) -> MoneyCents {
        self.owes_to_others.values().sum()
    }

    pub fn total_owed_by_others(&self) -> MoneyCents {
        self.owed_by_others.values().sum()
    }
}

/// Assembles the balances. Repayments only show up through `debts`: paid and
/// owed totals (and so the net balance) are left untouched by them.
pub fn report(
    roster: &Roster<'_>,
    totals: &BTreeMap<Uuid, Totals>,
    debts: &PairwiseDebts,
) -> Vec<ParticipantBalance> {
    let mut owes: HashMap<Uuid, BTreeMap<Uuid, MoneyCents>> = HashMap::new();
    let mut owed: HashMap<Uuid, BTreeMap<Uuid, MoneyCents>> = HashMap::new();
    for (debtor, creditor, amount) in debts.iter() {
        owes.entry(debtor).or_default().insert(creditor, amount);
        owed.entry(creditor).or_default().insert(debtor, amount);
    }

    roster
        .members()
        .iter()
        .map(|participant| {
            let id = participant.id;
            let totals = totals.get(&id).copied().unwrap_or_default();
            ParticipantBalance {
                participant_id: id,
                name: participant.name.clone(),
                total_paid: totals.paid,
                total_owed: totals.owed,
                net_balance: totals.net(),
                owes_to_others: owes.remove(&id).unwrap_or_default(),
                owed_by_others: owed.remove(&id).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Participant;

    const P1: Uuid = Uuid::from_u128(1);
    const P2: Uuid = Uuid::from_u128(2);
    const P3: Uuid = Uuid::from_u128(3);

    #[test]
    fn every_member_gets_a_row_in_roster_order() {
        let participants = vec![
            Participant::new(P3, "Cy"),
            Participant::new(P1, "Ada"),
            Participant::new(P2, "Bo"),
        ];
        let mut warnings = Vec::new();
        let roster = Roster::new(&participants, &mut warnings);

        let mut totals = BTreeMap::new();
        totals.insert(
            P1,
            Totals {
                paid: MoneyCents::new(6000),
                owed: MoneyCents::new(2000),
            },
        );
        totals.insert(
            P2,
            Totals {
                paid: MoneyCents::ZERO,
                owed: MoneyCents::new(4000),
            },
        );
        let mut debts = PairwiseDebts::new();
        debts.add(P2, P1, MoneyCents::new(4000));

        let rows = report(&roster, &totals, &debts);
        let order: Vec<Uuid> = rows.iter().map(|row| row.participant_id).collect();
        assert_eq!(order, vec![P3, P1, P2]);

        assert!(rows[0].is_settled());
        assert_eq!(rows[0].net_balance, MoneyCents::ZERO);

        assert_eq!(rows[1].net_balance, MoneyCents::new(4000));
        assert_eq!(rows[1].owed_by_others[&P2], MoneyCents::new(4000));
        assert_eq!(rows[1].total_owed_by_others(), MoneyCents::new(4000));

        assert_eq!(rows[2].net_balance, MoneyCents::new(-4000));
        assert_eq!(rows[2].owes_to_others[&P1], MoneyCents::new(4000));
        assert_eq!(rows[2].total_owes_to_others(), MoneyCents::new(4000));
    }
}
