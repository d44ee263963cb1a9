use std::collections::BTreeMap;

use uuid::Uuid;

use crate::MoneyCents;

/// Who owes whom: `(debtor, creditor) -> amount`.
///
/// Entries are never negative. A `BTreeMap` keeps iteration order stable so
/// identical inputs always produce identical output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairwiseDebts {
    entries: BTreeMap<(Uuid, Uuid), MoneyCents>,
}

impl PairwiseDebts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount `debtor` owes `creditor` (zero when absent).
    pub fn get(&self, debtor: Uuid, creditor: Uuid) -> MoneyCents {
        self.entries
            .get(&(debtor, creditor))
            .copied()
            .unwrap_or(MoneyCents::ZERO)
    }

    /// Adds `amount` to what `debtor` owes `creditor`. Self-debts and
    /// non-positive amounts are ignored.
    ///
    /// A pair's debt never exceeds the debtor's owed total, so callers only
    /// need to overflow-check that total.
    pub fn add(&mut self, debtor: Uuid, creditor: Uuid, amount: MoneyCents) {
        if debtor == creditor || !amount.is_positive() {
            return;
        }
        *self.entries.entry((debtor, creditor)).or_default() += amount;
    }

    /// Reduces the debt by `amount`, flooring at zero.
    ///
    /// Returns the part of `amount` that exceeded the outstanding debt.
    pub fn settle(&mut self, debtor: Uuid, creditor: Uuid, amount: MoneyCents) -> MoneyCents {
        let current = self.get(debtor, creditor);
        let (remaining, excess) = current.saturating_floor_sub(amount);
        if remaining.is_zero() {
            self.entries.remove(&(debtor, creditor));
        } else {
            self.entries.insert((debtor, creditor), remaining);
        }
        excess
    }

    /// Creditors of `debtor` with a positive outstanding amount.
    pub fn owed_by(&self, debtor: Uuid) -> impl Iterator<Item = (Uuid, MoneyCents)> + '_ {
        self.iter()
            .filter(move |(d, _, _)| *d == debtor)
            .map(|(_, creditor, amount)| (creditor, amount))
    }

    /// Debtors of `creditor` with a positive outstanding amount.
    pub fn owed_to(&self, creditor: Uuid) -> impl Iterator<Item = (Uuid, MoneyCents)> + '_ {
        self.iter()
            .filter(move |(_, c, _)| *c == creditor)
            .map(|(debtor, _, amount)| (debtor, amount))
    }

    /// `(debtor, creditor, amount)` for every positive entry.
    pub fn iter(&self) -> impl Iterator<Item = (Uuid, Uuid, MoneyCents)> + '_ {
        self.entries
            .iter()
            .filter(|(_, amount)| amount.is_positive())
            .map(|((debtor, creditor), amount)| (*debtor, *creditor, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
