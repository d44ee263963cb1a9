//! Split calculator.
//!
//! Turns an expense amount and a list of participants into per-participant
//! owed shares that always add up to the amount exactly.

use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine};

/// How an amount is divided between participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitMode<'a> {
    /// Same share for everyone; the rounding remainder goes to the first
    /// participant in input order.
    Equal,
    /// Caller-supplied shares, positionally matched to the participants.
    Custom(&'a [MoneyCents]),
}

/// Computes the owed share of each participant.
///
/// Custom shares must sum to `amount` within `tolerance`; a residual inside
/// the tolerance is folded back into the shares (first participant first) so
/// the returned lines always sum to `amount`.
///
/// ```rust
/// use engine::{MoneyCents, SplitMode, compute_splits};
/// use uuid::Uuid;
///
/// let people = [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)];
/// let lines = compute_splits(MoneyCents::new(100_00), &people, SplitMode::Equal, MoneyCents::ZERO)
///     .unwrap();
/// let shares: Vec<i64> = lines.iter().map(|(_, share)| share.cents()).collect();
/// assert_eq!(shares, vec![33_34, 33_33, 33_33]);
/// ```
pub fn compute_splits(
    amount: MoneyCents,
    participant_ids: &[Uuid],
    mode: SplitMode<'_>,
    tolerance: MoneyCents,
) -> ResultEngine<Vec<(Uuid, MoneyCents)>> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be > 0, got {amount}"
        )));
    }
    if participant_ids.is_empty() {
        return Err(EngineError::NoParticipants);
    }

    let shares = match mode {
        SplitMode::Equal => equal_shares(amount, participant_ids.len()),
        SplitMode::Custom(shares) => {
            custom_shares(amount, participant_ids.len(), shares, tolerance)?
        }
    };

    Ok(participant_ids.iter().copied().zip(shares).collect())
}

fn equal_shares(amount: MoneyCents, count: usize) -> Vec<MoneyCents> {
    let count_i64 = count as i64;
    let base = amount.cents() / count_i64;
    let remainder = amount.cents() - base * count_i64;

    let mut shares = vec![MoneyCents::new(base); count];
    shares[0] += MoneyCents::new(remainder);
    shares
}

fn custom_shares(
    amount: MoneyCents,
    participants: usize,
    shares: &[MoneyCents],
    tolerance: MoneyCents,
) -> ResultEngine<Vec<MoneyCents>> {
    if shares.len() != participants {
        return Err(EngineError::ShareCountMismatch {
            participants,
            shares: shares.len(),
        });
    }
    if let Some(negative) = shares.iter().find(|share| share.is_negative()) {
        return Err(EngineError::InvalidAmount(format!(
            "share must be >= 0, got {negative}"
        )));
    }

    let actual = shares
        .iter()
        .try_fold(MoneyCents::ZERO, |acc, share| acc.checked_add(*share))
        .ok_or_else(|| EngineError::InvalidAmount("shares too large".to_string()))?;
    let residual = amount - actual;
    if residual.abs() > tolerance {
        return Err(EngineError::SplitMismatch {
            expected: amount,
            actual,
        });
    }

    let mut adjusted = shares.to_vec();
    absorb_residual(&mut adjusted, residual);
    Ok(adjusted)
}

/// Folds a small residual into the shares so they sum to the target.
///
/// Positive residuals go to the first share. Negative ones are taken from the
/// shares in order, never pushing a share below zero.
fn absorb_residual(shares: &mut [MoneyCents], residual: MoneyCents) {
    if residual.is_positive() {
        shares[0] += residual;
        return;
    }

    let mut left = -residual;
    for share in shares.iter_mut() {
        if left.is_zero() {
            break;
        }
        let (reduced, unabsorbed) = share.saturating_floor_sub(left);
        *share = reduced;
        left = unabsorbed;
    }
}
