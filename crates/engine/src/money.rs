use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
};

use serde::{Deserialize, Serialize};

/// Signed money amount represented as **integer cents**.
///
/// Every amount handled by the engine (expense totals, split shares,
/// repayments, balances) uses this type, so sums are exact and the
/// conservation checks never depend on floating-point rounding.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(MoneyCents::new(i64::MAX).checked_add(amount), None);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Subtracts `rhs`, clamping the result at zero.
    ///
    /// Returns the clamped value and the part of `rhs` that could not be
    /// absorbed (zero unless `rhs > self`).
    #[must_use]
    pub fn saturating_floor_sub(self, rhs: MoneyCents) -> (MoneyCents, MoneyCents) {
        if rhs <= self {
            (self - rhs, MoneyCents::ZERO)
        } else {
            (MoneyCents::ZERO, rhs - self.max(MoneyCents::ZERO))
        }
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(10).to_string(), "0.10");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn checked_add_reports_overflow() {
        let big = MoneyCents::new(i64::MAX / 2 + 1);
        assert_eq!(big.checked_add(MoneyCents::new(1)), Some(MoneyCents::new(i64::MAX / 2 + 2)));
        assert_eq!(big.checked_add(big), None);
    }

    #[test]
    fn floor_sub_clamps_and_reports_excess() {
        let debt = MoneyCents::new(3000);
        assert_eq!(
            debt.saturating_floor_sub(MoneyCents::new(2000)),
            (MoneyCents::new(1000), MoneyCents::ZERO)
        );
        assert_eq!(
            debt.saturating_floor_sub(MoneyCents::new(5000)),
            (MoneyCents::ZERO, MoneyCents::new(2000))
        );
    }

    #[test]
    fn sums_borrowed_and_owned() {
        let shares = [MoneyCents::new(3334), MoneyCents::new(3333), MoneyCents::new(3333)];
        assert_eq!(shares.iter().sum::<MoneyCents>(), MoneyCents::new(10_000));
        assert_eq!(shares.into_iter().sum::<MoneyCents>(), MoneyCents::new(10_000));
    }
}
