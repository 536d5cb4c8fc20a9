use std::fmt;

use serde::{Deserialize, Serialize};

/// Amount of reward tokens, counted in indivisible base units
#[derive(
    Clone, Copy, Debug, Deserialize, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize,
)]
pub struct Tokens(u64);

impl Tokens {
    /// No tokens
    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Whether this amount is zero
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Retrieve the base units value within.
    #[inline]
    pub fn base_units(self) -> u64 {
        self.0
    }

    /// Add two amounts, returning `None` if the result does not fit
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtract two amounts, returning `None` if the result would be negative
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Pretty print as whole tokens, using `decimals` base-10 places for the fractional part.
    pub fn format_units(self, decimals: u8) -> String {
        let digits = self.0.to_string();
        let decimals = usize::from(decimals);
        if decimals == 0 {
            return digits;
        }

        let padded = format!("{:0>width$}", digits, width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);

        format!("{}.{}", whole, fraction)
    }
}

impl From<u64> for Tokens {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl From<Tokens> for u64 {
    fn from(tokens: Tokens) -> Self {
        tokens.0
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_format_units() {
        assert_eq!(Tokens::from(0).format_units(3), "0.000");
        assert_eq!(Tokens::from(1).format_units(3), "0.001");
        assert_eq!(Tokens::from(1_000).format_units(3), "1.000");
        assert_eq!(Tokens::from(21_234).format_units(3), "21.234");
        assert_eq!(Tokens::from(21_234).format_units(0), "21234");
        assert_eq!(
            Tokens::from(10_000_000_000_000_000_000).format_units(18),
            "10.000000000000000000"
        );
    }

    #[test]
    fn tokens_checked_arithmetic() {
        assert_eq!(
            Tokens::from(u64::MAX).checked_add(Tokens::from(1)),
            None
        );
        assert_eq!(Tokens::from(1).checked_sub(Tokens::from(2)), None);
        assert_eq!(
            Tokens::from(5).checked_sub(Tokens::from(2)),
            Some(Tokens::from(3))
        );
    }

    #[test]
    fn tokens_zero() {
        assert!(Tokens::zero().is_zero());
        assert_eq!(Tokens::zero(), Tokens::default());
        assert!(!Tokens::from(1).is_zero());
    }
}
