use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

/// Money type with 8 decimal places, enough for lamport-style native token amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);
    /// smallest representable amount
    pub const EPSILON: Money = Money(Decimal::from_parts(1, 0, 0, false, 8));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(8)))
    }

    /// create from integer amount (dollars, whole tokens)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents, lamports)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        let d = Decimal::from(amount) / Decimal::from(10_u64.pow(scale));
        Money(d.round_dp(8))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly below zero; a negative zero is not negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// whole-number percentage of this amount (e.g. 25 -> 25%), none on overflow
    pub fn percentage(&self, pct: u32) -> Option<Self> {
        self.0
            .checked_mul(Decimal::from(pct))
            .and_then(|d| d.checked_div(Decimal::from(100)))
            .map(Money::from_decimal)
    }

    /// multiply by a factor, none on overflow
    pub fn checked_mul(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Money::from_decimal)
    }

    /// even share of this amount over `parts` pieces
    ///
    /// Returns zero for zero parts rather than dividing by zero.
    pub fn split(&self, parts: u32) -> Self {
        self.0
            .checked_div(Decimal::from(parts))
            .map(Money::from_decimal)
            .unwrap_or(Money::ZERO)
    }

    /// subtract, flooring the result at zero
    pub fn saturating_sub(self, other: Money) -> Money {
        (self - other).max(Money::ZERO)
    }

    /// true when both amounts differ by at most `tolerance`
    pub fn approx_eq(&self, other: Money, tolerance: Money) -> bool {
        (*self - other).abs() <= tolerance
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(8))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(8);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(8))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(8);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(8))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(8))
    }
}

/// rate type for plan interest and down-payment ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    /// simple (non-compounded) growth factor, `1 + rate`
    pub fn growth_factor(&self) -> Decimal {
        Decimal::ONE + self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_lamport_precision() {
        let sol = Money::from_minor(1_000_000_000, 9);
        assert_eq!(sol, Money::from_major(1));

        // 1 lamport is below our precision and rounds away
        assert!(Money::from_minor(1, 9).is_zero());
        assert_eq!(Money::from_minor(10, 9), Money::EPSILON);
    }

    #[test]
    fn test_percentage() {
        let price = Money::from_str_exact("312.50").unwrap();
        assert_eq!(price.percentage(25), Some(Money::from_str_exact("78.125").unwrap()));
        assert_eq!(price.percentage(0), Some(Money::ZERO));
        assert_eq!(price.percentage(100), Some(price));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge.percentage(25), None);
        assert_eq!(huge.checked_mul(dec!(1.12)), None);
        assert_eq!(huge.checked_mul(Decimal::ONE), Some(huge));
        assert_eq!(huge.split(4), Money::from_decimal(Decimal::MAX / dec!(4)));
    }

    #[test]
    fn test_split() {
        let amount = Money::from_str_exact("2.5").unwrap();
        assert_eq!(amount.split(4), Money::from_str_exact("0.625").unwrap());
        assert_eq!(amount.split(0), Money::ZERO);

        // thirds round to 8 places
        let third = Money::ONE.split(3);
        assert_eq!(third.to_string(), "0.33333333");
        assert!((third * dec!(3)).approx_eq(Money::ONE, Money::EPSILON));
    }

    #[test]
    fn test_saturating_sub() {
        let a = Money::from_major(1);
        let b = Money::from_major(3);
        assert_eq!(a.saturating_sub(b), Money::ZERO);
        assert_eq!(b.saturating_sub(a), Money::from_major(2));
    }

    #[test]
    fn test_rate_growth_factor() {
        let rate = Rate::from_percentage(12);
        assert_eq!(rate.growth_factor(), dec!(1.12));
        assert_eq!(rate.to_string(), "12%");
        assert_eq!(Rate::ZERO.growth_factor(), Decimal::ONE);
    }
}
