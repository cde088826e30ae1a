use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

use crate::LedgerError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the ledger (available funds,
/// allocations, spends, summary columns) to avoid floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Largest magnitude the ledger accepts: ten trillion units.
    ///
    /// Amounts are stored as JSON numbers, so fractional ones pass through an
    /// `f64`. Every cent value up to this bound reads back unchanged.
    pub const MAX: MoneyCents = MoneyCents(1_000_000_000_000_000);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new amount from whole units (`from_units(5)` is `5.00`).
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Returns `true` if the magnitude is above [`MoneyCents::MAX`].
    #[must_use]
    pub const fn exceeds_max(self) -> bool {
        self.0.unsigned_abs() > Self::MAX.0.unsigned_abs()
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        // Honour width/alignment so summary tables can pad amounts.
        f.pad(&format!("{sign}{units}.{cents:02}"))
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
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

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
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

impl FromStr for MoneyCents {
    type Err = LedgerError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - magnitude at most [`MoneyCents::MAX`]
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || LedgerError::InvalidAmount("empty amount".to_string());
        let invalid = || LedgerError::InvalidAmount(format!("\"{}\" is not a number", s.trim()));
        let overflow = || LedgerError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(LedgerError::InvalidAmount(
                            "too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;
        let amount = MoneyCents(if negative { -total } else { total });
        if amount.exceeds_max() {
            return Err(overflow());
        }

        Ok(amount)
    }
}

/// Amounts travel as plain JSON numbers (`120.5`), never as strings.
impl Serialize for MoneyCents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.exceeds_max() {
            return Err(ser::Error::custom(format!("amount {self} out of range")));
        }
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for MoneyCents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl MoneyVisitor {
    fn bounded<E: de::Error>(amount: MoneyCents) -> Result<MoneyCents, E> {
        if amount.exceeds_max() {
            return Err(E::custom("amount out of range"));
        }
        Ok(amount)
    }
}

impl de::Visitor<'_> for MoneyVisitor {
    type Value = MoneyCents;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        v.checked_mul(100)
            .map(MoneyCents)
            .ok_or_else(|| E::custom("amount out of range"))
            .and_then(Self::bounded)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("amount out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        let cents = (v * 100.0).round();
        if !cents.is_finite() || cents.abs() > MoneyCents::MAX.0 as f64 {
            return Err(E::custom("amount out of range"));
        }
        Ok(MoneyCents(cents as i64))
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
    fn display_respects_width() {
        assert_eq!(format!("{:>10}", MoneyCents::new(-2000)), "    -20.00");
        assert_eq!(format!("{:<8}|", MoneyCents::new(5)), "0.05    |");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
        assert_eq!("7.".parse::<MoneyCents>().unwrap().cents(), 700);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("0.001".parse::<MoneyCents>().is_err());
        assert!("".parse::<MoneyCents>().is_err());
        assert!("-".parse::<MoneyCents>().is_err());
        assert!("Amount".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
        assert!(".5".parse::<MoneyCents>().is_err());
        assert!("99999999999999999999".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn sum_over_amounts() {
        let spends = [MoneyCents::new(120), MoneyCents::new(80), MoneyCents::new(1)];
        assert_eq!(spends.iter().sum::<MoneyCents>(), MoneyCents::new(201));
        assert_eq!(Vec::<MoneyCents>::new().into_iter().sum::<MoneyCents>(), MoneyCents::ZERO);
    }

    #[test]
    fn serde_uses_plain_numbers() {
        assert_eq!(serde_json::to_string(&MoneyCents::new(100_000)).unwrap(), "1000");
        assert_eq!(serde_json::to_string(&MoneyCents::new(12_050)).unwrap(), "120.5");

        let parsed: MoneyCents = serde_json::from_str("120.5").unwrap();
        assert_eq!(parsed, MoneyCents::new(12_050));
        let parsed: MoneyCents = serde_json::from_str("0.1").unwrap();
        assert_eq!(parsed, MoneyCents::new(10));
        let parsed: MoneyCents = serde_json::from_str("-3").unwrap();
        assert_eq!(parsed, MoneyCents::new(-300));
        assert!(serde_json::from_str::<MoneyCents>("\"12\"").is_err());
    }

    #[test]
    fn parse_caps_amounts_at_max() {
        assert_eq!("10000000000000".parse::<MoneyCents>().unwrap(), MoneyCents::MAX);
        assert_eq!(
            "-9999999999999.99".parse::<MoneyCents>().unwrap(),
            MoneyCents::new(-999_999_999_999_999)
        );
        assert!("10000000000000.01".parse::<MoneyCents>().is_err());
        assert!("10000000000000.50".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn amounts_up_to_max_survive_json() {
        let top = MoneyCents::MAX.cents();
        for cents in (top - 1_000..=top).chain([-top, -(top - 1), 123_456_789_012_345]) {
            let amount = MoneyCents::new(cents);
            let json = serde_json::to_string(&amount).unwrap();
            let back: MoneyCents = serde_json::from_str(&json).unwrap();
            assert_eq!(back, amount, "{json}");
        }
        assert_eq!(
            serde_json::to_string(&MoneyCents::new(top - 1)).unwrap(),
            "9999999999999.99"
        );
    }

    #[test]
    fn json_outside_max_is_refused_both_ways() {
        let over = MoneyCents::new(MoneyCents::MAX.cents() + 50);
        assert!(serde_json::to_string(&over).is_err());
        assert!(serde_json::to_string(&MoneyCents::new(i64::MIN)).is_err());

        assert!(serde_json::from_str::<MoneyCents>("10000000000000.5").is_err());
        assert!(serde_json::from_str::<MoneyCents>("10000000000001").is_err());
        assert!(serde_json::from_str::<MoneyCents>("1e300").is_err());
        let edge: MoneyCents = serde_json::from_str("10000000000000").unwrap();
        assert_eq!(edge, MoneyCents::MAX);
    }
}
