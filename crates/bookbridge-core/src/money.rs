//! Currency-tagged monetary amounts.
//!
//! Prices enter the system as display strings (`"$12"`, `"₦25,000.00"`) and
//! are normalized exactly once, at the boundary, into a structured amount:
//! minor units plus a currency tag. Parsing is lenient: an unparsable price
//! contributes zero with a logged warning, never an error that aborts the
//! enclosing operation.

use std::fmt;
use std::ops::Add;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency tag attached to every amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    /// Nigerian naira (`₦`) — the ledger's display currency.
    #[default]
    Naira,
    /// United States dollar (`$`).
    Dollar,
}

impl Currency {
    /// Returns the display symbol for this currency.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Naira => "₦",
            Currency::Dollar => "$",
        }
    }

    /// Maps a currency symbol character to its tag.
    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '₦' => Some(Currency::Naira),
            '$' => Some(Currency::Dollar),
            _ => None,
        }
    }
}

/// A non-negative monetary amount in minor units (kobo/cents) with a
/// currency tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Money {
    minor: i64,
    currency: Currency,
}

impl Money {
    /// The zero amount in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self { minor: 0, currency }
    }

    /// Creates an amount from major units (whole naira/dollars).
    #[must_use]
    pub fn from_major(major: i64, currency: Currency) -> Self {
        Self::from_minor(major.saturating_mul(100), currency)
    }

    /// Creates an amount from minor units, clamping negatives to zero with
    /// a warning.
    #[must_use]
    pub fn from_minor(minor: i64, currency: Currency) -> Self {
        if minor < 0 {
            tracing::warn!(minor, "negative amount clamped to zero");
            return Self::zero(currency);
        }
        Self { minor, currency }
    }

    /// Normalizes a formatted price string.
    ///
    /// The currency tag is taken from the first recognized symbol in the
    /// input (defaulting to naira). Every character that is not an ASCII
    /// digit or decimal point is stripped before parsing; a failed parse
    /// yields zero with a logged warning.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let currency = raw
            .chars()
            .find_map(Currency::from_symbol)
            .unwrap_or_default();
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => {
                #[allow(clippy::cast_possible_truncation)]
                let minor = (value * 100.0).round() as i64;
                Self { minor, currency }
            }
            _ => {
                tracing::warn!(raw, "unparsable price treated as zero");
                Self::zero(currency)
            }
        }
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub fn minor(self) -> i64 {
        self.minor
    }

    /// Returns the amount in major units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn major(self) -> f64 {
        self.minor as f64 / 100.0
    }

    /// Returns the currency tag.
    #[must_use]
    pub fn currency(self) -> Currency {
        self.currency
    }

    /// Multiplies the amount by a quantity (saturating).
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            minor: self.minor.saturating_mul(i64::from(quantity)),
            currency: self.currency,
        }
    }
}

/// Sums keep the left operand's currency tag, matching the numeral-only
/// arithmetic of the data this models.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            minor: self.minor.saturating_add(rhs.minor),
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{:02}",
            self.currency.symbol(),
            group_thousands(self.minor / 100),
            self.minor % 100
        )
    }
}

/// Formats a non-negative integer with comma thousands separators.
fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Accepts either a formatted string or a bare number (tagged naira), so
/// the persisted `price: string|number` layout round-trips.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a price string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                Ok(Money::parse_lenient(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                Ok(Money::from_major(
                    i64::try_from(v).unwrap_or(i64::MAX / 100),
                    Currency::default(),
                ))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Ok(Money::from_major(v, Currency::default()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                #[allow(clippy::cast_possible_truncation)]
                let minor = if v.is_finite() { (v * 100.0).round() as i64 } else { 0 };
                Ok(Money::from_minor(minor, Currency::default()))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}
