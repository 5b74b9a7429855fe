//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices are written the way a menu prints them (`"$12.99"`). They are
//! parsed into a [`Price`] once, when the menu is built, so that totals are
//! plain decimal arithmetic with no string handling left at checkout time.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] or a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input does not start with a known currency symbol.
    #[error("price must start with a currency symbol ($, €, £)")]
    MissingCurrencySymbol,
    /// The text after the currency symbol is not a decimal number.
    #[error("invalid price amount: {0:?}")]
    InvalidAmount(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// Two prices in different currencies were combined.
    #[error("cannot combine {left} and {right} amounts")]
    CurrencyMismatch {
        /// Currency of the left-hand operand.
        left: CurrencyCode,
        /// Currency of the right-hand operand.
        right: CurrencyCode,
    },
    /// An amount grew past what a decimal can hold.
    #[error("price amount out of range")]
    Overflow,
    /// Unknown ISO 4217 code.
    #[error("unknown currency code: {0:?}")]
    UnknownCurrency(String),
}

/// A non-negative price with currency information.
///
/// ## Examples
///
/// ```
/// use little_lemon_core::{CurrencyCode, Price};
///
/// let price = Price::parse("$12.99").unwrap();
/// assert_eq!(price.currency_code, CurrencyCode::USD);
/// assert_eq!(price.times(2).unwrap().to_string(), "$25.98");
///
/// assert!(Price::parse("12.99").is_err());  // no currency symbol
/// assert!(Price::parse("$abc").is_err());   // not a number
/// assert!(Price::parse("$1_000").is_err()); // digits and one `.` only
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Parse a display price such as `"$12.99"`.
    ///
    /// Leading and trailing whitespace is ignored. `$` is read as USD. The
    /// amount is plain digits with at most one decimal point.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, does not start with a known
    /// currency symbol, has a malformed amount, or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let (currency_code, rest) = CurrencyCode::split_symbol(s)?;
        let rest = rest.trim();

        let digits = rest.strip_prefix('-').unwrap_or(rest);
        if !is_plain_amount(digits) {
            return Err(PriceError::InvalidAmount(rest.to_owned()));
        }
        let amount =
            Decimal::from_str(digits).map_err(|_| PriceError::InvalidAmount(rest.to_owned()))?;
        if digits.len() != rest.len() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        Ok(Self::new(amount, currency_code))
    }

    /// This price multiplied by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product does not fit.
    pub fn times(&self, quantity: u32) -> Result<Self, PriceError> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
            .ok_or(PriceError::Overflow)
    }

    /// Add two prices of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if the currencies differ, or
    /// [`PriceError::Overflow`] if the sum does not fit.
    pub fn checked_add(&self, other: &Self) -> Result<Self, PriceError> {
        if self.currency_code != other.currency_code {
            return Err(PriceError::CurrencyMismatch {
                left: self.currency_code,
                right: other.currency_code,
            });
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
            .ok_or(PriceError::Overflow)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

// `Decimal::from_str` also takes `_` separators and a leading `+`.
fn is_plain_amount(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && s.bytes().filter(|b| *b == b'.').count() <= 1
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol printed before an amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    // `$` is shared by several currencies; menus written with it are USD.
    fn split_symbol(s: &str) -> Result<(Self, &str), PriceError> {
        [Self::USD, Self::EUR, Self::GBP]
            .into_iter()
            .find_map(|code| s.strip_prefix(code.symbol()).map(|rest| (code, rest)))
            .ok_or(PriceError::MissingCurrencySymbol)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(PriceError::UnknownCurrency(s.to_owned())),
        }
    }
}
