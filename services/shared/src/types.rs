/// Type-safe wrappers for form primitives
///
/// Each text field type shapes raw keyboard input at construction time, so a
/// stored value never holds characters the field does not accept.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount format: {0}")]
    InvalidAmountFormat(String),

    #[error("Unit price out of range: {cents} cents (max {max})")]
    UnitPriceOutOfRange { cents: u64, max: u64 },

    #[error("Unknown operator prefix: {0}")]
    UnknownOperatorPrefix(String),

    #[error("Unknown bank: {0}")]
    UnknownBank(String),
}

/// Money amount held as integer cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Build a unit price, rejecting values that could overflow a total
    pub fn unit_price(cents: u64) -> Result<Self, ValidationError> {
        if cents > MAX_UNIT_PRICE_CENTS {
            return Err(ValidationError::UnitPriceOutOfRange {
                cents,
                max: MAX_UNIT_PRICE_CENTS,
            });
        }
        Ok(Self(cents))
    }

    /// Parse a decimal string such as `"100"`, `"5.5"` or `"100.00"`
    pub fn parse_decimal(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidAmountFormat(value.to_string());
        let trimmed = value.trim();

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty()
            || fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid)
    }

    pub fn as_cents(&self) -> u64 {
        self.0
    }

    /// Multiply by a ticket count
    ///
    /// Callers hold a price built through [`Amount::unit_price`], which keeps
    /// the product inside `u64`.
    pub fn times(&self, count: TicketCount) -> Self {
        Self(self.0.saturating_mul(u64::from(count.get())))
    }

    /// Decimal value for JSON payloads
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Number of tickets in the order, never below [`MIN_TICKET_COUNT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketCount(u32);

impl TicketCount {
    pub fn new(count: u32) -> Self {
        Self(count.max(MIN_TICKET_COUNT))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Step down by one, staying at the floor when already there
    pub fn decremented(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for TicketCount {
    fn default() -> Self {
        Self(MIN_TICKET_COUNT)
    }
}

impl std::fmt::Display for TicketCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keep ASCII digits only, up to `max` of them
fn keep_digits(raw: &str, max: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// Anything outside General_Category Letter and whitespace
fn non_name_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\p{L}\s]").expect("name filter is a valid constant pattern"))
}

/// Buyer's full name: letters and whitespace, at most [`FULL_NAME_MAX_CHARS`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
    pub fn from_input(raw: &str) -> Self {
        Self(
            non_name_chars()
                .replace_all(raw, "")
                .chars()
                .take(FULL_NAME_MAX_CHARS)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Local part of a mobile number, digits only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneLocalNumber(String);

impl PhoneLocalNumber {
    pub fn from_input(raw: &str) -> Self {
        Self(keep_digits(raw, PHONE_LOCAL_DIGITS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pago Móvil reference digits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReference(String);

impl PaymentReference {
    pub fn from_input(raw: &str) -> Self {
        Self(keep_digits(raw, PAYMENT_REFERENCE_DIGITS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Operator prefix restricted to [`PHONE_OPERATORS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorPrefix(&'static str);

impl OperatorPrefix {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for OperatorPrefix {
    fn default() -> Self {
        Self(PHONE_OPERATORS[0])
    }
}

impl TryFrom<&str> for OperatorPrefix {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PHONE_OPERATORS
            .iter()
            .copied()
            .find(|op| *op == value.trim())
            .map(Self)
            .ok_or_else(|| ValidationError::UnknownOperatorPrefix(value.to_string()))
    }
}

impl std::fmt::Display for OperatorPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
