//! Fixtures
//!
//! YAML discount sets with expected order-line outcomes, used by the
//! conformance tests and handy for reproducing pricing reports.

use std::{fs, path::PathBuf};

use jiff::civil::Date;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{Findable, Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    discounts::{Discount, DiscountError, DiscountKind},
    windows::DiscountWindow,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid quantity
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Discount not found
    #[error("Discount not found: {0}")]
    DiscountNotFound(String),

    /// Discount terms rejected
    #[error("Invalid discount {0}: {1}")]
    InvalidDiscount(String, DiscountError),
}

/// Wrapper for a fixture file in YAML
#[derive(Debug, Deserialize)]
pub struct DiscountsFixture {
    /// Map of discount key -> discount fixture
    pub discounts: FxHashMap<String, DiscountFixture>,

    /// Order lines to price against the discounts
    #[serde(default)]
    pub lines: Vec<LineFixture>,
}

/// Discount Fixture
#[derive(Debug, Deserialize)]
pub struct DiscountFixture {
    /// Discount type and amount, e.g. `{ type: fixed, amount: "5.00 GBP" }`
    #[serde(flatten)]
    pub kind: KindFixture,

    /// First valid day
    pub start: Date,

    /// Last valid day
    pub end: Date,

    /// Administrative switch
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Discount kind as written in fixtures
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindFixture {
    /// Percentage, e.g. `"15%"`
    Percent {
        /// Percentage string
        amount: String,
    },

    /// Fixed amount, e.g. `"5.00 GBP"`
    Fixed {
        /// Price string
        amount: String,
    },
}

/// An order line and the outcome expected from one discount
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Key of the discount to apply
    pub discount: String,

    /// Unit price, e.g. `"20.00 GBP"`
    pub unit_price: String,

    /// Number of units (may be fractional)
    pub quantity: String,

    /// Pricing date
    pub as_of: Date,

    /// Expected discount amount
    pub discount_amount: String,

    /// Expected line total after the discount
    pub final_line_total: String,
}

fn default_active() -> bool {
    true
}

/// A parsed order line with its expectations
#[derive(Debug, Clone)]
pub struct Line {
    /// Key of the discount to apply
    pub discount: String,

    /// Unit price
    pub unit_price: Money<'static, Currency>,

    /// Number of units
    pub quantity: Decimal,

    /// Pricing date
    pub as_of: Date,

    /// Expected discount amount
    pub discount_amount: Money<'static, Currency>,

    /// Expected line total after the discount
    pub final_line_total: Money<'static, Currency>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    discounts: FxHashMap<String, Discount>,
    lines: Vec<Line>,
}

impl Fixture {
    /// Load a fixture set from `./fixtures/{name}.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::load(PathBuf::from("./fixtures").join(format!("{name}.yml")))
    }

    /// Load a fixture set from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path.into())?;

        Self::parse(&contents)
    }

    /// Parse a fixture set from YAML
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, amounts cannot be parsed, or
    /// a line references an unknown discount.
    pub fn parse(contents: &str) -> Result<Self, FixtureError> {
        let fixture: DiscountsFixture = serde_norway::from_str(contents)?;

        let mut discounts = FxHashMap::default();

        for (key, discount_fixture) in fixture.discounts {
            let discount = discount_fixture
                .try_into_discount()
                .map_err(|error| match error {
                    FixtureError::InvalidDiscount(_, source) => {
                        FixtureError::InvalidDiscount(key.clone(), source)
                    }
                    other => other,
                })?;

            discounts.insert(key, discount);
        }

        let lines = fixture
            .lines
            .into_iter()
            .map(|line| {
                if !discounts.contains_key(&line.discount) {
                    return Err(FixtureError::DiscountNotFound(line.discount));
                }

                line.try_into()
            })
            .collect::<Result<Vec<Line>, FixtureError>>()?;

        Ok(Self { discounts, lines })
    }

    /// Get a discount by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the discount is not found.
    pub fn discount(&self, key: &str) -> Result<&Discount, FixtureError> {
        self.discounts
            .get(key)
            .ok_or_else(|| FixtureError::DiscountNotFound(key.to_string()))
    }

    /// Get all order lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl DiscountFixture {
    fn try_into_discount(self) -> Result<Discount, FixtureError> {
        let kind = match self.kind {
            KindFixture::Percent { amount } => DiscountKind::Percent(parse_percentage(&amount)?),
            KindFixture::Fixed { amount } => DiscountKind::Fixed(parse_price(&amount)?.to_minor_units()),
        };

        let window = DiscountWindow::new(self.start, self.end)
            .map_err(|error| FixtureError::InvalidDiscount(String::new(), error.into()))?;

        // Fixtures may deliberately carry out-of-range amounts to exercise clamping.
        Ok(Discount::from_parts(kind, window, self.active))
    }
}

impl TryFrom<LineFixture> for Line {
    type Error = FixtureError;

    fn try_from(fixture: LineFixture) -> Result<Self, Self::Error> {
        let quantity = fixture
            .quantity
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidQuantity(fixture.quantity.clone()))?;

        Ok(Self {
            discount: fixture.discount,
            unit_price: parse_price(&fixture.unit_price)?,
            quantity,
            as_of: fixture.as_of,
            discount_amount: parse_price(&fixture.discount_amount)?,
            final_line_total: parse_price(&fixture.final_line_total)?,
        })
    }
}

/// Parse a price string (e.g. "2.99 GBP") into money.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount is not a decimal with at most the currency's minor-unit
/// precision, or if the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency =
        Currency::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor, currency))
}

/// Parse a percentage string (e.g. "15%") into percentage points.
///
/// # Errors
///
/// Returns an error if the string has no `%` suffix or is not a decimal.
pub fn parse_percentage(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .strip_suffix('%')
        .and_then(|value| value.trim().parse::<Decimal>().ok())
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
}
