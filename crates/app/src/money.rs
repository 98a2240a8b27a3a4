//! Money
//!
//! Prices are held as integer minor units with two decimal places, so `10_00` is 10.00.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

/// Largest discount percentage an order may carry.
pub const MAX_DISCOUNT_PERCENT: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("discount must be between 0 and {MAX_DISCOUNT_PERCENT} percent, got {0}")]
pub struct DiscountOutOfRange(pub i64);

/// Whole-number percentage discount in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Discount(u8);

impl Discount {
    /// Build a discount, rejecting values above 100.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountOutOfRange`] when `percent` is greater than 100.
    pub const fn new(percent: u8) -> Result<Self, DiscountOutOfRange> {
        if percent > MAX_DISCOUNT_PERCENT {
            return Err(DiscountOutOfRange(percent as i64));
        }

        Ok(Self(percent))
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Amount taken off `price`, rounded half-up to the minor unit.
    #[must_use]
    pub fn amount_of(self, price: u64) -> u64 {
        let scaled = u128::from(price) * u128::from(self.0) + 50;

        // percent <= 100 keeps the quotient <= price
        u64::try_from(scaled / 100).unwrap_or(price)
    }
}

impl TryFrom<i64> for Discount {
    type Error = DiscountOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(|percent| Self::new(percent).ok())
            .ok_or(DiscountOutOfRange(value))
    }
}

impl From<Discount> for i16 {
    fn from(value: Discount) -> Self {
        i16::from(value.0)
    }
}

/// Price of `quantity` units at `unit_price`.
#[must_use]
pub fn line_price(unit_price: u64, quantity: u32) -> u64 {
    unit_price.saturating_mul(u64::from(quantity))
}

/// Discount taken off `price`; zero when there is no discount.
#[must_use]
pub fn discount_amount(price: u64, discount: Option<Discount>) -> u64 {
    discount.map_or(0, |discount| discount.amount_of(price))
}

/// Price after discount.
#[must_use]
pub fn total_price(price: u64, discount: Option<Discount>) -> u64 {
    price.saturating_sub(discount_amount(price, discount))
}

/// Minor units rendered with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub u64);

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
