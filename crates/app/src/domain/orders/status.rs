//! Order status state machine.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Canceled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" => Ok(Self::Canceled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// An action a user can take on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    Pay,
    Cancel,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} an order that is {from}")]
pub struct InvalidTransition {
    pub action: OrderAction,
    pub from: OrderStatus,
}

impl OrderAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pay => "pay",
            Self::Cancel => "cancel",
            Self::Reset => "reset",
        }
    }

    /// Whether only the order's owner may take this action.
    ///
    /// Reset is open to any authenticated user.
    #[must_use]
    pub const fn requires_owner(self) -> bool {
        matches!(self, Self::Pay | Self::Cancel)
    }

    /// Status the order moves to when this action is taken from `from`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when paying an order that is not pending.
    pub const fn apply(self, from: OrderStatus) -> Result<OrderStatus, InvalidTransition> {
        match (self, from) {
            (Self::Pay, OrderStatus::Pending) => Ok(OrderStatus::Confirmed),
            (Self::Pay, _) => Err(InvalidTransition { action: self, from }),
            (Self::Cancel, _) => Ok(OrderStatus::Canceled),
            (Self::Reset, _) => Ok(OrderStatus::Pending),
        }
    }
}

impl Display for OrderAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
