//! Order status.
//!
//! Orders move through whatever status strings the back office writes; no
//! transition table is enforced. The only rule is that a status is never blank.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for a blank order status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("order status cannot be empty")]
pub struct OrderStatusError;

/// Free-form order status (e.g. `Pending`, `Confirmed`, `Returned`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Status given to orders created without one.
    pub const DEFAULT: &'static str = "Pending";

    /// Parse a status value.
    ///
    /// # Errors
    ///
    /// Returns `OrderStatusError` if the value is empty or whitespace.
    pub fn parse(s: &str) -> Result<Self, OrderStatusError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(OrderStatusError);
        }
        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = OrderStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.0
    }
}
