// ============================================================================
// Order Domain Model
// ============================================================================

use chrono::Utc;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Sell side: quantity offered at or above a price
    Supply,
    /// Buy side: quantity wanted at or below a price
    Demand,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Supply => Side::Demand,
            Side::Demand => Side::Supply,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Supply => write!(f, "supply"),
            Side::Demand => write!(f, "demand"),
        }
    }
}

// ============================================================================
// Timestamps
// ============================================================================

static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Strictly increasing nanosecond timestamp, unique within the process.
///
/// Wall-clock based, but never repeats or goes backwards even when the
/// clock does or when two orders are created in the same nanosecond.
pub fn next_timestamp() -> i64 {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let mut last = LAST_TIMESTAMP.load(Ordering::Acquire);
    loop {
        let candidate = now.max(last + 1);
        match LAST_TIMESTAMP.compare_exchange_weak(
            last,
            candidate,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => return candidate,
            Err(current) => last = current,
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// A resting or incoming order.
///
/// Orders are values: a fill never mutates an order in place, it produces a
/// replacement with the same id, price, side and timestamp and a new
/// quantity. A quantity of zero marks the order as fully filled, and the book
/// drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub id: OrderId,
    pub price: Decimal,
    pub quantity: Decimal,
    pub side: Side,
    pub timestamp: i64,
}

impl Order {
    /// Create a fresh order with a new id and the next timestamp
    pub fn new(side: Side, price: Decimal, quantity: Decimal) -> Self {
        Self {
            id: OrderId::new(),
            price,
            quantity,
            side,
            timestamp: next_timestamp(),
        }
    }

    /// Rebuild an order from recorded parts
    pub fn from_parts(
        id: OrderId,
        side: Side,
        price: Decimal,
        quantity: Decimal,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            price,
            quantity,
            side,
            timestamp,
        }
    }

    pub fn supply(price: Decimal, quantity: Decimal) -> Self {
        Self::new(Side::Supply, price, quantity)
    }

    pub fn demand(price: Decimal, quantity: Decimal) -> Self {
        Self::new(Side::Demand, price, quantity)
    }

    /// Replacement of this order carrying `quantity`
    pub fn with_quantity(&self, quantity: Decimal) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    /// Zero-quantity replacement; closes the order when merged into its side
    pub fn closed(&self) -> Self {
        self.with_quantity(Decimal::ZERO)
    }

    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {} (t={})",
            self.side, self.id, self.quantity, self.price, self.timestamp
        )
    }
}
