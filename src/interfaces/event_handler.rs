// ============================================================================
// Ledger Events and Event Handler Interface
// The events recorded in a product's log and the contract for observing them
// ============================================================================

use crate::domain::{next_timestamp, Fill, Order, OrderId, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Request to place an order on one side of a product.
///
/// Carries the id and timestamp the order gets in the book so that replaying
/// the event rebuilds exactly the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Intent {
    pub product: String,
    pub order_id: OrderId,
    pub price: Decimal,
    pub quantity: Decimal,
    pub timestamp: i64,
    pub recorded_at: DateTime<Utc>,
}

impl Intent {
    pub fn new(product: impl Into<String>, price: Decimal, quantity: Decimal) -> Self {
        Self {
            product: product.into(),
            order_id: OrderId::new(),
            price,
            quantity,
            timestamp: next_timestamp(),
            recorded_at: Utc::now(),
        }
    }

    /// The order this intent places on `side`
    pub fn order(&self, side: Side) -> Order {
        Order::from_parts(self.order_id, side, self.price, self.quantity, self.timestamp)
    }
}

/// A match recorded for audit and reconstruction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeRecord {
    pub product: String,
    pub fill: Fill,
    pub recorded_at: DateTime<Utc>,
}

/// Events stored in a product's log
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LedgerEvent {
    /// Place a supply (sell) order
    SupplyIntent(Intent),

    /// Place a demand (buy) order
    DemandIntent(Intent),

    /// A fill between a demand and a supply; does not touch the book
    TradeRecord(TradeRecord),
}

impl LedgerEvent {
    pub fn supply(product: impl Into<String>, price: Decimal, quantity: Decimal) -> Self {
        LedgerEvent::SupplyIntent(Intent::new(product, price, quantity))
    }

    pub fn demand(product: impl Into<String>, price: Decimal, quantity: Decimal) -> Self {
        LedgerEvent::DemandIntent(Intent::new(product, price, quantity))
    }

    pub fn trade(product: impl Into<String>, fill: Fill) -> Self {
        LedgerEvent::TradeRecord(TradeRecord {
            product: product.into(),
            fill,
            recorded_at: Utc::now(),
        })
    }

    pub fn product(&self) -> &str {
        match self {
            LedgerEvent::SupplyIntent(intent) | LedgerEvent::DemandIntent(intent) => {
                &intent.product
            },
            LedgerEvent::TradeRecord(record) => &record.product,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::SupplyIntent(_) => "SupplyIntent",
            LedgerEvent::DemandIntent(_) => "DemandIntent",
            LedgerEvent::TradeRecord(_) => "TradeRecord",
        }
    }

    /// The order an intent places in the book; `None` for trade records
    pub fn order(&self) -> Option<Order> {
        match self {
            LedgerEvent::SupplyIntent(intent) => Some(intent.order(Side::Supply)),
            LedgerEvent::DemandIntent(intent) => Some(intent.order(Side::Demand)),
            LedgerEvent::TradeRecord(_) => None,
        }
    }

    /// The intent carried by a supply or demand event
    pub fn intent(&self) -> Option<&Intent> {
        match self {
            LedgerEvent::SupplyIntent(intent) | LedgerEvent::DemandIntent(intent) => Some(intent),
            LedgerEvent::TradeRecord(_) => None,
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::SupplyIntent(intent) | LedgerEvent::DemandIntent(intent) => write!(
                f,
                "{} [{}] {} @ {} (order {})",
                self.kind(),
                intent.product,
                intent.quantity,
                intent.price,
                intent.order_id
            ),
            LedgerEvent::TradeRecord(record) => {
                write!(f, "{} [{}] {}", self.kind(), record.product, record.fill)
            },
        }
    }
}

/// Event handler trait for observing recorded ledger events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a recorded event
    fn on_event(&self, event: &LedgerEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: &[LedgerEvent]) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: &LedgerEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: &LedgerEvent) {
        tracing::debug!(product = event.product(), kind = event.kind(), "ledger event: {}", event);
    }
}
