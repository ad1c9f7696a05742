// ============================================================================
// Ledger Errors
// Error types for ordering, merging and event application
// ============================================================================

use crate::domain::{OrderId, Side};
use rust_decimal::Decimal;
use thiserror::Error;

/// Structural failure reported by a comparator.
///
/// Comparators only fail on malformed input: an order routed to the wrong
/// side of the book, or an order carrying a negative quantity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparatorError {
    #[error("order {order_id} is a {found} order, expected {expected}")]
    SideMismatch {
        order_id: OrderId,
        expected: Side,
        found: Side,
    },

    #[error("order {order_id} has negative quantity {quantity}")]
    NegativeQuantity { order_id: OrderId, quantity: Decimal },
}

/// Failure while applying a batch to a book side. The side is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Every comparator failure found while sorting the incoming batch
    #[error("failed to sort incoming orders: {}", join(.0))]
    Sort(Vec<ComparatorError>),

    #[error("failed to merge incoming orders: {0}")]
    Merge(#[source] ComparatorError),
}

fn join(errors: &[ComparatorError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced by event application and the product API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The order was placed but found no eligible counter-order. It now rests
    /// in the book; this is an expected outcome, not a fault.
    #[error("no matching order found for {order_id}")]
    NoMatch { order_id: OrderId },

    #[error(transparent)]
    Merge(#[from] MergeError),

    /// An intent reused an order id that is already in the log
    #[error("order {order_id} was already placed")]
    DuplicateOrder { order_id: OrderId },

    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error("event for product {event_product} applied to product {product}")]
    ProductMismatch {
        product: String,
        event_product: String,
    },
}

impl LedgerError {
    /// True for the benign "order rests in the book" outcome
    pub fn is_no_match(&self) -> bool {
        matches!(self, LedgerError::NoMatch { .. })
    }
}

/// Invalid product configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("product id cannot be empty")]
    EmptyProductId,

    #[error("product name cannot be empty")]
    EmptyName,

    #[error("tick size must be positive, got {0}")]
    InvalidTickSize(Decimal),

    #[error("lot size must be positive, got {0}")]
    InvalidLotSize(Decimal),
}
