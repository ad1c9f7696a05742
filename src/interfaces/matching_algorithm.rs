// ============================================================================
// Matching Algorithm Interface
// Defines the contract for pluggable matching algorithms
// ============================================================================

use crate::domain::{Fill, Order, OrderBook, Side};
use crate::error::MergeError;
use rust_decimal::Decimal;

/// Strategy pattern interface for matching algorithms
pub trait MatchingAlgorithm: Send + Sync {
    /// Match an order that already rests in `book` against the opposite side
    ///
    /// # Arguments
    /// * `incoming` - The newly inserted order, as it was inserted
    /// * `book` - The product's order book, which already contains `incoming`
    ///
    /// # Returns
    /// The fills in the order they were executed; empty when nothing crossed
    fn match_order(&self, incoming: &Order, book: &OrderBook) -> Result<Vec<Fill>, MergeError>;

    /// Get the algorithm name for logging
    fn name(&self) -> &str;

    /// Whether a counter-order resting at `book_price` is eligible for `incoming`
    fn prices_cross(&self, incoming: &Order, book_price: Decimal) -> bool {
        match incoming.side {
            Side::Demand => book_price <= incoming.price,
            Side::Supply => book_price >= incoming.price,
        }
    }
}
