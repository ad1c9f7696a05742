// ============================================================================
// Order Comparators
// Ordering rules for each side of the book
// ============================================================================

use crate::error::ComparatorError;
use rust_decimal::Decimal;
use std::cmp::Ordering;

use super::{Order, Side};

/// Total order over orders of one side.
///
/// `Ordering::Less` means the first order ranks ahead of the second, so a
/// slice sorted with `compare` starts with the best order.
pub trait Comparator: Send + Sync {
    /// The side this comparator orders
    fn side(&self) -> Side;

    /// Three-way comparison of two orders of this side
    fn compare(&self, a: &Order, b: &Order) -> Result<Ordering, ComparatorError>;

    /// Reject orders this comparator cannot rank
    fn admit(&self, order: &Order) -> Result<(), ComparatorError> {
        if order.side != self.side() {
            return Err(ComparatorError::SideMismatch {
                order_id: order.id,
                expected: self.side(),
                found: order.side,
            });
        }
        if order.quantity < Decimal::ZERO {
            return Err(ComparatorError::NegativeQuantity {
                order_id: order.id,
                quantity: order.quantity,
            });
        }
        Ok(())
    }
}

/// Best bid first.
///
/// Higher price ranks first; at equal price the smaller quantity ranks
/// first; at equal price and quantity the earlier timestamp ranks first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemandComparator;

impl Comparator for DemandComparator {
    fn side(&self) -> Side {
        Side::Demand
    }

    fn compare(&self, a: &Order, b: &Order) -> Result<Ordering, ComparatorError> {
        self.admit(a)?;
        self.admit(b)?;

        Ok(b.price
            .cmp(&a.price)
            .then_with(|| a.quantity.cmp(&b.quantity))
            .then_with(|| a.timestamp.cmp(&b.timestamp)))
    }
}

/// Best ask first.
///
/// Lower price ranks first; at equal price the larger quantity ranks first;
/// at equal price and quantity the earlier timestamp ranks first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplyComparator;

impl Comparator for SupplyComparator {
    fn side(&self) -> Side {
        Side::Supply
    }

    fn compare(&self, a: &Order, b: &Order) -> Result<Ordering, ComparatorError> {
        self.admit(a)?;
        self.admit(b)?;

        Ok(a.price
            .cmp(&b.price)
            .then_with(|| b.quantity.cmp(&a.quantity))
            .then_with(|| a.timestamp.cmp(&b.timestamp)))
    }
}

/// Comparator for the given side
pub fn for_side(side: Side) -> Box<dyn Comparator> {
    match side {
        Side::Demand => Box::new(DemandComparator),
        Side::Supply => Box::new(SupplyComparator),
    }
}
