// ============================================================================
// Order Book Domain Model
// ============================================================================

use crate::error::MergeError;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{BookSide, Order, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Book
// ============================================================================

/// Demand and supply sides of one product.
///
/// Locks are always taken demand first, then supply, so `get` and `update`
/// see and commit both sides as one unit.
#[derive(Debug)]
pub struct OrderBook {
    demands: BookSide,
    supplies: BookSide,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_sides(BookSide::demand(), BookSide::supply())
    }

    pub fn with_sides(demands: BookSide, supplies: BookSide) -> Self {
        debug_assert_eq!(demands.side(), Side::Demand);
        debug_assert_eq!(supplies.side(), Side::Supply);
        Self { demands, supplies }
    }

    /// Both sides in their committed sorted order
    pub fn get(&self) -> (Arc<Vec<Order>>, Arc<Vec<Order>>) {
        let demands = self.demands.read();
        let supplies = self.supplies.read();
        (Arc::clone(&demands), Arc::clone(&supplies))
    }

    /// Apply a batch to each side.
    ///
    /// Both merges are computed before either is committed: if either side
    /// fails, neither side changes.
    pub fn update(&self, demands: Vec<Order>, supplies: Vec<Order>) -> Result<(), MergeError> {
        let mut demand_guard = self.demands.write();
        let mut supply_guard = self.supplies.write();

        let merged_demands = self.demands.merge_batch(&demand_guard, demands)?;
        let merged_supplies = self.supplies.merge_batch(&supply_guard, supplies)?;

        *demand_guard = Arc::new(merged_demands);
        *supply_guard = Arc::new(merged_supplies);
        Ok(())
    }

    pub fn demands(&self) -> &BookSide {
        &self.demands
    }

    pub fn supplies(&self) -> &BookSide {
        &self.supplies
    }

    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Demand => &self.demands,
            Side::Supply => &self.supplies,
        }
    }

    /// Consistent view of the top of both sides
    pub fn snapshot(&self) -> OrderBookSnapshot {
        let (demands, supplies) = self.get();
        OrderBookSnapshot::from_orders(&demands, &supplies)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Order Book Snapshot
// ============================================================================

/// Immutable summary of the order book state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBookSnapshot {
    /// Highest demand price
    pub best_demand: Option<Decimal>,
    /// Lowest supply price
    pub best_supply: Option<Decimal>,
    /// Best supply minus best demand
    pub spread: Option<Decimal>,
    pub demand_orders: usize,
    pub supply_orders: usize,
    pub demand_quantity: Decimal,
    pub supply_quantity: Decimal,
}

impl OrderBookSnapshot {
    pub fn from_orders(demands: &[Order], supplies: &[Order]) -> Self {
        let best_demand = demands.first().map(|o| o.price);
        let best_supply = supplies.first().map(|o| o.price);

        let spread = match (best_demand, best_supply) {
            (Some(demand), Some(supply)) => Some(supply - demand),
            _ => None,
        };

        Self {
            best_demand,
            best_supply,
            spread,
            demand_orders: demands.len(),
            supply_orders: supplies.len(),
            demand_quantity: demands.iter().map(|o| o.quantity).sum(),
            supply_quantity: supplies.iter().map(|o| o.quantity).sum(),
        }
    }

    /// True when the best demand meets or exceeds the best supply
    pub fn is_crossed(&self) -> bool {
        matches!(self.spread, Some(spread) if spread <= Decimal::ZERO)
    }
}
