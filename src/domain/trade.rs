// ============================================================================
// Fill Domain Model
// ============================================================================

use rust_decimal::Decimal;
use std::fmt;

use super::{Order, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One match between a demand and a supply order.
///
/// Both orders carry the quantity exchanged in this match, not what was
/// left resting afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fill {
    pub demand: Order,
    pub supply: Order,
    /// Side of the incoming order that triggered the match
    pub aggressor: Side,
}

impl Fill {
    pub fn new(demand: Order, supply: Order, aggressor: Side) -> Self {
        debug_assert_eq!(demand.quantity, supply.quantity);
        Self {
            demand,
            supply,
            aggressor,
        }
    }

    pub fn quantity(&self) -> Decimal {
        self.demand.quantity
    }

    /// Price of the order that was resting when the match happened
    pub fn price(&self) -> Decimal {
        match self.aggressor {
            Side::Supply => self.demand.price,
            Side::Demand => self.supply.price,
        }
    }

    /// Price times quantity, `None` on overflow
    pub fn notional_value(&self) -> Option<Decimal> {
        self.price().checked_mul(self.quantity())
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} (demand {}, supply {})",
            self.quantity(),
            self.price(),
            self.demand.id,
            self.supply.id
        )
    }
}

/// Split fills into matched demands and matched supplies, in match order
pub fn unzip_fills(fills: &[Fill]) -> (Vec<Order>, Vec<Order>) {
    fills
        .iter()
        .map(|fill| (fill.demand.clone(), fill.supply.clone()))
        .unzip()
}
