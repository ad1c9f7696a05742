// ============================================================================
// Product Configuration
// ============================================================================

use crate::error::ConfigError;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one product ledger
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductConfig {
    /// Key under which the product's events are stored
    pub product_id: String,

    /// Human-readable product name (e.g. "tomato")
    pub name: String,

    /// Optional: Price tick size (minimum price increment)
    /// None means no tick size enforcement
    pub tick_size: Option<Decimal>,

    /// Optional: Lot size (minimum quantity increment)
    /// None means no lot size enforcement
    pub lot_size: Option<Decimal>,
}

impl ProductConfig {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            tick_size: None,
            lot_size: None,
        }
    }

    /// Builder method: Set price tick size
    pub fn with_tick_size(mut self, tick: Decimal) -> Self {
        self.tick_size = Some(tick);
        self
    }

    /// Builder method: Set lot size
    pub fn with_lot_size(mut self, lot: Decimal) -> Self {
        self.lot_size = Some(lot);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.product_id.is_empty() {
            return Err(ConfigError::EmptyProductId);
        }
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        if let Some(tick) = self.tick_size {
            if tick <= Decimal::ZERO {
                return Err(ConfigError::InvalidTickSize(tick));
            }
        }

        if let Some(lot) = self.lot_size {
            if lot <= Decimal::ZERO {
                return Err(ConfigError::InvalidLotSize(lot));
            }
        }

        Ok(())
    }

    /// Check a price and quantity against the product's increments.
    ///
    /// Returns a human-readable reason on rejection.
    pub fn check_order(&self, price: Decimal, quantity: Decimal) -> Result<(), String> {
        if price <= Decimal::ZERO {
            return Err(format!("price must be positive, got {}", price));
        }
        if quantity <= Decimal::ZERO {
            return Err(format!("quantity must be positive, got {}", quantity));
        }

        if let Some(tick) = self.tick_size {
            if !(price % tick).is_zero() {
                return Err(format!("price {} is not a multiple of tick size {}", price, tick));
            }
        }

        if let Some(lot) = self.lot_size {
            if !(quantity % lot).is_zero() {
                return Err(format!(
                    "quantity {} is not a multiple of lot size {}",
                    quantity, lot
                ));
            }
        }

        Ok(())
    }
}
