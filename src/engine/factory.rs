// ============================================================================
// Product Factory
// Creates products with proper configuration
// ============================================================================

use crate::domain::ProductConfig;
use crate::engine::{PriceTimePriority, Product};
use crate::error::ConfigError;
use crate::interfaces::{EventHandler, MatchingAlgorithm, NoOpEventHandler};
use rust_decimal::Decimal;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a product from configuration
///
/// # Arguments
/// * `config` - Product configuration
/// * `event_handler` - Handler notified of every recorded event
///
/// # Example
/// ```
/// use supply_demand_ledger::prelude::*;
/// use std::sync::Arc;
///
/// let config = ProductConfig::new("p-1", "tomato");
/// let product = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(product.name(), "tomato");
/// ```
pub fn create_from_config(
    config: ProductConfig,
    event_handler: Arc<dyn EventHandler>,
) -> Result<Product, ConfigError> {
    config.validate()?;

    Ok(Product::with_parts(
        config,
        Box::new(PriceTimePriority::new()),
        event_handler,
    ))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating products with fluent API
///
/// # Example
/// ```
/// use supply_demand_ledger::prelude::*;
/// use std::sync::Arc;
/// use rust_decimal::Decimal;
///
/// let product = ProductBuilder::new("p-1", "tomato")
///     .with_tick_size(Decimal::new(1, 2))
///     .with_event_handler(Arc::new(LoggingEventHandler))
///     .build()
///     .unwrap();
/// assert_eq!(product.algorithm_name(), "PriceTime");
/// ```
pub struct ProductBuilder {
    config: ProductConfig,
    algorithm: Option<Box<dyn MatchingAlgorithm>>,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl ProductBuilder {
    /// Create a new builder for the specified product
    pub fn new(product_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            config: ProductConfig::new(product_id, name),
            algorithm: None,
            event_handler: None,
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: ProductConfig) -> Self {
        Self {
            config,
            algorithm: None,
            event_handler: None,
        }
    }

    pub fn with_tick_size(mut self, tick: Decimal) -> Self {
        self.config = self.config.with_tick_size(tick);
        self
    }

    pub fn with_lot_size(mut self, lot: Decimal) -> Self {
        self.config = self.config.with_lot_size(lot);
        self
    }

    /// Replace the default price/time matching
    pub fn with_algorithm(mut self, algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Get the current configuration (for inspection)
    pub fn config(&self) -> &ProductConfig {
        &self.config
    }

    /// Build the product
    pub fn build(self) -> Result<Product, ConfigError> {
        self.config.validate()?;

        Ok(Product::with_parts(
            self.config,
            self.algorithm
                .unwrap_or_else(|| Box::new(PriceTimePriority::new())),
            self.event_handler
                .unwrap_or_else(|| Arc::new(NoOpEventHandler)),
        ))
    }
}
