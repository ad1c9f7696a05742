// ============================================================================
// Ledger Repository
// In-memory event store; products are rebuilt by replaying their events
// ============================================================================

use crate::domain::ProductConfig;
use crate::error::LedgerError;
use crate::interfaces::{LedgerEvent, NoOpEventHandler};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::{PriceTimePriority, Product};

/// In-memory store of each product's event log, keyed by product id
#[derive(Debug, Default)]
pub struct LedgerRepository {
    ledger: RwLock<HashMap<String, Vec<LedgerEvent>>>,
}

impl LedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of the product's current event log
    pub fn save(&self, product: &Product) {
        let events = product.events();
        tracing::info!(product = product.id(), events = events.len(), "product saved");
        self.ledger.write().insert(product.id().to_string(), events);
    }

    /// Rebuild a product by replaying its stored events in order.
    ///
    /// An id with no stored events yields an empty product.
    pub fn get(&self, id: &str, name: &str) -> Result<Product, LedgerError> {
        self.get_with_config(ProductConfig::new(id, name))
    }

    /// Same as [`get`](Self::get) but with a full configuration
    pub fn get_with_config(&self, config: ProductConfig) -> Result<Product, LedgerError> {
        let events = self.events(&config.product_id);
        let product = Product::with_parts(
            config,
            Box::new(PriceTimePriority::new()),
            Arc::new(NoOpEventHandler),
        );
        product.replay(&events)?;
        Ok(product)
    }

    /// Stored events for a product, empty when unknown
    pub fn events(&self, id: &str) -> Vec<LedgerEvent> {
        self.ledger.read().get(id).cloned().unwrap_or_default()
    }

    /// Ids of every stored product, sorted
    pub fn products(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ledger.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_save_and_get() {
        let product = Product::new("p-1", "tomato");

        assert!(product.submit_supply(dec(500), dec(11)).unwrap_err().is_no_match());
        assert!(product.submit_supply(dec(100), dec(20)).unwrap_err().is_no_match());
        assert!(product.submit_demand(dec(200), dec(15)).is_ok());
        let fills = product.submit_demand(dec(100), dec(20)).unwrap();
        product.record_trade(fills[0].clone()).unwrap();

        let repo = LedgerRepository::new();
        repo.save(&product);

        let restored = repo.get("p-1", "tomato").unwrap();
        let kinds: Vec<_> = restored.events().iter().map(LedgerEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "SupplyIntent",
                "SupplyIntent",
                "DemandIntent",
                "DemandIntent",
                "TradeRecord"
            ]
        );
        assert_eq!(restored.order_book().get(), product.order_book().get());
        assert_eq!(repo.products(), vec!["p-1".to_string()]);
    }

    #[test]
    fn test_get_unknown_product_is_empty() {
        let repo = LedgerRepository::new();
        let product = repo.get("missing", "nothing").unwrap();

        assert!(product.events().is_empty());
        assert!(product.order_book().demands().is_empty());
        assert!(product.order_book().supplies().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_log() {
        let repo = LedgerRepository::new();
        let product = Product::new("p-1", "tomato");

        let _ = product.submit_supply(dec(100), dec(1));
        repo.save(&product);
        let _ = product.submit_supply(dec(101), dec(1));
        repo.save(&product);

        assert_eq!(repo.events("p-1").len(), 2);
    }

    #[test]
    fn test_replay_rejects_foreign_events() {
        let repo = LedgerRepository::new();
        let product = Product::new("p-1", "tomato");
        let _ = product.submit_supply(dec(100), dec(1));
        repo.save(&product);

        let result = repo.get("p-1", "potato");
        assert!(matches!(result, Err(LedgerError::ProductMismatch { .. })));
    }
}
