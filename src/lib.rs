// ============================================================================
// Supply/Demand Ledger Library
// Event-sourced order book with comparator-sorted sides and price/time matching
// ============================================================================

//! # Supply/Demand Ledger
//!
//! A per-product ledger of outstanding supply (sell) and demand (buy) orders,
//! matched by price/time priority and rebuilt from an event log.
//!
//! ## Features
//!
//! - **Comparator-sorted book sides** merged incrementally in `O(n + m)`
//! - **Replacement semantics**: orders are values, fills replace them by id
//! - **All-or-nothing book updates** across both sides
//! - **Event sourcing**: every intent and trade is logged and replayable
//! - **Decimal arithmetic** for prices and quantities
//!
//! ## Example
//!
//! ```rust
//! use supply_demand_ledger::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let product = Product::new("p-1", "tomato");
//!
//! // Nothing to match against yet: the supply rests in the book
//! let outcome = product.submit_supply(Decimal::from(100), Decimal::from(7));
//! assert!(outcome.unwrap_err().is_no_match());
//!
//! // A crossing demand fills against it
//! let fills = product
//!     .submit_demand(Decimal::from(120), Decimal::from(5))
//!     .unwrap();
//! assert_eq!(fills[0].quantity(), Decimal::from(5));
//! assert_eq!(fills[0].price(), Decimal::from(100));
//!
//! product.record_trade(fills[0].clone()).unwrap();
//!
//! let snapshot = product.snapshot();
//! println!("Best supply: {:?}", snapshot.best_supply);
//! println!("Best demand: {:?}", snapshot.best_demand);
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod interfaces;

#[cfg(feature = "logging")]
pub mod logging;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        unzip_fills, BookSide, Comparator, DemandComparator, Fill, Order, OrderBook,
        OrderBookSnapshot, OrderId, ProductConfig, Side, SupplyComparator,
    };
    pub use crate::engine::{
        create_from_config, LedgerRepository, PriceTimePriority, Product, ProductBuilder,
    };
    pub use crate::error::{ComparatorError, ConfigError, LedgerError, MergeError};
    pub use crate::interfaces::{
        EventHandler, LedgerEvent, LoggingEventHandler, MatchingAlgorithm, NoOpEventHandler,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::domain;
    use super::prelude::*;
    use rust_decimal::Decimal;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn levels(orders: &[Order]) -> Vec<(Decimal, Decimal)> {
        orders.iter().map(|o| (o.price, o.quantity)).collect()
    }

    /// Demands {100 x 10, 200 x 11}, supplies {100 x 7, 200 x 3}
    fn seeded_product() -> Product {
        let product = Product::new("p-1", "tomato");
        let now = domain::next_timestamp();
        product
            .order_book()
            .update(
                vec![
                    Order::from_parts(OrderId::new(), Side::Demand, dec(100), dec(10), now),
                    Order::from_parts(OrderId::new(), Side::Demand, dec(200), dec(11), now),
                ],
                vec![
                    Order::from_parts(OrderId::new(), Side::Supply, dec(100), dec(7), now),
                    Order::from_parts(OrderId::new(), Side::Supply, dec(200), dec(3), now),
                ],
            )
            .unwrap();
        product
    }

    #[test]
    fn test_supply_without_match_rests() {
        let product = seeded_product();

        let err = product.submit_supply(dec(500), dec(10)).unwrap_err();
        assert!(err.is_no_match());

        let (demands, supplies) = product.order_book().get();
        assert_eq!(levels(&demands), vec![(dec(200), dec(11)), (dec(100), dec(10))]);
        assert_eq!(
            levels(&supplies),
            vec![(dec(100), dec(7)), (dec(200), dec(3)), (dec(500), dec(10))]
        );
    }

    #[test]
    fn test_supply_matches_best_demand() {
        let product = seeded_product();

        let fills = product.submit_supply(dec(100), dec(10)).unwrap();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].demand.price, dec(200));
        assert_eq!(fills[0].quantity(), dec(10));

        let (matched_demands, matched_supplies) = unzip_fills(&fills);
        assert_eq!(matched_demands[0].quantity, dec(10));
        assert_eq!(matched_supplies[0].quantity, dec(10));

        let (demands, supplies) = product.order_book().get();
        assert_eq!(levels(&demands), vec![(dec(200), dec(1)), (dec(100), dec(10))]);
        assert_eq!(levels(&supplies), vec![(dec(100), dec(7)), (dec(200), dec(3))]);
    }

    #[test]
    fn test_demand_without_match_rests() {
        let product = seeded_product();

        let err = product.submit_demand(dec(99), dec(10)).unwrap_err();
        assert!(err.is_no_match());

        let (demands, supplies) = product.order_book().get();
        assert_eq!(
            levels(&demands),
            vec![(dec(200), dec(11)), (dec(100), dec(10)), (dec(99), dec(10))]
        );
        assert_eq!(levels(&supplies), vec![(dec(100), dec(7)), (dec(200), dec(3))]);
    }

    #[test]
    fn test_demand_reduces_best_supply() {
        let product = seeded_product();

        let fills = product.submit_demand(dec(100), dec(6)).unwrap();
        assert_eq!(fills.len(), 1);

        let (demands, supplies) = product.order_book().get();
        assert_eq!(levels(&demands), vec![(dec(200), dec(11)), (dec(100), dec(10))]);
        assert_eq!(levels(&supplies), vec![(dec(100), dec(1)), (dec(200), dec(3))]);
    }

    #[test]
    fn test_end_to_end_ledger_replay() {
        let repo = LedgerRepository::new();
        let product = Product::new("p-1", "tomato");

        assert!(product.submit_supply(dec(500), dec(11)).unwrap_err().is_no_match());
        assert!(product.submit_supply(dec(100), dec(20)).unwrap_err().is_no_match());
        let fills = product.submit_demand(dec(200), dec(15)).unwrap();
        for fill in fills {
            product.record_trade(fill).unwrap();
        }
        repo.save(&product);

        let first = repo.get("p-1", "tomato").unwrap();
        let second = repo.get("p-1", "tomato").unwrap();

        assert_eq!(first.order_book().get(), second.order_book().get());
        assert_eq!(first.order_book().get(), product.order_book().get());
        assert_eq!(first.events(), product.events());
        assert_eq!(first.snapshot().best_supply, Some(dec(100)));
        assert_eq!(first.snapshot().supply_quantity, dec(16));
    }
}
