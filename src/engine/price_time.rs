// ============================================================================
// Price/Time Priority Matching Algorithm
// Best price first; the book side's own ordering breaks ties
// ============================================================================

use crate::domain::{Fill, Order, OrderBook, Side};
use crate::error::MergeError;
use crate::interfaces::MatchingAlgorithm;
use rust_decimal::Decimal;

/// Price/Time Priority matching algorithm
///
/// The incoming order is matched repeatedly against the most aggressively
/// priced eligible counter-order until it is exhausted or nothing crosses.
/// Among counter-orders at the same best price, the first one in the
/// opposite side's sorted order wins.
///
/// # Example
/// ```text
/// Demands: 200 x 11, 100 x 10
///
/// Incoming: Supply 10 @ 100
/// Result: 10 filled against the 200 demand, which keeps 1 resting
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceTimePriority;

impl PriceTimePriority {
    pub fn new() -> Self {
        Self
    }

    /// Most aggressively priced eligible counter-order, if any
    fn select_counter(&self, incoming: &Order, counters: &[Order]) -> Option<Order> {
        let mut best: Option<&Order> = None;

        for counter in counters {
            if !self.prices_cross(incoming, counter.price) {
                continue;
            }
            let improves = match best {
                None => true,
                Some(current) => match incoming.side {
                    Side::Supply => counter.price > current.price,
                    Side::Demand => counter.price < current.price,
                },
            };
            if improves {
                best = Some(counter);
            }
        }

        best.cloned()
    }

    /// Execute one match between `incoming` (carrying its remaining
    /// quantity) and `counter`, committing both replacements in one update.
    fn fulfill_order(
        &self,
        book: &OrderBook,
        incoming: &Order,
        counter: &Order,
    ) -> Result<Fill, MergeError> {
        let filled = counter.quantity.min(incoming.quantity);

        let counter_after = counter.with_quantity((counter.quantity - filled).max(Decimal::ZERO));
        let incoming_after =
            incoming.with_quantity((incoming.quantity - filled).max(Decimal::ZERO));

        let (demand, supply, demand_after, supply_after) = match incoming.side {
            Side::Supply => (counter, incoming, counter_after, incoming_after),
            Side::Demand => (incoming, counter, incoming_after, counter_after),
        };

        book.update(vec![demand_after], vec![supply_after])?;

        let fill = Fill::new(
            demand.with_quantity(filled),
            supply.with_quantity(filled),
            incoming.side,
        );

        tracing::debug!(
            demand = %demand.id,
            supply = %supply.id,
            quantity = %filled,
            price = %fill.price(),
            "orders matched"
        );

        Ok(fill)
    }
}

impl MatchingAlgorithm for PriceTimePriority {
    fn match_order(&self, incoming: &Order, book: &OrderBook) -> Result<Vec<Fill>, MergeError> {
        let mut fills = Vec::new();
        let mut remaining = incoming.quantity;

        while remaining > Decimal::ZERO {
            let counters = book.side(incoming.side.opposite()).get_orders();

            let counter = match self.select_counter(incoming, &counters) {
                Some(counter) => counter,
                None => break,
            };

            let fill = self.fulfill_order(book, &incoming.with_quantity(remaining), &counter)?;
            remaining -= fill.quantity();
            fills.push(fill);
        }

        Ok(fills)
    }

    fn name(&self) -> &str {
        "PriceTime"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderId;

    fn order(side: Side, price: i64, quantity: i64, timestamp: i64) -> Order {
        Order::from_parts(
            OrderId::new(),
            side,
            Decimal::from(price),
            Decimal::from(quantity),
            timestamp,
        )
    }

    /// Insert `incoming` into its own side, then match it
    fn submit(book: &OrderBook, incoming: &Order) -> Vec<Fill> {
        match incoming.side {
            Side::Supply => book.update(vec![], vec![incoming.clone()]).unwrap(),
            Side::Demand => book.update(vec![incoming.clone()], vec![]).unwrap(),
        }
        PriceTimePriority::new().match_order(incoming, book).unwrap()
    }

    fn seeded_book() -> OrderBook {
        let book = OrderBook::new();
        book.update(
            vec![
                order(Side::Demand, 100, 10, 1),
                order(Side::Demand, 200, 11, 1),
            ],
            vec![
                order(Side::Supply, 100, 7, 1),
                order(Side::Supply, 200, 3, 1),
            ],
        )
        .unwrap();
        book
    }

    fn levels(orders: &[Order]) -> Vec<(Decimal, Decimal)> {
        orders.iter().map(|o| (o.price, o.quantity)).collect()
    }

    fn level(price: i64, quantity: i64) -> (Decimal, Decimal) {
        (Decimal::from(price), Decimal::from(quantity))
    }

    #[test]
    fn test_best_price_wins_over_submission_order() {
        let book = OrderBook::new();
        let first = order(Side::Demand, 100, 5, 1);
        let better = order(Side::Demand, 200, 5, 2);
        book.update(vec![first, better.clone()], vec![]).unwrap();

        let fills = submit(&book, &order(Side::Supply, 100, 5, 3));

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].demand.id, better.id);
    }

    #[test]
    fn test_no_eligible_counter_order() {
        let book = seeded_book();
        let incoming = order(Side::Supply, 500, 10, 2);

        let fills = submit(&book, &incoming);

        assert!(fills.is_empty());
        let (demands, supplies) = book.get();
        assert_eq!(levels(&demands), vec![level(200, 11), level(100, 10)]);
        assert_eq!(
            levels(&supplies),
            vec![level(100, 7), level(200, 3), level(500, 10)]
        );
    }

    #[test]
    fn test_supply_fills_best_demand() {
        let book = seeded_book();
        let incoming = order(Side::Supply, 100, 10, 2);

        let fills = submit(&book, &incoming);

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].quantity(), Decimal::from(10));
        assert_eq!(fills[0].demand.price, Decimal::from(200));
        assert_eq!(fills[0].supply.id, incoming.id);

        let (demands, supplies) = book.get();
        assert_eq!(levels(&demands), vec![level(200, 1), level(100, 10)]);
        assert_eq!(levels(&supplies), vec![level(100, 7), level(200, 3)]);
    }

    #[test]
    fn test_demand_partially_fills_best_supply() {
        let book = seeded_book();
        let incoming = order(Side::Demand, 100, 6, 2);

        let fills = submit(&book, &incoming);

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].quantity(), Decimal::from(6));

        let (demands, supplies) = book.get();
        assert_eq!(levels(&demands), vec![level(200, 11), level(100, 10)]);
        assert_eq!(levels(&supplies), vec![level(100, 1), level(200, 3)]);
    }

    #[test]
    fn test_partial_fill_loop_exhausts_eligible_demand() {
        let book = OrderBook::new();
        book.update(
            vec![
                order(Side::Demand, 20, 90, 1),
                order(Side::Demand, 21, 20, 2),
                order(Side::Demand, 10, 50, 3),
            ],
            vec![],
        )
        .unwrap();

        let incoming = order(Side::Supply, 20, 130, 4);
        let fills = submit(&book, &incoming);

        let matched: Vec<_> = fills.iter().map(|f| (f.demand.price, f.quantity())).collect();
        assert_eq!(matched, vec![level(21, 20), level(20, 90)]);

        // the 10-priced demand is not eligible; the remainder rests
        let (demands, supplies) = book.get();
        assert_eq!(levels(&demands), vec![level(10, 50)]);
        assert_eq!(levels(&supplies), vec![level(20, 20)]);
        assert_eq!(supplies[0].id, incoming.id);
    }

    #[test]
    fn test_partial_fill_loop_exhausts_both_sides() {
        let book = OrderBook::new();
        book.update(
            vec![
                order(Side::Demand, 20, 90, 1),
                order(Side::Demand, 21, 20, 2),
            ],
            vec![],
        )
        .unwrap();

        let fills = submit(&book, &order(Side::Supply, 20, 110, 3));

        let matched: Vec<_> = fills.iter().map(|f| (f.demand.price, f.quantity())).collect();
        assert_eq!(matched, vec![level(21, 20), level(20, 90)]);

        let (demands, supplies) = book.get();
        assert!(demands.is_empty());
        assert!(supplies.is_empty());
    }

    #[test]
    fn test_partial_fill_loop_stops_when_incoming_exhausted() {
        let book = OrderBook::new();
        book.update(
            vec![
                order(Side::Demand, 20, 90, 1),
                order(Side::Demand, 21, 20, 2),
            ],
            vec![],
        )
        .unwrap();

        let fills = submit(&book, &order(Side::Supply, 20, 100, 3));

        let quantities: Vec<_> = fills.iter().map(Fill::quantity).collect();
        assert_eq!(quantities, vec![Decimal::from(20), Decimal::from(80)]);

        let (demands, supplies) = book.get();
        assert_eq!(levels(&demands), vec![level(20, 10)]);
        assert!(supplies.is_empty());
    }

    #[test]
    fn test_equal_best_price_uses_book_order() {
        let book = OrderBook::new();
        let later = order(Side::Supply, 50, 4, 9);
        let earlier = order(Side::Supply, 50, 4, 2);
        book.update(vec![], vec![later, earlier.clone()]).unwrap();

        let fills = submit(&book, &order(Side::Demand, 60, 4, 10));

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].supply.id, earlier.id);
        assert_eq!(fills[0].price(), Decimal::from(50));
    }

    #[test]
    fn test_fill_quantities_are_per_match() {
        let book = OrderBook::new();
        book.update(
            vec![],
            vec![order(Side::Supply, 10, 3, 1), order(Side::Supply, 11, 4, 2)],
        )
        .unwrap();

        let incoming = order(Side::Demand, 11, 5, 3);
        let fills = submit(&book, &incoming);

        assert_eq!(fills.len(), 2);
        for fill in &fills {
            assert_eq!(fill.demand.quantity, fill.supply.quantity);
            assert_eq!(fill.demand.id, incoming.id);
        }
        assert_eq!(fills[0].quantity(), Decimal::from(3));
        assert_eq!(fills[1].quantity(), Decimal::from(2));

        let (_, supplies) = book.get();
        assert_eq!(levels(&supplies), vec![level(11, 2)]);
    }

    #[test]
    fn test_prices_cross() {
        let algo = PriceTimePriority::new();
        let supply = order(Side::Supply, 100, 1, 1);
        let demand = order(Side::Demand, 100, 1, 1);

        assert!(algo.prices_cross(&supply, Decimal::from(100)));
        assert!(algo.prices_cross(&supply, Decimal::from(101)));
        assert!(!algo.prices_cross(&supply, Decimal::from(99)));

        assert!(algo.prices_cross(&demand, Decimal::from(100)));
        assert!(algo.prices_cross(&demand, Decimal::from(99)));
        assert!(!algo.prices_cross(&demand, Decimal::from(101)));
        assert_eq!(algo.name(), "PriceTime");
    }
}
