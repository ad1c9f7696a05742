// ============================================================================
// Product
// Event log plus the order book rebuilt from it
// ============================================================================

use crate::domain::{Fill, OrderBook, OrderBookSnapshot, OrderId, ProductConfig, Side};
use crate::error::LedgerError;
use crate::interfaces::{EventHandler, LedgerEvent, MatchingAlgorithm, NoOpEventHandler};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::PriceTimePriority;

impl LedgerEvent {
    /// Apply this event to a product's order book.
    ///
    /// Intents insert their order and run the matching algorithm; an intent
    /// that matches nothing leaves its order resting and reports
    /// [`LedgerError::NoMatch`]. Trade records leave the book untouched.
    pub fn apply(
        &self,
        book: &OrderBook,
        algorithm: &dyn MatchingAlgorithm,
    ) -> Result<Vec<Fill>, LedgerError> {
        let (order, demands, supplies) = match self {
            LedgerEvent::SupplyIntent(intent) => {
                let order = intent.order(Side::Supply);
                (order.clone(), Vec::new(), vec![order])
            },
            LedgerEvent::DemandIntent(intent) => {
                let order = intent.order(Side::Demand);
                (order.clone(), vec![order], Vec::new())
            },
            LedgerEvent::TradeRecord(_) => return Ok(Vec::new()),
        };

        book.update(demands, supplies)?;

        let fills = algorithm.match_order(&order, book)?;
        if fills.is_empty() {
            return Err(LedgerError::NoMatch { order_id: order.id });
        }
        Ok(fills)
    }
}

/// Recorded events plus the ids of every order an intent has placed
#[derive(Debug, Default)]
struct EventLog {
    events: Vec<LedgerEvent>,
    order_ids: HashSet<OrderId>,
}

impl EventLog {
    fn push(&mut self, event: LedgerEvent) {
        if let Some(intent) = event.intent() {
            self.order_ids.insert(intent.order_id);
        }
        self.events.push(event);
    }
}

/// A product ledger: the ordered event log and the current order book.
///
/// Applying and recording an event happen under one lock, so the log order
/// is always the order in which events reached the book.
pub struct Product {
    config: ProductConfig,
    log: Mutex<EventLog>,
    book: OrderBook,
    algorithm: Box<dyn MatchingAlgorithm>,
    event_handler: Arc<dyn EventHandler>,
}

impl Product {
    /// Product with price/time matching and no event handler
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_parts(
            ProductConfig::new(id, name),
            Box::new(PriceTimePriority::new()),
            Arc::new(NoOpEventHandler),
        )
    }

    pub(crate) fn with_parts(
        config: ProductConfig,
        algorithm: Box<dyn MatchingAlgorithm>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            config,
            log: Mutex::new(EventLog::default()),
            book: OrderBook::new(),
            algorithm,
            event_handler,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.product_id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ProductConfig {
        &self.config
    }

    /// Offer `quantity` at `price`.
    ///
    /// Returns the fills it produced, or [`LedgerError::NoMatch`] when it
    /// found no demand and now rests in the book.
    pub fn submit_supply(
        &self,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<Vec<Fill>, LedgerError> {
        self.add_event(LedgerEvent::supply(self.name(), price, quantity))
    }

    /// Bid for `quantity` at `price`.
    ///
    /// Returns the fills it produced, or [`LedgerError::NoMatch`] when it
    /// found no supply and now rests in the book.
    pub fn submit_demand(
        &self,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<Vec<Fill>, LedgerError> {
        self.add_event(LedgerEvent::demand(self.name(), price, quantity))
    }

    /// Record a fill in the log for audit
    pub fn record_trade(&self, fill: Fill) -> Result<(), LedgerError> {
        self.add_event(LedgerEvent::trade(self.name(), fill)).map(|_| ())
    }

    /// Apply `event` and append it to the log.
    ///
    /// Intents are checked against the product configuration and must carry
    /// an order id not yet in the log. A no-match outcome is still recorded
    /// and then returned; any other failure leaves the log unchanged.
    pub fn add_event(&self, event: LedgerEvent) -> Result<Vec<Fill>, LedgerError> {
        let result = self.record(event, true);
        if let Err(err) = &result {
            if !err.is_no_match() {
                tracing::warn!(product = self.id(), error = %err, "event rejected");
            }
        }
        result
    }

    /// Rebuild state from a recorded log without notifying the event handler
    pub(crate) fn replay(&self, events: &[LedgerEvent]) -> Result<(), LedgerError> {
        for event in events {
            match self.record(event.clone(), false) {
                Ok(_) => {},
                Err(err) if err.is_no_match() => {},
                Err(err) => return Err(err),
            }
        }
        tracing::info!(product = self.id(), events = events.len(), "product replayed");
        Ok(())
    }

    fn record(&self, event: LedgerEvent, notify: bool) -> Result<Vec<Fill>, LedgerError> {
        if event.product() != self.name() {
            return Err(LedgerError::ProductMismatch {
                product: self.name().to_string(),
                event_product: event.product().to_string(),
            });
        }

        if let Some(intent) = event.intent() {
            self.validate(intent.price, intent.quantity)?;
        }

        let mut log = self.log.lock();
        if let Some(intent) = event.intent() {
            if log.order_ids.contains(&intent.order_id) {
                return Err(LedgerError::DuplicateOrder {
                    order_id: intent.order_id,
                });
            }
        }

        let result = event.apply(&self.book, self.algorithm.as_ref());

        let recorded = match &result {
            Ok(_) => true,
            Err(err) => err.is_no_match(),
        };
        if !recorded {
            return result;
        }

        if notify {
            tracing::info!(product = self.id(), kind = event.kind(), "event recorded");
            self.event_handler.on_event(&event);
        }
        log.push(event);
        result
    }

    fn validate(&self, price: Decimal, quantity: Decimal) -> Result<(), LedgerError> {
        self.config
            .check_order(price, quantity)
            .map_err(|reason| LedgerError::InvalidOrder { reason })
    }

    /// Copy of the event log in application order
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.log.lock().events.clone()
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.book
    }

    pub fn snapshot(&self) -> OrderBookSnapshot {
        self.book.snapshot()
    }

    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    /// Event log as a JSON array
    #[cfg(feature = "serde")]
    pub fn export_events_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.log.lock().events)
    }
}

impl std::fmt::Debug for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Product")
            .field("config", &self.config)
            .field("events", &self.log.lock().events.len())
            .field("book", &self.book)
            .field("algorithm", &self.algorithm.name())
            .finish()
    }
}
