// ============================================================================
// Basic Usage Example
// ============================================================================

use rust_decimal::Decimal;
use std::sync::Arc;
use supply_demand_ledger::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    supply_demand_ledger::logging::init(tracing::Level::DEBUG);

    println!("=== Supply/Demand Ledger Example ===\n");

    let product = ProductBuilder::new("p-1", "tomato")
        .with_tick_size(Decimal::ONE)
        .with_event_handler(Arc::new(LoggingEventHandler))
        .build()
        .expect("valid product configuration");

    println!("Created product {} ({})\n", product.name(), product.algorithm_name());

    // Supplies at increasing prices; nothing to match yet
    println!("Adding supply...");
    for i in 0i64..5 {
        let price = Decimal::from(100 + i * 10);
        let quantity = Decimal::from(5 + i);
        if let Err(err) = product.submit_supply(price, quantity) {
            println!("  {}", err);
        }
    }

    // Demands below the cheapest supply rest as well
    println!("Adding demand...");
    for i in 0i64..3 {
        let price = Decimal::from(90 - i * 5);
        if let Err(err) = product.submit_demand(price, Decimal::from(4)) {
            println!("  {}", err);
        }
    }

    print_snapshot(&product.snapshot());

    // A demand crossing the first two supply prices
    println!("\n=== Submitting Crossing Demand ===");
    match product.submit_demand(Decimal::from(110), Decimal::from(8)) {
        Ok(fills) => {
            for fill in fills {
                println!("  Fill: {}", fill);
                if let Err(err) = product.record_trade(fill) {
                    println!("  could not record trade: {}", err);
                }
            }
        },
        Err(err) => println!("  {}", err),
    }

    print_snapshot(&product.snapshot());

    // Persist the log and rebuild the product from it
    println!("\n=== Replaying Ledger ===");
    let repo = LedgerRepository::new();
    repo.save(&product);

    match repo.get("p-1", "tomato") {
        Ok(restored) => {
            println!("Replayed {} events", restored.events().len());
            for event in restored.events() {
                println!("  {}", event);
            }
            println!(
                "Books identical after replay: {}",
                restored.order_book().get() == product.order_book().get()
            );
        },
        Err(err) => println!("Replay failed: {}", err),
    }
}

fn print_snapshot(snapshot: &OrderBookSnapshot) {
    println!("\n=== Order Book Snapshot ===");
    println!("\nDemand ({} orders):", snapshot.demand_orders);
    println!("  best {:?}, total {}", snapshot.best_demand, snapshot.demand_quantity);
    println!("\nSupply ({} orders):", snapshot.supply_orders);
    println!("  best {:?}, total {}", snapshot.best_supply, snapshot.supply_quantity);
    println!("\nSpread: {:?}", snapshot.spread);
}
