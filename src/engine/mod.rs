// ============================================================================
// Engine Module
// Contains the core matching and ledger business logic
// ============================================================================

mod ledger;
mod price_time;
mod product;

pub mod factory;

pub use factory::{create_from_config, ProductBuilder};
pub use ledger::LedgerRepository;
pub use price_time::PriceTimePriority;
pub use product::Product;
