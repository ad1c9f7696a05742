// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod book_side;
pub mod comparator;
pub mod config;
pub mod order;
pub mod order_book;
pub mod trade;

pub use book_side::BookSide;
pub use comparator::{Comparator, DemandComparator, SupplyComparator};
pub use config::ProductConfig;
pub use order::{next_timestamp, Order, OrderId, Side};
pub use order_book::{OrderBook, OrderBookSnapshot};
pub use trade::{unzip_fills, Fill};
