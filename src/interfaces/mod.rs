// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod matching_algorithm;

pub use event_handler::{
    EventHandler, Intent, LedgerEvent, LoggingEventHandler, NoOpEventHandler, TradeRecord,
};
pub use matching_algorithm::MatchingAlgorithm;
