// ============================================================================
// Logging Setup
// tracing-subscriber initialisation for binaries and demos
// ============================================================================

use tracing::Level;

/// Install a global fmt subscriber reporting events up to `max_level`.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(true)
        .try_init();
}
