// trolley/src/sync/config.rs

use std::time::Duration;

/// Timing knobs for the sync coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
  /// Trailing debounce window: a push fires only after this much quiet time
  /// since the last dirtying command. Repeated edits restart the window.
  pub debounce: Duration,
  /// Hard ceiling on one push request. A push still in flight when this
  /// elapses is treated as failed and rolled back; without it a hung request
  /// would leave the syncing flag raised indefinitely.
  pub push_timeout: Duration,
}

impl Default for SyncConfig {
  fn default() -> Self {
    SyncConfig {
      debounce: Duration::from_millis(500),
      push_timeout: Duration::from_secs(15),
    }
  }
}
