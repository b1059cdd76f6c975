// trolley/src/dinein/channel.rs

//! Seams the dine-in session depends on: the socket transport that carries
//! table messages, and a clock so epoch stamping is deterministic in tests.

use crate::dinein::message::TableMessage;
use async_trait::async_trait;
use std::time::{SystemTime, UNIX_EPOCH};

/// Sender half of the table socket. Implementations wrap whatever socket
/// client the host app uses; delivery and reconnection policy live there.
#[async_trait]
pub trait TableTransport: Send + Sync {
  async fn send(&self, message: TableMessage) -> anyhow::Result<()>;
}

/// Source of client timestamps, in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
  fn now_millis(&self) -> u64;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_millis(&self) -> u64 {
    SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|elapsed| elapsed.as_millis() as u64)
      .unwrap_or(0)
  }
}
