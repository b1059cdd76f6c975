// trolley/src/error.rs

use anyhow::Error as AnyhowError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrolleyError {
  #[error("Cart gateway call failed. Source: {source}")]
  GatewayFailure {
    #[source]
    source: AnyhowError,
  },

  #[error("Cart push did not complete within {after:?}")]
  PushTimeout { after: Duration },

  #[error("Cart hydration from the server failed. Source: {source}")]
  HydrationFailure {
    #[source]
    source: AnyhowError,
  },

  #[error("Table transport send failed. Source: {source}")]
  TransportFailure {
    #[source]
    source: AnyhowError,
  },
}

// This is the key conversion trolley provides for external errors.
// Whatever a user-provided gateway implementation returns is folded into
// GatewayFailure at the crate boundary; callers that need the transport
// flavour map explicitly.
impl From<AnyhowError> for TrolleyError {
  fn from(err: AnyhowError) -> Self {
    TrolleyError::GatewayFailure { source: err }
  }
}

pub type TrolleyResult<T, E = TrolleyError> = std::result::Result<T, E>;
