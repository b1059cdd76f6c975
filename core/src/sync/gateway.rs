// trolley/src/sync/gateway.rs

//! The remote cart gateway seam and its wire shapes.
//!
//! The backend owns the authoritative cart; this crate only talks to it
//! through [`CartGateway`]. Implementations wrap whatever HTTP client the
//! host app uses and may fail with any `anyhow::Error`; classification into
//! [`crate::TrolleyError`] happens on the caller's side.

use crate::cart::item::{CartItem, LineKey, OrderType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of the cart push endpoint: the full snapshot plus order context.
/// The branch rides along only for takeaway orders, where it selects which
/// location prepares the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPushRequest {
  pub items: HashMap<LineKey, CartItem>,
  pub order_type: OrderType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub branch: Option<String>,
}

/// Response of both the push and the read endpoint. The server may have
/// recomputed prices or dropped unavailable lines; its mapping wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPushResponse {
  pub items: HashMap<LineKey, CartItem>,
}

/// Client of the remote cart endpoints.
///
/// `push_cart` POSTs the full snapshot and returns the authoritative one;
/// `fetch_cart` GETs the server copy, used once at hydration.
#[async_trait]
pub trait CartGateway: Send + Sync {
  async fn push_cart(&self, request: CartPushRequest) -> anyhow::Result<CartPushResponse>;

  async fn fetch_cart(&self) -> anyhow::Result<CartPushResponse>;
}
