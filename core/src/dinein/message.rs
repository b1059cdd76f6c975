// trolley/src/dinein/message.rs

//! Wire shapes for the dine-in table channel.
//!
//! Dine-in items are shared state across every device at a table, so unlike
//! the private delivery/takeaway cart they carry attribution, a lifecycle
//! status, and a tombstone flag. The socket envelope is `{"type", "data"}`
//! with camelCase payload fields, matching the backend's channel protocol.

use crate::cart::item::CartItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Lifecycle of one shared table item as the kitchen works it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableItemStatus {
  Pending,
  Accepted,
  Preparing,
  Served,
}

/// Who put an item on the table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
  pub id: i64,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  /// Participant type as the backend defines it (e.g. "customer", "waiter").
  #[serde(rename = "type")]
  pub kind: String,
}

/// One item of a shared table order. Mirrors [`CartItem`] plus the shared
/// state the private cart never needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItem {
  #[serde(flatten)]
  pub item: CartItem,
  /// Client timestamp in milliseconds, stamped when the message is prepared.
  pub epoch: u64,
  pub status: TableItemStatus,
  /// Tombstone: removed items are broadcast as deleted rather than dropped,
  /// so every device converges on the same view.
  #[serde(default)]
  pub deleted: bool,
  pub added_by: Attribution,
}

/// Outbound channel message.
///
/// `UpdateItem` serializes as
/// `{"type":"updateItem","data":{"tableName":...,"item":{"<uuid>":{...}}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum TableMessage {
  #[serde(rename_all = "camelCase")]
  UpdateItem {
    table_name: String,
    item: HashMap<Uuid, TableItem>,
  },
}

/// Inbound channel event. Ordering, delivery guarantees, and reconnection
/// are the transport's business; this crate only defines the shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ChannelEvent {
  /// Driver position while an order is out for delivery.
  #[serde(rename = "onLocationUpdate")]
  LocationUpdate { lat: f64, long: f64 },
  /// Full authoritative state of the table, pushed by the server to all
  /// connected devices.
  #[serde(rename_all = "camelCase")]
  TableState {
    table_name: String,
    item: HashMap<Uuid, TableItem>,
  },
}
