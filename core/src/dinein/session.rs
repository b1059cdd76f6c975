// trolley/src/dinein/session.rs

//! A device's participation in one shared table order.
//!
//! There is no local optimistic cart here: every edit is emitted onto the
//! channel and the table's authoritative state comes back from the server as
//! a [`crate::dinein::ChannelEvent::TableState`] push to all devices.

use crate::dinein::channel::{Clock, TableTransport};
use crate::dinein::message::{Attribution, TableItem, TableItemStatus, TableMessage};
use crate::cart::item::CartItem;
use crate::error::{TrolleyError, TrolleyResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

pub struct TableSession {
  table_name: String,
  participant: Attribution,
  transport: Arc<dyn TableTransport>,
  clock: Arc<dyn Clock>,
}

impl TableSession {
  pub fn new(
    table_name: impl Into<String>,
    participant: Attribution,
    transport: Arc<dyn TableTransport>,
    clock: Arc<dyn Clock>,
  ) -> Self {
    TableSession {
      table_name: table_name.into(),
      participant,
      transport,
      clock,
    }
  }

  pub fn table_name(&self) -> &str {
    &self.table_name
  }

  /// Puts a new item on the table order. Returns the uuid the item was keyed
  /// by, which later updates and removals must reuse.
  #[instrument(name = "TableSession::add_item", skip_all, fields(table = %self.table_name), err(Display))]
  pub async fn add_item(&self, item: CartItem) -> TrolleyResult<Uuid> {
    let uuid = Uuid::new_v4();
    let prepared = self.prepare(item, TableItemStatus::Pending, false);
    self.emit(uuid, prepared).await?;
    Ok(uuid)
  }

  /// Re-announces an existing item with new contents and/or status.
  #[instrument(name = "TableSession::update_item", skip_all, fields(table = %self.table_name, %uuid), err(Display))]
  pub async fn update_item(&self, uuid: Uuid, item: CartItem, status: TableItemStatus) -> TrolleyResult<()> {
    let prepared = self.prepare(item, status, false);
    self.emit(uuid, prepared).await
  }

  /// Removes an item by broadcasting its tombstone. The item itself is kept
  /// in the message so other devices can still render what was withdrawn.
  #[instrument(name = "TableSession::remove_item", skip_all, fields(table = %self.table_name, %uuid), err(Display))]
  pub async fn remove_item(&self, uuid: Uuid, item: CartItem, status: TableItemStatus) -> TrolleyResult<()> {
    let prepared = self.prepare(item, status, true);
    self.emit(uuid, prepared).await
  }

  fn prepare(&self, item: CartItem, status: TableItemStatus, deleted: bool) -> TableItem {
    TableItem {
      item,
      epoch: self.clock.now_millis(),
      status,
      deleted,
      added_by: self.participant.clone(),
    }
  }

  async fn emit(&self, uuid: Uuid, prepared: TableItem) -> TrolleyResult<()> {
    let mut item = HashMap::with_capacity(1);
    item.insert(uuid, prepared);
    let message = TableMessage::UpdateItem {
      table_name: self.table_name.clone(),
      item,
    };
    event!(Level::DEBUG, table = %self.table_name, %uuid, "Emitting table item update.");
    self
      .transport
      .send(message)
      .await
      .map_err(|source| TrolleyError::TransportFailure { source })
  }
}
