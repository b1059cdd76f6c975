// trolley/src/cart/command.rs

//! The closed set of cart state transitions.
//!
//! Every mutation of the cart goes through a `CartCommand`; classification of
//! which commands require a server sync lives in one exhaustive match, so a
//! new variant cannot be added without deciding whether it dirties the cart.

use crate::cart::item::{CartItem, LineKey, OrderType};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum CartCommand {
  /// Inserts a new line under a freshly generated key.
  AddItem(CartItem),
  /// Replaces the line at the key, only if it exists.
  UpdateItem(LineKey, CartItem),
  IncreaseQuantity(LineKey),
  /// Decrements quantity; removes the line when quantity is already 1.
  DecreaseQuantity(LineKey),
  RemoveItem(LineKey),
  Clear,
  /// Wholesale replacement of the mapping with the server's canonical
  /// key->item view. The reconciliation and rollback primitive.
  SetFromFetch(HashMap<LineKey, CartItem>),
  SetSyncing(bool),
  SetOrderType(OrderType),
  SetBranchName(Option<String>),
}

impl CartCommand {
  /// Whether this command changes the item mapping and therefore requires a
  /// debounced push to the server.
  ///
  /// `SetFromFetch` is deliberately NOT dirtying: it is how server state
  /// re-enters the client, and marking it dirty would make every rollback
  /// schedule another push.
  pub fn is_dirtying(&self) -> bool {
    match self {
      CartCommand::AddItem(_)
      | CartCommand::UpdateItem(_, _)
      | CartCommand::IncreaseQuantity(_)
      | CartCommand::DecreaseQuantity(_)
      | CartCommand::RemoveItem(_)
      | CartCommand::Clear => true,
      CartCommand::SetFromFetch(_)
      | CartCommand::SetSyncing(_)
      | CartCommand::SetOrderType(_)
      | CartCommand::SetBranchName(_) => false,
    }
  }

  /// Short stable name for tracing fields.
  pub fn name(&self) -> &'static str {
    match self {
      CartCommand::AddItem(_) => "add_item",
      CartCommand::UpdateItem(_, _) => "update_item",
      CartCommand::IncreaseQuantity(_) => "increase_quantity",
      CartCommand::DecreaseQuantity(_) => "decrease_quantity",
      CartCommand::RemoveItem(_) => "remove_item",
      CartCommand::Clear => "clear",
      CartCommand::SetFromFetch(_) => "set_from_fetch",
      CartCommand::SetSyncing(_) => "set_syncing",
      CartCommand::SetOrderType(_) => "set_order_type",
      CartCommand::SetBranchName(_) => "set_branch_name",
    }
  }
}
