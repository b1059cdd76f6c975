// trolley/src/cart/state.rs

//! The cart aggregate and its pure reducer.
//!
//! `CartState::apply` is the only writer of the item mapping. It performs no
//! I/O and never fails: operations addressing an absent key are no-ops, not
//! errors. The outcome of each application is reported as [`Applied`] so a
//! stale operation (e.g. a quantity change racing a rollback that already
//! removed the line) is observable instead of silently vanishing.

use crate::cart::command::CartCommand;
use crate::cart::item::{CartItem, LineKey, OrderType};
use std::collections::HashMap;

/// Outcome of applying one command to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
  /// A new line was created under this key.
  Inserted(LineKey),
  /// The state changed (mapping or context fields).
  Changed,
  /// Nothing changed; for dirtying commands this signals a stale key.
  Unchanged,
}

impl Applied {
  pub fn changed(&self) -> bool {
    !matches!(self, Applied::Unchanged)
  }
}

/// The cart aggregate: the item mapping plus sync flag and order context.
///
/// The mapping is the single source of truth for what the client renders;
/// the server copy is consulted only at hydration and after a push resolves.
#[derive(Debug, Clone, Default)]
pub struct CartState {
  pub items: HashMap<LineKey, CartItem>,
  /// True while a push to the server is queued or in flight. Purely a UI
  /// signal (e.g. disabling checkout); never gates local mutation.
  pub syncing: bool,
  pub order_type: OrderType,
  pub branch_name: Option<String>,
}

impl CartState {
  pub fn new(order_type: OrderType) -> Self {
    CartState {
      order_type,
      ..Default::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Applies one command, returning what happened.
  pub fn apply(&mut self, command: CartCommand) -> Applied {
    match command {
      CartCommand::AddItem(item) => {
        let key = LineKey::generate();
        // The command owns its payload, so the stored line never aliases
        // caller-owned data.
        self.items.insert(key, item);
        Applied::Inserted(key)
      }
      CartCommand::UpdateItem(key, item) => {
        if let Some(slot) = self.items.get_mut(&key) {
          *slot = item;
          Applied::Changed
        } else {
          Applied::Unchanged
        }
      }
      CartCommand::IncreaseQuantity(key) => {
        if let Some(line) = self.items.get_mut(&key) {
          line.quantity += 1;
          Applied::Changed
        } else {
          Applied::Unchanged
        }
      }
      CartCommand::DecreaseQuantity(key) => {
        match self.items.get_mut(&key) {
          Some(line) if line.quantity > 1 => {
            line.quantity -= 1;
            Applied::Changed
          }
          // Quantity 1: the line goes away rather than reaching 0.
          Some(_) => {
            self.items.remove(&key);
            Applied::Changed
          }
          None => Applied::Unchanged,
        }
      }
      CartCommand::RemoveItem(key) => {
        if self.items.remove(&key).is_some() {
          Applied::Changed
        } else {
          Applied::Unchanged
        }
      }
      CartCommand::Clear => {
        if self.items.is_empty() {
          Applied::Unchanged
        } else {
          self.items.clear();
          Applied::Changed
        }
      }
      CartCommand::SetFromFetch(items) => {
        self.items = items;
        Applied::Changed
      }
      CartCommand::SetSyncing(flag) => {
        if self.syncing == flag {
          Applied::Unchanged
        } else {
          self.syncing = flag;
          Applied::Changed
        }
      }
      CartCommand::SetOrderType(order_type) => {
        self.order_type = order_type;
        Applied::Changed
      }
      CartCommand::SetBranchName(branch) => {
        self.branch_name = branch;
        Applied::Changed
      }
    }
  }
}
