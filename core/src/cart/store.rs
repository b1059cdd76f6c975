// trolley/src/cart/store.rs

use crate::cart::command::CartCommand;
use crate::cart::item::{CartItem, LineKey, OrderType};
use crate::cart::state::{Applied, CartState};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

/// Shared handle to the cart state, providing shared ownership and interior
/// mutability via parking_lot::RwLock.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points in asynchronous code.
#[derive(Debug)]
pub struct CartStore(Arc<RwLock<CartState>>);

impl CartStore {
  pub fn new(state: CartState) -> Self {
    CartStore(Arc::new(RwLock::new(state)))
  }

  /// Acquires a read lock.
  /// The returned guard MUST be dropped before any `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, CartState> {
    self.0.read()
  }

  /// Acquires a write lock.
  /// The returned guard MUST be dropped before any `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, CartState> {
    self.0.write()
  }

  // Guard to just the item mapping, for render paths that only list lines.
  pub fn items(&self) -> MappedRwLockReadGuard<'_, HashMap<LineKey, CartItem>> {
    RwLockReadGuard::map(self.read(), |state| &state.items)
  }

  /// Clones the current item mapping. The unit of synchronization and
  /// rollback: pushes and `last_good` snapshots are built from this.
  pub fn snapshot(&self) -> HashMap<LineKey, CartItem> {
    self.read().items.clone()
  }

  pub fn is_syncing(&self) -> bool {
    self.read().syncing
  }

  pub fn order_type(&self) -> OrderType {
    self.read().order_type
  }

  pub fn branch_name(&self) -> Option<String> {
    self.read().branch_name.clone()
  }

  /// Applies one command under the write lock.
  ///
  /// A dirtying command that changes nothing addressed a key that no longer
  /// exists (typically deleted by a rollback while the caller's intent was
  /// in flight). That stays a no-op, but it is worth a warning.
  pub fn apply(&self, command: CartCommand) -> Applied {
    let name = command.name();
    let dirtying = command.is_dirtying();
    let applied = self.write().apply(command);
    if dirtying && !applied.changed() {
      event!(Level::WARN, command = name, "Stale cart command changed nothing.");
    } else {
      event!(Level::TRACE, command = name, "Cart command applied.");
    }
    applied
  }
}

impl Clone for CartStore {
  fn clone(&self) -> Self {
    CartStore(Arc::clone(&self.0))
  }
}

impl Default for CartStore {
  fn default() -> Self {
    Self::new(CartState::default())
  }
}
