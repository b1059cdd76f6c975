// trolley/src/sync/coordinator.rs

//! Bridges optimistic local cart mutations to the remote gateway.
//!
//! Every dirtying command is applied to the store synchronously first, so the
//! UI always reflects the user's intent. The coordinator then coalesces a
//! burst of edits behind a trailing debounce window and pushes the cart as it
//! stands when the window closes, not as it stood when the burst began. A
//! failed or timed-out push rolls the whole cart back to the last snapshot
//! the server acknowledged (or to empty if there is none); there is no
//! per-line merge. Push failures never propagate to dispatchers.
//!
//! Per-push lifecycle: Idle -> PendingPush (window armed) -> Pushing ->
//! Idle (success) or Idle-with-rollback (failure). A dirtying command that
//! arrives while a push is pending or in flight extends or re-arms the
//! window; the resolution of a push that was overtaken this way is recorded
//! but never applied over the newer local edits.

use crate::cart::command::CartCommand;
use crate::cart::item::{CartItem, LineKey, OrderType};
use crate::cart::state::Applied;
use crate::cart::store::CartStore;
use crate::error::{TrolleyError, TrolleyResult};
use crate::sync::config::SyncConfig;
use crate::sync::gateway::{CartGateway, CartPushRequest};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{event, instrument, Level};

/// Coordinates debounced pushes of the local cart to the server, owning the
/// last-known-good snapshot and the worker task.
///
/// Construct once per cart with [`SyncCoordinator::spawn`] and dispatch all
/// cart commands through it. Dropping the coordinator aborts the worker;
/// a push in flight at that moment is abandoned, not rolled back.
pub struct SyncCoordinator {
  inner: Arc<CoordinatorInner>,
  worker: JoinHandle<()>,
}

struct CoordinatorInner {
  store: CartStore,
  gateway: Arc<dyn CartGateway>,
  config: SyncConfig,
  /// Bumped by every dirtying dispatch, inside the same store write section
  /// that applies the edit. The worker re-reads it under that lock before
  /// applying a push's resolution, so "newer edits exist" and "resolution
  /// applied" can never interleave.
  burst_seq: AtomicU64,
  /// Monotonic id per outgoing push, for correlating log lines.
  push_version: AtomicU64,
  wake: Notify,
  /// Snapshot the server last acknowledged; the rollback target.
  last_good: Mutex<HashMap<LineKey, CartItem>>,
}

impl SyncCoordinator {
  /// Spawns the worker task on the current tokio runtime and returns the
  /// coordinator handle. Must be called from within a runtime.
  pub fn spawn(store: CartStore, gateway: Arc<dyn CartGateway>, config: SyncConfig) -> Self {
    let inner = Arc::new(CoordinatorInner {
      store,
      gateway,
      config,
      burst_seq: AtomicU64::new(0),
      push_version: AtomicU64::new(0),
      wake: Notify::new(),
      last_good: Mutex::new(HashMap::new()),
    });
    let worker = tokio::spawn(run_worker(Arc::clone(&inner)));
    SyncCoordinator { inner, worker }
  }

  pub fn store(&self) -> &CartStore {
    &self.inner.store
  }

  pub fn is_syncing(&self) -> bool {
    self.inner.store.is_syncing()
  }

  /// Applies a command to the store (optimistic, synchronous) and, for
  /// dirtying commands, raises the syncing flag and arms or extends the
  /// debounce window.
  ///
  /// Scheduling does not depend on whether the command changed anything:
  /// stale keys are warned about below, and pushing an unchanged snapshot
  /// is harmless.
  pub fn dispatch(&self, command: CartCommand) -> Applied {
    if !command.is_dirtying() {
      return self.inner.store.apply(command);
    }
    let name = command.name();
    let applied = {
      // The edit, the flag, and the sequence bump share one write section.
      // A push resolution checks the sequence under this same lock, so it
      // either sees this edit's bump or resolves before the edit lands.
      let mut state = self.inner.store.write();
      let applied = state.apply(command);
      state.syncing = true;
      self.inner.burst_seq.fetch_add(1, Ordering::SeqCst);
      applied
    };
    if applied.changed() {
      event!(Level::TRACE, command = name, "Cart command applied.");
    } else {
      event!(Level::WARN, command = name, "Stale cart command changed nothing.");
    }
    self.inner.wake.notify_one();
    applied
  }

  /// Pulls the server's cart at startup, seeding both the store and the
  /// rollback snapshot. Unlike push failures, hydration failures are
  /// returned: the caller decides whether an empty cart is acceptable.
  #[instrument(name = "SyncCoordinator::hydrate", skip_all, err(Display))]
  pub async fn hydrate(&self) -> TrolleyResult<()> {
    let response = self
      .inner
      .gateway
      .fetch_cart()
      .await
      .map_err(|source| TrolleyError::HydrationFailure { source })?;
    event!(Level::DEBUG, lines = response.items.len(), "Cart hydrated from server.");
    *self.inner.last_good.lock() = response.items.clone();
    self.inner.store.apply(CartCommand::SetFromFetch(response.items));
    Ok(())
  }

  /// Stops the worker task. Any armed debounce window or in-flight push is
  /// abandoned.
  pub fn shutdown(&self) {
    self.worker.abort();
  }
}

impl Drop for SyncCoordinator {
  fn drop(&mut self) {
    self.worker.abort();
  }
}

async fn run_worker(inner: Arc<CoordinatorInner>) {
  loop {
    inner.wake.notified().await;

    // Trailing debounce: every further wake restarts the quiet-time clock.
    loop {
      let window = tokio::time::sleep(inner.config.debounce);
      tokio::pin!(window);
      tokio::select! {
        _ = inner.wake.notified() => continue,
        _ = &mut window => break,
      }
    }

    push_once(&inner).await;
  }
}

/// Runs one push cycle: snapshot at fire time, push with timeout, then
/// reconcile, roll back, or stand down depending on outcome and staleness.
#[instrument(name = "cart_push", skip_all, fields(version = tracing::field::Empty))]
async fn push_once(inner: &CoordinatorInner) {
  let seq = inner.burst_seq.load(Ordering::SeqCst);
  let version = inner.push_version.fetch_add(1, Ordering::SeqCst) + 1;
  tracing::Span::current().record("version", version);

  let request = {
    let state = inner.store.read();
    CartPushRequest {
      items: state.items.clone(),
      order_type: state.order_type,
      // Branch selection only applies to takeaway orders.
      branch: match state.order_type {
        OrderType::Takeaway => state.branch_name.clone(),
        OrderType::Delivery | OrderType::DineIn => None,
      },
    }
  };
  event!(
    Level::DEBUG,
    lines = request.items.len(),
    order_type = %request.order_type,
    "Pushing cart snapshot."
  );

  let outcome = tokio::time::timeout(inner.config.push_timeout, inner.gateway.push_cart(request)).await;

  match outcome {
    Ok(Ok(response)) => {
      // A stale success (newer edits raced in while the push was in
      // flight) still counts as the last acknowledged snapshot; only the
      // local reconciliation is withheld.
      *inner.last_good.lock() = response.items.clone();
      let lines = response.items.len();
      // Server may have recomputed prices or availability; its view wins.
      let fresh = resolve_if_fresh(inner, seq, response.items);
      event!(Level::DEBUG, lines, fresh, "Cart push acknowledged.");
    }
    Ok(Err(err)) => {
      let fresh = roll_back_if_fresh(inner, seq);
      event!(Level::WARN, error = %err, fresh, "Cart push failed.");
    }
    Err(_elapsed) => {
      let err = TrolleyError::PushTimeout {
        after: inner.config.push_timeout,
      };
      let fresh = roll_back_if_fresh(inner, seq);
      event!(Level::WARN, error = %err, fresh, "Cart push timed out.");
    }
  }
}

/// Applies the resolution of the push started at `seq` — replacing the item
/// mapping and lowering the syncing flag — unless a newer burst exists.
///
/// The sequence check and the apply run under the same write lock that
/// `dispatch` bumps the sequence under, making the staleness guard one
/// atomic step: a concurrent edit either lands before the check (and the
/// resolution stands down) or after the lock is released (on top of the
/// resolved mapping, with its own burst still pending). A stale resolution
/// also leaves the syncing flag raised; the pending burst clears it when it
/// resolves. Returns whether the resolution was applied.
fn resolve_if_fresh(inner: &CoordinatorInner, seq: u64, items: HashMap<LineKey, CartItem>) -> bool {
  let mut state = inner.store.write();
  if inner.burst_seq.load(Ordering::SeqCst) != seq {
    return false;
  }
  state.items = items;
  state.syncing = false;
  true
}

fn roll_back_if_fresh(inner: &CoordinatorInner, seq: u64) -> bool {
  let snapshot = inner.last_good.lock().clone();
  let lines = snapshot.len();
  let rolled = resolve_if_fresh(inner, seq, snapshot);
  if rolled {
    event!(Level::INFO, lines, "Rolled cart back to last known-good snapshot.");
  }
  rolled
}
