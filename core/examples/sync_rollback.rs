// trolley/examples/sync_rollback.rs
//
// Shows the failure path: a push that the backend rejects rolls the cart
// back to the last snapshot the server acknowledged. The dispatcher never
// sees an error; the rollback is the whole recovery.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use trolley::{
  CartCommand, CartGateway, CartItem, CartPushRequest, CartPushResponse, CartStore, SyncConfig, SyncCoordinator,
};

struct FlakyBackend {
  fail: AtomicBool,
}

#[async_trait]
impl CartGateway for FlakyBackend {
  async fn push_cart(&self, request: CartPushRequest) -> anyhow::Result<CartPushResponse> {
    if self.fail.load(Ordering::SeqCst) {
      anyhow::bail!("cart service unavailable");
    }
    Ok(CartPushResponse { items: request.items })
  }

  async fn fetch_cart(&self) -> anyhow::Result<CartPushResponse> {
    Ok(CartPushResponse {
      items: Default::default(),
    })
  }
}

fn menu_item(plu: &str) -> CartItem {
  CartItem {
    id: 10,
    category_id: 3,
    plu: plu.to_string(),
    quantity: 1,
    special_instruction: String::new(),
    name: None,
    symbol: None,
    description: None,
    image_url: None,
    modifier_groups: Vec::new(),
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let backend = Arc::new(FlakyBackend {
    fail: AtomicBool::new(false),
  });
  let coordinator = SyncCoordinator::spawn(CartStore::default(), backend.clone(), SyncConfig::default());

  // A successful push establishes the rollback target.
  coordinator.dispatch(CartCommand::AddItem(menu_item("PIZ-01")));
  tokio::time::sleep(Duration::from_secs(1)).await;
  info!(lines = coordinator.store().read().len(), "after first (accepted) push");

  // The backend goes down; the next edit's push fails and the cart snaps
  // back to the accepted snapshot.
  backend.fail.store(true, Ordering::SeqCst);
  coordinator.dispatch(CartCommand::AddItem(menu_item("DRK-04")));
  info!(lines = coordinator.store().read().len(), "optimistic state before the failing push");
  tokio::time::sleep(Duration::from_secs(1)).await;

  let state = coordinator.store().read();
  info!(lines = state.len(), syncing = state.syncing, "after rollback");
  assert_eq!(state.len(), 1);
  assert!(!state.syncing);

  Ok(())
}
