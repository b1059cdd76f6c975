// trolley/examples/basic_cart.rs

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use trolley::{
  Applied, CartCommand, CartGateway, CartItem, CartPushRequest, CartPushResponse, CartStore, LineKey, SyncConfig,
  SyncCoordinator,
};

// 1. A toy gateway standing in for the REST backend: it stores whatever the
//    client pushes and hands it back on fetch.
#[derive(Default)]
struct InMemoryBackend {
  cart: Mutex<HashMap<LineKey, CartItem>>,
}

#[async_trait]
impl CartGateway for InMemoryBackend {
  async fn push_cart(&self, request: CartPushRequest) -> anyhow::Result<CartPushResponse> {
    info!(lines = request.items.len(), order_type = %request.order_type, "backend received push");
    *self.cart.lock() = request.items.clone();
    Ok(CartPushResponse { items: request.items })
  }

  async fn fetch_cart(&self) -> anyhow::Result<CartPushResponse> {
    Ok(CartPushResponse {
      items: self.cart.lock().clone(),
    })
  }
}

fn menu_item(plu: &str, name: &str) -> CartItem {
  CartItem {
    id: 10,
    category_id: 3,
    plu: plu.to_string(),
    quantity: 1,
    special_instruction: String::new(),
    name: Some(name.to_string()),
    symbol: Some("GBP".to_string()),
    description: None,
    image_url: None,
    modifier_groups: Vec::new(),
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Cart Example ---");

  // 2. One store, one coordinator, for the life of the session.
  let backend = Arc::new(InMemoryBackend::default());
  let coordinator = SyncCoordinator::spawn(CartStore::default(), backend.clone(), SyncConfig::default());
  coordinator.hydrate().await?;

  // 3. Edits apply locally at once and coalesce into a single push.
  let key = match coordinator.dispatch(CartCommand::AddItem(menu_item("PIZ-01", "Margherita"))) {
    Applied::Inserted(key) => key,
    other => anyhow::bail!("add did not insert: {:?}", other),
  };
  coordinator.dispatch(CartCommand::IncreaseQuantity(key));
  coordinator.dispatch(CartCommand::AddItem(menu_item("DRK-04", "Lemonade")));

  info!(
    lines = coordinator.store().read().len(),
    syncing = coordinator.is_syncing(),
    "local state right after the edits"
  );

  // 4. Give the debounce window time to close and the push to land.
  tokio::time::sleep(Duration::from_secs(1)).await;

  let state = coordinator.store().read();
  info!(lines = state.len(), syncing = state.syncing, "state after sync");
  for (key, line) in &state.items {
    info!(%key, plu = %line.plu, quantity = line.quantity, "line");
  }

  assert_eq!(state.len(), 2);
  assert_eq!(state.items[&key].quantity, 2);
  assert!(!state.syncing);

  Ok(())
}
