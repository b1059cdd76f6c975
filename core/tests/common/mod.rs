// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::Level;
use trolley::{
  Attribution, CartGateway, CartItem, CartPushRequest, CartPushResponse, Clock, LineKey, TableMessage, TableTransport,
};

// --- Sample payload builders ---

pub fn sample_item(plu: &str, quantity: u32) -> CartItem {
  CartItem {
    id: 1,
    category_id: 7,
    plu: plu.to_string(),
    quantity,
    special_instruction: String::new(),
    name: Some(format!("Item {}", plu)),
    symbol: Some("GBP".to_string()),
    description: None,
    image_url: None,
    modifier_groups: Vec::new(),
  }
}

pub fn sample_attribution() -> Attribution {
  Attribution {
    id: 42,
    name: "Dana".to_string(),
    image: None,
    kind: "customer".to_string(),
  }
}

// --- Scriptable mock gateway ---

/// What the next push should do. Outcomes are consumed in FIFO order; when
/// the queue is empty the gateway echoes the pushed items back (the server
/// accepting the snapshot unchanged).
pub enum PushOutcome {
  /// Acknowledge, echoing the pushed mapping.
  Echo,
  /// Acknowledge with a server-recomputed mapping.
  Respond(HashMap<LineKey, CartItem>),
  /// Acknowledge after a delay, echoing (for stale-response tests).
  EchoAfter(Duration),
  /// Fail with the given message.
  Fail(&'static str),
  /// Never resolve within any test horizon (for timeout tests).
  Hang,
}

pub struct MockGateway {
  outcomes: Mutex<VecDeque<PushOutcome>>,
  pub pushes: Mutex<Vec<CartPushRequest>>,
  fetch_result: Mutex<Result<HashMap<LineKey, CartItem>, &'static str>>,
}

impl MockGateway {
  pub fn new() -> Self {
    MockGateway {
      outcomes: Mutex::new(VecDeque::new()),
      pushes: Mutex::new(Vec::new()),
      fetch_result: Mutex::new(Ok(HashMap::new())),
    }
  }

  pub fn script(&self, outcome: PushOutcome) {
    self.outcomes.lock().push_back(outcome);
  }

  pub fn set_fetch(&self, items: HashMap<LineKey, CartItem>) {
    *self.fetch_result.lock() = Ok(items);
  }

  pub fn fail_fetch(&self, message: &'static str) {
    *self.fetch_result.lock() = Err(message);
  }

  pub fn push_count(&self) -> usize {
    self.pushes.lock().len()
  }

  pub fn pushed_items(&self, index: usize) -> HashMap<LineKey, CartItem> {
    self.pushes.lock()[index].items.clone()
  }
}

#[async_trait]
impl CartGateway for MockGateway {
  async fn push_cart(&self, request: CartPushRequest) -> anyhow::Result<CartPushResponse> {
    let items = request.items.clone();
    self.pushes.lock().push(request);
    let outcome = self.outcomes.lock().pop_front().unwrap_or(PushOutcome::Echo);
    match outcome {
      PushOutcome::Echo => Ok(CartPushResponse { items }),
      PushOutcome::Respond(server_items) => Ok(CartPushResponse { items: server_items }),
      PushOutcome::EchoAfter(delay) => {
        tokio::time::sleep(delay).await;
        Ok(CartPushResponse { items })
      }
      PushOutcome::Fail(message) => Err(anyhow::anyhow!(message)),
      PushOutcome::Hang => {
        tokio::time::sleep(Duration::from_secs(86_400)).await;
        Err(anyhow::anyhow!("hung push resolved, test horizon too long"))
      }
    }
  }

  async fn fetch_cart(&self) -> anyhow::Result<CartPushResponse> {
    match &*self.fetch_result.lock() {
      Ok(items) => Ok(CartPushResponse { items: items.clone() }),
      Err(message) => Err(anyhow::anyhow!(*message)),
    }
  }
}

// --- Mock table transport ---

pub struct MockTransport {
  pub sent: Mutex<Vec<TableMessage>>,
  pub fail_next: Mutex<Option<&'static str>>,
}

impl MockTransport {
  pub fn new() -> Self {
    MockTransport {
      sent: Mutex::new(Vec::new()),
      fail_next: Mutex::new(None),
    }
  }
}

#[async_trait]
impl TableTransport for MockTransport {
  async fn send(&self, message: TableMessage) -> anyhow::Result<()> {
    if let Some(reason) = self.fail_next.lock().take() {
      return Err(anyhow::anyhow!(reason));
    }
    self.sent.lock().push(message);
    Ok(())
  }
}

// --- Manual clock ---

pub struct ManualClock(pub AtomicU64);

impl ManualClock {
  pub fn at(millis: u64) -> Self {
    ManualClock(AtomicU64::new(millis))
  }

  pub fn advance(&self, millis: u64) {
    self.0.fetch_add(millis, Ordering::SeqCst);
  }
}

impl Clock for ManualClock {
  fn now_millis(&self) -> u64 {
    self.0.load(Ordering::SeqCst)
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
