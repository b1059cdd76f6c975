use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime; // To run async code within Criterion
use trolley::{
  Applied, CartCommand, CartGateway, CartItem, CartPushRequest, CartPushResponse, CartStore, LineKey, SyncConfig,
  SyncCoordinator,
};

fn bench_item(plu: String) -> CartItem {
  CartItem {
    id: 1,
    category_id: 7,
    plu,
    quantity: 1,
    special_instruction: String::new(),
    name: Some("Bench item".to_string()),
    symbol: Some("GBP".to_string()),
    description: None,
    image_url: None,
    modifier_groups: Vec::new(),
  }
}

fn filled_store(lines: usize) -> (CartStore, Vec<LineKey>) {
  let store = CartStore::default();
  let keys = (0..lines)
    .map(|i| match store.apply(CartCommand::AddItem(bench_item(format!("PLU-{}", i)))) {
      Applied::Inserted(key) => key,
      other => panic!("unexpected outcome: {:?}", other),
    })
    .collect();
  (store, keys)
}

// --- Instantly-acknowledging gateway ---

struct EchoGateway {
  pushes: AtomicUsize,
}

#[async_trait]
impl CartGateway for EchoGateway {
  async fn push_cart(&self, request: CartPushRequest) -> anyhow::Result<CartPushResponse> {
    self.pushes.fetch_add(1, Ordering::SeqCst);
    Ok(CartPushResponse { items: request.items })
  }

  async fn fetch_cart(&self) -> anyhow::Result<CartPushResponse> {
    Ok(CartPushResponse { items: HashMap::new() })
  }
}

// --- Benchmark Functions ---

fn bench_reducer_ops(c: &mut Criterion) {
  let mut group = c.benchmark_group("CartReducer");

  for cart_size in [1usize, 10, 100].iter() {
    group.throughput(Throughput::Elements(1));
    group.bench_with_input(BenchmarkId::new("add_item", cart_size), cart_size, |b, &size| {
      b.iter_batched(
        || filled_store(size).0,
        |store| {
          store.apply(CartCommand::AddItem(bench_item("PLU-new".to_string())));
        },
        criterion::BatchSize::SmallInput,
      );
    });

    group.bench_with_input(BenchmarkId::new("increase_quantity", cart_size), cart_size, |b, &size| {
      let (store, keys) = filled_store(size);
      let key = keys[0];
      b.iter(|| {
        store.apply(CartCommand::IncreaseQuantity(key));
      });
    });

    group.bench_with_input(BenchmarkId::new("snapshot", cart_size), cart_size, |b, &size| {
      let (store, _keys) = filled_store(size);
      b.iter(|| criterion::black_box(store.snapshot()));
    });
  }
  group.finish();
}

fn bench_debounced_burst(c: &mut Criterion) {
  let mut group = c.benchmark_group("DebouncedBurst");
  let rt = Runtime::new().unwrap();

  for burst_len in [1usize, 10, 50].iter() {
    group.throughput(Throughput::Elements(*burst_len as u64));
    group.bench_with_input(BenchmarkId::from_parameter(*burst_len), burst_len, |b, &len| {
      b.to_async(&rt).iter(|| async move {
        let gateway = Arc::new(EchoGateway {
          pushes: AtomicUsize::new(0),
        });
        let coordinator = SyncCoordinator::spawn(
          CartStore::default(),
          gateway.clone(),
          SyncConfig {
            debounce: Duration::from_millis(1),
            push_timeout: Duration::from_secs(5),
          },
        );
        for i in 0..len {
          coordinator.dispatch(CartCommand::AddItem(bench_item(format!("PLU-{}", i))));
        }
        // One coalesced push resolves the burst.
        while gateway.pushes.load(Ordering::SeqCst) == 0 {
          tokio::time::sleep(Duration::from_millis(1)).await;
        }
      });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_reducer_ops, bench_debounced_burst);
criterion_main!(benches);
